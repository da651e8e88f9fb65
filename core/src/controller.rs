use std::time::Duration;

use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Valid transitions:
/// - Idle -> Active
/// - Active -> Won
/// - Active -> Lost
/// - any -> Active (restart)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerState {
    /// No game has been started yet
    #[default]
    Idle,
    Active,
    Won,
    Lost,
}

impl ControllerState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl From<EngineState> for ControllerState {
    fn from(state: EngineState) -> Self {
        match state {
            EngineState::Active => Self::Active,
            EngineState::Won => Self::Won,
            EngineState::Lost => Self::Lost,
        }
    }
}

/// Everything a presentation layer needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub state: ControllerState,
    pub size: Coord2,
    /// Row-major; empty while idle.
    pub cells: Vec<CellView>,
    pub elapsed_display: String,
    pub mines_remaining: isize,
    pub is_game_active: bool,
    pub best_time_display: Option<String>,
}

/// Runs one game at a time in response to start/reveal/flag commands.
///
/// The controller never reads the clock itself; callers pass `now` so display polling stays their concern.
#[derive(Debug)]
pub struct GameController<G, S> {
    config: GameConfig,
    generator: G,
    scores: S,
    engine: Option<PlayEngine>,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
    best_time: Option<Duration>,
}

impl<G: MineGenerator, S: ScoreStore> GameController<G, S> {
    pub fn new(config: GameConfig, generator: G, scores: S) -> Result<Self> {
        config.validate()?;
        let best_time = scores.load_best_time();
        log::debug!("Loaded best time: {:?}", best_time);
        Ok(Self {
            config,
            generator,
            scores,
            engine: None,
            started_at: None,
            ended_at: None,
            best_time,
        })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn scores(&self) -> &S {
        &self.scores
    }

    pub fn engine(&self) -> Option<&PlayEngine> {
        self.engine.as_ref()
    }

    pub fn state(&self) -> ControllerState {
        self.engine
            .as_ref()
            .map_or(ControllerState::Idle, |engine| engine.state().into())
    }

    pub fn is_game_active(&self) -> bool {
        self.state() == ControllerState::Active
    }

    /// Discards any current game and generates a fresh board. On failure the previous game is kept.
    pub fn start_game(&mut self) -> Result<()> {
        let mut board = Board::new(self.config.size)?;
        self.generator.generate(&mut board, self.config.mines)?;

        self.engine = Some(PlayEngine::new(board));
        self.started_at = None;
        self.ended_at = None;
        log::info!(
            "Started {}x{} game with {} mines",
            self.config.size.0,
            self.config.size.1,
            self.config.mines
        );
        Ok(())
    }

    pub fn reveal_cell(&mut self, coords: Coord2, now: Instant) -> Result<RevealOutcome> {
        let engine = self.engine.as_mut().ok_or(GameError::NotStarted)?;
        let outcome = engine.reveal(coords)?;

        if outcome.has_update() && self.started_at.is_none() {
            self.started_at = Some(now);
        }

        if self.state().is_terminal() {
            self.ended_at = Some(now);
        }
        if outcome == RevealOutcome::Win {
            self.record_win(now);
        }

        Ok(outcome)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let engine = self.engine.as_mut().ok_or(GameError::NotStarted)?;
        engine.toggle_flag(coords)
    }

    fn record_win(&mut self, now: Instant) {
        let elapsed = Duration::from_secs(self.elapsed_seconds(now));
        let formatted = format_duration(elapsed);
        log::info!("Board cleared in {}", formatted);

        if let Err(err) = self.scores.append(&formatted) {
            log::warn!("Could not save score {}: {}", formatted, err);
        }
        self.best_time = Some(self.best_time.map_or(elapsed, |best| best.min(elapsed)));
    }

    /// Whole seconds since the first reveal, frozen once the game has ended. Zero before the first reveal.
    pub fn elapsed_seconds(&self, now: Instant) -> u64 {
        match self.started_at {
            Some(started_at) => self
                .ended_at
                .unwrap_or(now)
                .saturating_duration_since(started_at)
                .as_secs(),
            None => 0,
        }
    }

    pub fn elapsed_display(&self, now: Instant) -> String {
        format_duration(Duration::from_secs(self.elapsed_seconds(now)))
    }

    pub fn mines_remaining(&self) -> isize {
        self.engine
            .as_ref()
            .map_or(self.config.mines as isize, PlayEngine::mines_left)
    }

    pub fn best_time(&self) -> Option<Duration> {
        self.best_time
    }

    pub fn best_time_display(&self) -> Option<String> {
        self.best_time.map(format_duration)
    }

    pub fn snapshot(&self, now: Instant) -> GameSnapshot {
        GameSnapshot {
            state: self.state(),
            size: self.config.size,
            cells: self
                .engine
                .as_ref()
                .map(PlayEngine::cell_views)
                .unwrap_or_default(),
            elapsed_display: self.elapsed_display(now),
            mines_remaining: self.mines_remaining(),
            is_game_active: self.is_game_active(),
            best_time_display: self.best_time_display(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestController = GameController<PresetGenerator, MemoryScoreStore>;

    fn controller(size: Coord2, mines: &[Coord2]) -> TestController {
        let config = GameConfig::new(size, mines.len() as CellCount).unwrap();
        GameController::new(config, PresetGenerator::new(mines), MemoryScoreStore::new()).unwrap()
    }

    fn at(base: Instant, secs: u64) -> Instant {
        base + Duration::from_secs(secs)
    }

    #[test]
    fn starts_idle() {
        let mut game = controller((3, 3), &[(0, 0)]);
        let now = Instant::now();

        assert_eq!(game.state(), ControllerState::Idle);
        assert!(!game.state().is_terminal());
        assert!(!game.is_game_active());
        assert_eq!(game.reveal_cell((1, 1), now), Err(GameError::NotStarted));
        assert_eq!(game.toggle_flag((1, 1)), Err(GameError::NotStarted));
        assert!(game.snapshot(now).cells.is_empty());
        assert_eq!(game.mines_remaining(), 1);
    }

    #[test]
    fn start_resets_counters() {
        let mut game = controller((3, 3), &[(0, 0), (2, 2)]);
        let now = Instant::now();

        game.start_game().unwrap();

        assert_eq!(game.state(), ControllerState::Active);
        assert_eq!(game.mines_remaining(), 2);
        assert_eq!(game.elapsed_display(now), "00:00");
        assert_eq!(game.engine().unwrap().total_mines(), 2);
    }

    #[test]
    fn clock_starts_on_first_reveal() {
        let mut game = controller((3, 3), &[(0, 0)]);
        let t0 = Instant::now();
        game.start_game().unwrap();

        assert_eq!(game.elapsed_seconds(at(t0, 30)), 0);

        game.reveal_cell((1, 1), at(t0, 30)).unwrap();

        assert_eq!(game.elapsed_seconds(at(t0, 30)), 0);
        assert_eq!(game.elapsed_display(at(t0, 95)), "01:05");
    }

    #[test]
    fn ignored_reveal_does_not_start_clock() {
        let mut game = controller((3, 3), &[(0, 0)]);
        let t0 = Instant::now();
        game.start_game().unwrap();
        game.toggle_flag((1, 1)).unwrap();

        assert_eq!(game.reveal_cell((1, 1), t0), Ok(RevealOutcome::Ignored));
        assert_eq!(game.elapsed_seconds(at(t0, 10)), 0);
    }

    #[test]
    fn win_records_score_and_freezes_clock() {
        let mut game = controller((3, 3), &[(0, 0)]);
        let t0 = Instant::now();
        game.start_game().unwrap();

        game.reveal_cell((0, 1), t0).unwrap();
        game.reveal_cell((1, 0), at(t0, 20)).unwrap();
        game.reveal_cell((1, 1), at(t0, 40)).unwrap();
        let outcome = game.reveal_cell((2, 2), at(t0, 75)).unwrap();

        assert_eq!(outcome, RevealOutcome::Win);
        assert_eq!(game.state(), ControllerState::Won);
        assert!(!game.is_game_active());
        assert_eq!(game.elapsed_display(at(t0, 500)), "01:15");
        assert_eq!(game.mines_remaining(), 0);
        assert_eq!(game.best_time_display().as_deref(), Some("01:15"));

        let lines = game.scores().lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with(" - Time: 01:15"));
    }

    #[test]
    fn best_time_keeps_minimum() {
        let store = MemoryScoreStore::from_lines(["01.01.2024 10:00 - Time: 00:10"]);
        let config = GameConfig::new((3, 3), 1).unwrap();
        let mut game =
            GameController::new(config, PresetGenerator::new([(2, 2)]), store).unwrap();
        let t0 = Instant::now();

        assert_eq!(game.best_time_display().as_deref(), Some("00:10"));

        game.start_game().unwrap();
        game.reveal_cell((0, 0), t0).unwrap();

        assert_eq!(game.state(), ControllerState::Won);
        assert_eq!(game.best_time_display().as_deref(), Some("00:00"));
        assert_eq!(game.scores().lines().len(), 2);
    }

    #[test]
    fn loss_records_nothing() {
        let mut game = controller((2, 2), &[(1, 1)]);
        let t0 = Instant::now();
        game.start_game().unwrap();

        let outcome = game.reveal_cell((1, 1), t0).unwrap();

        assert_eq!(outcome, RevealOutcome::Loss);
        assert_eq!(game.state(), ControllerState::Lost);
        assert!(game.state().is_terminal());
        assert!(game.scores().lines().is_empty());
        assert_eq!(game.best_time(), None);

        let snapshot = game.snapshot(at(t0, 9));
        let revealed: Vec<_> = snapshot
            .cells
            .iter()
            .filter(|cell| cell.revealed)
            .map(CellView::coords)
            .collect();
        assert_eq!(revealed, vec![(1, 1)]);
        assert_eq!(snapshot.elapsed_display, "00:00");
    }

    #[test]
    fn terminal_state_rejects_commands_until_restart() {
        let mut game = controller((2, 2), &[(1, 1)]);
        let t0 = Instant::now();
        game.start_game().unwrap();
        game.reveal_cell((1, 1), t0).unwrap();
        let before = game.snapshot(t0);

        assert_eq!(game.reveal_cell((0, 0), t0), Err(GameError::AlreadyEnded));
        assert_eq!(game.toggle_flag((0, 0)), Err(GameError::AlreadyEnded));
        assert_eq!(game.snapshot(t0), before);

        game.start_game().unwrap();

        assert_eq!(game.state(), ControllerState::Active);
        assert!(game.snapshot(t0).cells.iter().all(|cell| !cell.revealed));
        assert_eq!(game.reveal_cell((0, 0), t0), Ok(RevealOutcome::Continue));
    }

    #[test]
    fn invalid_coords_leave_state_untouched() {
        let mut game = controller((2, 2), &[(1, 1)]);
        let t0 = Instant::now();
        game.start_game().unwrap();
        let before = game.snapshot(t0);

        assert_eq!(game.reveal_cell((5, 5), t0), Err(GameError::InvalidCoords));
        assert_eq!(game.snapshot(t0), before);
        assert_eq!(game.elapsed_seconds(at(t0, 3)), 0);
    }

    #[test]
    fn failed_start_keeps_previous_state() {
        let config = GameConfig::new((3, 3), 2).unwrap();
        let mut game =
            GameController::new(config, PresetGenerator::new([(0, 0)]), MemoryScoreStore::new())
                .unwrap();

        assert_eq!(game.start_game(), Err(GameError::MineCountMismatch));
        assert_eq!(game.state(), ControllerState::Idle);
    }

    #[test]
    fn rejects_invalid_config() {
        let config = GameConfig::new_unchecked((2, 2), 4);
        let result = GameController::new(config, RandomGenerator::new(0), MemoryScoreStore::new());
        assert!(matches!(result, Err(GameError::TooManyMines)));
    }

    #[test]
    fn score_write_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig::new((3, 3), 1).unwrap();
        let mut game = GameController::new(
            config,
            PresetGenerator::new([(2, 2)]),
            FileScoreStore::new(dir.path()),
        )
        .unwrap();
        let t0 = Instant::now();
        game.start_game().unwrap();

        let outcome = game.reveal_cell((0, 0), at(t0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::Win);
        assert_eq!(game.state(), ControllerState::Won);
        assert_eq!(game.best_time_display().as_deref(), Some("00:00"));
    }

    #[test]
    fn random_games_are_playable() {
        let config = GameConfig::default();
        let mut game =
            GameController::new(config, RandomGenerator::new(3), MemoryScoreStore::new()).unwrap();
        let t0 = Instant::now();
        game.start_game().unwrap();

        let safe: Vec<Coord2> = game
            .engine()
            .unwrap()
            .board()
            .iter_cells()
            .filter(|(_, cell)| !cell.mine)
            .map(|(coords, _)| coords)
            .collect();

        let mut last = RevealOutcome::Ignored;
        for coords in safe {
            if game.is_game_active() {
                last = game.reveal_cell(coords, t0).unwrap();
            }
        }

        assert_eq!(last, RevealOutcome::Win);
        assert_eq!(game.scores().lines().len(), 1);
    }

    #[test]
    fn snapshot_serializes() {
        let mut game = controller((2, 2), &[(0, 0)]);
        game.start_game().unwrap();
        let json = serde_json::to_string(&game.snapshot(Instant::now())).unwrap();
        assert!(json.contains("\"state\":\"Active\""));
        assert!(json.contains("\"mines_remaining\":1"));
    }
}
