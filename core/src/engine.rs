use std::collections::VecDeque;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    #[default]
    Active,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Reveal and flag rules applied to one generated board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    board: Board,
    revealed_count: CellCount,
    flagged_count: CellCount,
    state: EngineState,
    triggered_mine: Option<Coord2>,
}

impl PlayEngine {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            revealed_count: 0,
            flagged_count: 0,
            state: Default::default(),
            triggered_mine: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.board.total_mines()
    }

    /// Mines minus placed flags. Goes negative when the player over-flags.
    pub fn mines_left(&self) -> isize {
        (self.board.total_mines() as isize) - (self.flagged_count as isize)
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.board[coords]
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn unrevealed_count(&self) -> CellCount {
        self.board.total_cells() - self.revealed_count
    }

    pub fn cell_views(&self) -> Vec<CellView> {
        self.board
            .iter_cells()
            .map(|(coords, cell)| cell.view(coords))
            .collect()
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.board.validate_coords(coords)?;
        self.check_active()?;

        let cell = &mut self.board[coords];
        if cell.revealed {
            return Ok(MarkOutcome::NoChange);
        }

        cell.flagged = !cell.flagged;
        if cell.flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        log::trace!("Flag at {:?} is now {}", coords, cell.flagged);
        Ok(MarkOutcome::Changed)
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;
        self.check_active()?;

        if !self.board[coords].can_reveal() {
            return Ok(RevealOutcome::Ignored);
        }

        if self.board[coords].mine {
            self.mark_revealed(coords);
            self.triggered_mine = Some(coords);
            self.end_game(false);
            return Ok(RevealOutcome::Loss);
        }

        self.flood_reveal(coords);

        if self.unrevealed_count() == self.board.total_mines() {
            self.end_game(true);
            Ok(RevealOutcome::Win)
        } else {
            Ok(RevealOutcome::Continue)
        }
    }

    /// Reveals `start` and, through zero-count cells, every connected cell that is neither revealed nor flagged.
    ///
    /// Cells are marked revealed as they are queued, so each one enters the worklist at most once.
    fn flood_reveal(&mut self, start: Coord2) {
        let mut to_visit = VecDeque::from([start]);
        self.mark_revealed(start);

        while let Some(visit_coords) = to_visit.pop_front() {
            if self.board[visit_coords].adjacent_mines != 0 {
                continue;
            }

            for neighbor in self.board.iter_neighbors(visit_coords) {
                if self.board[neighbor].can_reveal() {
                    self.mark_revealed(neighbor);
                    to_visit.push_back(neighbor);
                }
            }
        }
    }

    fn mark_revealed(&mut self, coords: Coord2) {
        let cell = &mut self.board[coords];
        cell.revealed = true;
        self.revealed_count += 1;
        log::trace!("Revealed {:?}, adjacent mines: {}", coords, cell.adjacent_mines);
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            EngineState::Won
        } else {
            EngineState::Lost
        };

        for coords in self.board.mine_coords() {
            if won {
                self.board[coords].flagged = true;
            } else if !self.board[coords].revealed {
                self.mark_revealed(coords);
            }
        }
        if won {
            self.flagged_count = self.board.total_mines();
        }
        log::info!(
            "Game {} after revealing {} cells",
            if won { "won" } else { "lost" },
            self.revealed_count
        );
    }

    fn check_active(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
