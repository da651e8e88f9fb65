use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::Parser;
use sweep_core::*;
use tracing_subscriber::filter::LevelFilter;
use web_time::Instant;

use command::{Command, HELP, parse_command};

mod command;
mod render;

#[derive(Parser, Debug)]
#[command(version, about = "Clear a minefield from the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board height
    #[arg(long, default_value_t = 10)]
    rows: Coord,

    /// Board width
    #[arg(long, default_value_t = 10)]
    cols: Coord,

    /// Number of mines, must leave at least one safe cell
    #[arg(short, long, default_value_t = 10)]
    mines: CellCount,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// File that winning times are appended to
    #[arg(long, default_value = DEFAULT_SCORE_FILE)]
    scores: PathBuf,

    /// Keep winning times in memory only
    #[arg(long)]
    no_scores: bool,
}

fn init_logging(verbose: &clap_verbosity_flag::Verbosity) -> anyhow::Result<()> {
    let level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| anyhow!("Error initializing logger: {err}"))
}

struct Session<G, S> {
    game: GameController<G, S>,
    scores_path: Option<PathBuf>,
}

impl<G: MineGenerator, S: ScoreStore> Session<G, S> {
    /// Runs one command, returning `false` once the player asks to quit.
    fn handle(&mut self, command: Command, out: &mut impl Write) -> anyhow::Result<bool> {
        let now = Instant::now();
        match command {
            Command::Quit => return Ok(false),
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Start => match self.game.start_game() {
                Ok(()) => render::render(out, &self.game.snapshot(now))?,
                Err(err) => writeln!(out, "could not start: {err}")?,
            },
            Command::Reveal(coords) => {
                match self.game.reveal_cell(coords, now) {
                    Ok(RevealOutcome::Win) => writeln!(
                        out,
                        "Cleared in {}!",
                        self.game.elapsed_display(now)
                    )?,
                    Ok(RevealOutcome::Loss) => writeln!(out, "Boom. Type \"start\" to try again.")?,
                    Ok(RevealOutcome::Ignored) => {
                        writeln!(out, "{coords:?} is already open or flagged")?
                    }
                    Ok(RevealOutcome::Continue) => {}
                    Err(err) => {
                        log::debug!("Rejected reveal at {:?}: {}", coords, err);
                        writeln!(out, "{err}")?;
                        return Ok(true);
                    }
                }
                render::render(out, &self.game.snapshot(now))?;
            }
            Command::Flag(coords) => match self.game.toggle_flag(coords) {
                Ok(outcome) => {
                    if outcome.has_update() {
                        render::render(out, &self.game.snapshot(now))?;
                    }
                }
                Err(err) => {
                    log::debug!("Rejected flag at {:?}: {}", coords, err);
                    writeln!(out, "{err}")?;
                }
            },
            Command::Show => render::render(out, &self.game.snapshot(now))?,
            Command::Json => {
                let json = serde_json::to_string_pretty(&self.game.snapshot(now))?;
                writeln!(out, "{json}")?;
            }
            Command::Best => match self.game.best_time_display() {
                Some(best) => writeln!(out, "best time: {best}")?,
                None => writeln!(out, "no wins recorded yet")?,
            },
            Command::History => self.print_history(out)?,
        }
        Ok(true)
    }

    fn print_history(&self, out: &mut impl Write) -> anyhow::Result<()> {
        let Some(path) = &self.scores_path else {
            writeln!(out, "history is not persisted in this session")?;
            return Ok(());
        };
        let records = FileScoreStore::new(path)
            .records()
            .with_context(|| format!("reading {}", path.display()))?;
        if records.is_empty() {
            writeln!(out, "no wins recorded yet")?;
        }
        for record in records {
            writeln!(out, "{}", record.to_line())?;
        }
        Ok(())
    }
}

fn run<G: MineGenerator, S: ScoreStore>(mut session: Session<G, S>) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    session.game.start_game().context("could not generate the board")?;
    render::render(&mut out, &session.game.snapshot(Instant::now()))?;

    let mut lines = stdin.lock().lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let command = match parse_command(&line?) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "{err:#}")?;
                continue;
            }
        };
        if !session.handle(command, &mut out)? {
            break;
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose)?;
    log::debug!("seed: {:?}", args.seed);

    let config =
        GameConfig::new((args.rows, args.cols), args.mines).context("invalid board settings")?;
    let generator = match args.seed {
        Some(seed) => RandomGenerator::new(seed),
        None => RandomGenerator::from_entropy(),
    };

    if args.no_scores {
        let game = GameController::new(config, generator, MemoryScoreStore::new())?;
        run(Session {
            game,
            scores_path: None,
        })
    } else {
        let game = GameController::new(config, generator, FileScoreStore::new(&args.scores))?;
        run(Session {
            game,
            scores_path: Some(args.scores),
        })
    }
}
