use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines")]
    TooManyMines,
    #[error("A board needs at least one mine")]
    NoMines,
    #[error("Mine layout does not match the requested mine count")]
    MineCountMismatch,
    #[error("Board must have at least one row and one column")]
    InvalidBoardShape,
    #[error("No game in progress, start a new one first")]
    NotStarted,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Failures of the persisted score log. None of these are fatal to a game.
#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("Score log I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed score record: {0:?}")]
    MalformedRecord(String),
}
