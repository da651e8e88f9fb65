use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use controller::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use scores::*;
pub use types::*;

mod board;
mod cell;
mod controller;
mod engine;
mod error;
mod generator;
mod scores;
mod types;

/// Board dimensions `(rows, cols)` and mine count for a new game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            Err(GameError::InvalidBoardShape)
        } else if self.mines == 0 {
            Err(GameError::NoMines)
        } else if self.mines >= self.total_cells() {
            Err(GameError::TooManyMines)
        } else {
            Ok(())
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((10, 10), 10)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    /// Target was already revealed or is flagged.
    Ignored,
    Continue,
    Win,
    Loss,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            Ignored => false,
            Continue => true,
            Win => true,
            Loss => true,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Win | Self::Loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_ten_by_ten() {
        let config = GameConfig::default();
        assert_eq!(config.size, (10, 10));
        assert_eq!(config.mines, 10);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn config_validation() {
        assert_eq!(GameConfig::new((0, 5), 1), Err(GameError::InvalidBoardShape));
        assert_eq!(GameConfig::new((3, 3), 0), Err(GameError::NoMines));
        assert_eq!(GameConfig::new((3, 3), 9), Err(GameError::TooManyMines));
        assert!(GameConfig::new((3, 3), 8).is_ok());
    }

    #[test]
    fn only_ignored_has_no_update() {
        assert!(!RevealOutcome::Ignored.has_update());
        assert!(RevealOutcome::Continue.has_update());
        assert!(RevealOutcome::Loss.is_terminal());
        assert!(!RevealOutcome::Continue.is_terminal());
        assert!(MarkOutcome::Changed.has_update());
    }
}
