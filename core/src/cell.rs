use serde::{Deserialize, Serialize};

use crate::Coord2;

/// One grid position. `adjacent_mines` is only meaningful once the board has been generated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub mine: bool,
    pub adjacent_mines: u8,
    pub revealed: bool,
    pub flagged: bool,
}

impl Cell {
    pub const fn is_unrevealed(self) -> bool {
        !self.revealed
    }

    /// Whether a direct reveal command may open this cell.
    pub const fn can_reveal(self) -> bool {
        !self.revealed && !self.flagged
    }

    pub fn view(self, coords: Coord2) -> CellView {
        let (row, col) = coords;
        CellView {
            row,
            col,
            revealed: self.revealed,
            flagged: self.flagged,
            mine: self.revealed.then_some(self.mine),
            adjacent_mines: (self.revealed && !self.mine).then_some(self.adjacent_mines),
        }
    }
}

/// Player-visible projection of a [`Cell`], hiding what has not been uncovered yet.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub row: u8,
    pub col: u8,
    pub revealed: bool,
    pub flagged: bool,
    pub mine: Option<bool>,
    pub adjacent_mines: Option<u8>,
}

impl CellView {
    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }
}
