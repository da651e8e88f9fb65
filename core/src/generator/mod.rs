use crate::*;
pub use preset::*;
pub use random::*;

mod preset;
mod random;

pub trait MineGenerator {
    /// Places exactly `mines` mines on `board` and computes every neighbor count.
    ///
    /// Any previous layout on the board is discarded.
    fn generate(&mut self, board: &mut Board, mines: CellCount) -> Result<()>;
}

/// Checks `0 < mines < total cells`, the range every generator accepts.
pub fn check_mine_count(board: &Board, mines: CellCount) -> Result<()> {
    if mines == 0 {
        Err(GameError::NoMines)
    } else if mines >= board.total_cells() {
        Err(GameError::TooManyMines)
    } else {
        Ok(())
    }
}

fn verify_count(board: &Board, requested: CellCount) {
    if board.total_mines() != requested {
        log::warn!(
            "Generated board count mismatch, actual: {}, requested: {}",
            board.total_mines(),
            requested
        );
    }
}
