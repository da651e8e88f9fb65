use super::*;

/// Places mines at a fixed set of coordinates, for scripted games and reproducible tests.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetGenerator {
    mines: Vec<Coord2>,
}

impl PresetGenerator {
    pub fn new(mines: impl Into<Vec<Coord2>>) -> Self {
        let mut mines = mines.into();
        mines.sort_unstable();
        mines.dedup();
        Self { mines }
    }
}

impl MineGenerator for PresetGenerator {
    /// `mines` must equal the number of preset coordinates.
    fn generate(&mut self, board: &mut Board, mines: CellCount) -> Result<()> {
        check_mine_count(board, mines)?;
        if self.mines.len() != usize::from(mines) {
            return Err(GameError::MineCountMismatch);
        }
        for &coords in &self.mines {
            board.validate_coords(coords)?;
        }

        board.clear();
        for &coords in &self.mines {
            board[coords].mine = true;
        }
        board.finish_generation();
        verify_count(board, mines);
        Ok(())
    }
}
