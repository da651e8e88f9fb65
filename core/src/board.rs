use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular grid of cells plus the number of mines it was generated with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    total_mines: CellCount,
}

impl Board {
    /// Creates an empty, mine-free board. Use a [`MineGenerator`] to populate it.
    pub fn new(size: Coord2) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self {
            cells: Array2::default(size.to_nd_index()),
            total_mines: 0,
        })
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut board = Self::new(size)?;
        for &coords in mine_coords {
            let coords = board.validate_coords(coords)?;
            board[coords].mine = true;
        }
        board.finish_generation();
        Ok(board)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        dim_to_coord2(self.cells.dim())
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn total_mines(&self) -> CellCount {
        self.total_mines
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.total_mines
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos].mine)
            .count() as u8
    }

    pub fn unrevealed_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_unrevealed()).count() as CellCount
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + use<> {
        neighbors(coords, self.size())
    }

    /// All cells in row-major order together with their coordinates.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn mine_coords(&self) -> Vec<Coord2> {
        self.iter_cells()
            .filter(|(_, cell)| cell.mine)
            .map(|(coords, _)| coords)
            .collect()
    }

    /// Clears every mine so a generator can start from a blank grid.
    pub(crate) fn clear(&mut self) {
        self.cells.fill(Cell::default());
        self.total_mines = 0;
    }

    /// Recounts mines and computes the neighbor count of every cell.
    pub(crate) fn finish_generation(&mut self) {
        let size = self.size();
        for (row, col) in (0..size.0).flat_map(|row| (0..size.1).map(move |col| (row, col))) {
            let count = self.adjacent_mine_count((row, col));
            self[(row, col)].adjacent_mines = count;
        }
        self.total_mines = self.cells.iter().filter(|cell| cell.mine).count() as CellCount;
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}
