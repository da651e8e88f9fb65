use rand::prelude::*;

use super::*;

/// Uniformly random placement.
///
/// Sparse boards use rejection sampling over cell indices. Once more than half of the board would be mined the
/// generator shuffles all indices instead, so dense layouts never spin on repeated collisions.
#[derive(Clone, Debug)]
pub struct RandomGenerator {
    rng: SmallRng,
}

impl RandomGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    fn place_by_rejection(&mut self, board: &mut Board, mines: CellCount) {
        let size = board.size();
        let total = usize::from(board.total_cells());
        let mut placed = 0;
        while placed < mines {
            let coords = from_flat_index(self.rng.random_range(0..total), size);
            if !board[coords].mine {
                board[coords].mine = true;
                placed += 1;
            }
        }
    }

    fn place_by_shuffle(&mut self, board: &mut Board, mines: CellCount) {
        let size = board.size();
        let mut indices: Vec<usize> = (0..usize::from(board.total_cells())).collect();
        indices.shuffle(&mut self.rng);
        for &index in &indices[..usize::from(mines)] {
            board[from_flat_index(index, size)].mine = true;
        }
    }
}

impl MineGenerator for RandomGenerator {
    fn generate(&mut self, board: &mut Board, mines: CellCount) -> Result<()> {
        check_mine_count(board, mines)?;
        board.clear();

        if mines.saturating_mul(2) <= board.total_cells() {
            self.place_by_rejection(board, mines);
        } else {
            log::debug!(
                "Dense board ({} of {} cells), placing mines by shuffle",
                mines,
                board.total_cells()
            );
            self.place_by_shuffle(board, mines);
        }

        board.finish_generation();
        verify_count(board, mines);
        Ok(())
    }
}
