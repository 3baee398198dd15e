use ndarray::Array2;

use super::*;

/// Uniform placement of exactly `config.mines` distinct mines.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Board> {
        use rand::prelude::*;

        config.validate()?;

        let mut mines: Array2<bool> = Array2::default(square(config.size));
        let mut free_cells = config.total_cells();
        let mut mines_placed: CellCount = 0;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        {
            let cells = mines.as_slice_mut().expect("layout should be standard");
            while mines_placed < config.mines {
                // pick the n-th cell that is still free, so no draw is ever wasted on a mine
                let mut place: CellCount = rng.random_range(0..free_cells);
                for cell in cells.iter_mut() {
                    if *cell {
                        continue;
                    }
                    if place == 0 {
                        *cell = true;
                        mines_placed += 1;
                        free_cells -= 1;
                        break;
                    }
                    place -= 1;
                }
            }
        }

        let board = Board::from_mine_mask(&mines);
        log::debug!(
            "Generated {}x{} board with {} mines (seed {})",
            config.size,
            config.size,
            board.mine_count(),
            self.seed
        );
        Ok(board)
    }
}
