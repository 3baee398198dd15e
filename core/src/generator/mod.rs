use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Board>;
}

/// Generates a random board for `size` and `mines`, reproducible through `seed`.
pub fn generate(size: Coord, mines: CellCount, seed: u64) -> Result<Board> {
    RandomBoardGenerator::new(seed).generate(GameConfig::new(size, mines)?)
}
