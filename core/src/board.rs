use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a cell holds, fixed once the board is generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Content {
    Mine,
    Adjacent(u8),
}

impl Content {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Adjacent(0))
    }
}

impl Default for Content {
    fn default() -> Self {
        Self::Adjacent(0)
    }
}

/// Square mine layout together with the adjacency count of every safe cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    contents: Array2<Content>,
    mine_count: CellCount,
}

impl Board {
    /// Builds the board from a square mask, deriving every adjacency count.
    pub(crate) fn from_mine_mask(mine_mask: &Array2<bool>) -> Self {
        let mut mine_count: CellCount = 0;
        let contents = Array2::from_shape_fn(mine_mask.dim(), |(x, y)| {
            if mine_mask[(x, y)] {
                mine_count += 1;
                return Content::Mine;
            }
            // the mask is square and bounded by `Coord::MAX`, see `square`
            let coords = (x as Coord, y as Coord);
            let adjacent = mine_mask
                .iter_neighbors(coords)
                .filter(|&pos| mine_mask[pos.to_nd_index()])
                .count();
            Content::Adjacent(adjacent as u8)
        });

        Self {
            contents,
            mine_count,
        }
    }

    /// Fixed layout, mostly for tests and scripted play. Repeated coordinates count once.
    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        if size == 0 {
            return Err(ConfigError::EmptyBoard.into());
        }

        let mut mine_mask: Array2<bool> = Array2::default(square(size));
        for &coords in mine_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::OutOfBoundsAction);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(&mine_mask))
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::OutOfBoundsAction)
        }
    }

    pub fn size(&self) -> Coord {
        let (rows, _) = self.contents.dim();
        Coord::try_from(rows).unwrap_or(Coord::MAX)
    }

    pub fn total_cells(&self) -> CellCount {
        area(self.size())
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn content(&self, coords: Coord2) -> Content {
        self[coords]
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords].is_mine()
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.contents.iter_neighbors(coords)
    }

    /// All cell contents in row-major order of the underlying array.
    pub fn contents(&self) -> impl Iterator<Item = Content> + '_ {
        self.contents.iter().copied()
    }
}

impl Index<Coord2> for Board {
    type Output = Content;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.contents[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_follow_single_corner_mine() {
        let board = Board::from_mine_coords(3, &[(2, 2)]).unwrap();

        assert_eq!(board.mine_count(), 1);
        assert_eq!(board.safe_cell_count(), 8);
        assert_eq!(board[(2, 2)], Content::Mine);
        assert_eq!(board[(1, 1)], Content::Adjacent(1));
        assert_eq!(board[(2, 1)], Content::Adjacent(1));
        assert_eq!(board[(1, 2)], Content::Adjacent(1));
        assert_eq!(board[(0, 0)], Content::Adjacent(0));
        assert_eq!(board[(0, 2)], Content::Adjacent(0));
    }

    #[test]
    fn center_cell_surrounded_by_mines_counts_eight() {
        let mines = [
            (0, 0),
            (1, 0),
            (2, 0),
            (0, 1),
            (2, 1),
            (0, 2),
            (1, 2),
            (2, 2),
        ];
        let board = Board::from_mine_coords(3, &mines).unwrap();

        assert_eq!(board[(1, 1)], Content::Adjacent(8));
        assert_eq!(board.safe_cell_count(), 1);
    }

    #[test]
    fn counts_do_not_wrap_around_edges() {
        let board = Board::from_mine_coords(4, &[(0, 1)]).unwrap();

        assert_eq!(board[(3, 1)], Content::Adjacent(0));
        assert_eq!(board[(3, 0)], Content::Adjacent(0));
        assert_eq!(board[(1, 1)], Content::Adjacent(1));
    }

    #[test]
    fn repeated_mine_coords_count_once() {
        let board = Board::from_mine_coords(2, &[(1, 1), (1, 1)]).unwrap();

        assert_eq!(board.mine_count(), 1);
    }

    #[test]
    fn rejects_mine_outside_board() {
        assert_eq!(
            Board::from_mine_coords(3, &[(3, 0)]),
            Err(GameError::OutOfBoundsAction)
        );
    }

    #[test]
    fn validate_coords_checks_both_axes() {
        let board = Board::from_mine_coords(2, &[]).unwrap();

        assert_eq!(board.validate_coords((1, 1)), Ok((1, 1)));
        assert_eq!(board.validate_coords((2, 0)), Err(GameError::OutOfBoundsAction));
        assert_eq!(board.validate_coords((0, 2)), Err(GameError::OutOfBoundsAction));
    }
}
