use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Hidden,
    Revealed,
    Flagged,
}

impl Visibility {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::Hidden
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisibilityMap {
    cells: Array2<Visibility>,
    revealed_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
}

impl VisibilityMap {
    pub fn new(size: Coord) -> Self {
        Self {
            cells: Array2::default(square(size)),
            revealed_count: Saturating(0),
            flagged_count: Saturating(0),
        }
    }

    pub fn size(&self) -> Coord {
        let (rows, _) = self.cells.dim();
        Coord::try_from(rows).unwrap_or(Coord::MAX)
    }

    pub fn get(&self, coords: Coord2) -> Result<Visibility> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count.0
    }

    /// Reveals a hidden or flagged cell. Already revealed cells are left alone.
    pub fn reveal(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        Ok(self.reveal_unchecked(coords))
    }

    /// Cycles `Hidden` and `Flagged`. Revealed cells cannot be flagged.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use MarkOutcome::*;
        use Visibility::*;

        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];

        Ok(match *cell {
            Hidden => {
                *cell = Flagged;
                self.flagged_count += 1;
                Changed
            }
            Flagged => {
                *cell = Hidden;
                self.flagged_count -= 1;
                Changed
            }
            Revealed => NoChange,
        })
    }

    pub fn reveal_all(&mut self) {
        let size = self.size();
        for x in 0..size {
            for y in 0..size {
                self.reveal_unchecked((x, y));
            }
        }
    }

    /// Whether every safe cell of `board` is revealed. Flags never count as cleared.
    pub fn is_fully_cleared(&self, board: &Board) -> bool {
        board
            .contents()
            .zip(self.cells.iter())
            .all(|(content, &visibility)| content.is_mine() || visibility == Visibility::Revealed)
    }

    pub(crate) fn reveal_unchecked(&mut self, coords: Coord2) -> MarkOutcome {
        let cell = &mut self.cells[coords.to_nd_index()];
        match *cell {
            Visibility::Revealed => MarkOutcome::NoChange,
            previous => {
                if previous == Visibility::Flagged {
                    self.flagged_count -= 1;
                }
                *cell = Visibility::Revealed;
                self.revealed_count += 1;
                MarkOutcome::Changed
            }
        }
    }

    pub(crate) fn at(&self, coords: Coord2) -> Visibility {
        self.cells[coords.to_nd_index()]
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::OutOfBoundsAction)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_hidden() {
        let map = VisibilityMap::new(3);

        assert_eq!(map.get((2, 2)), Ok(Visibility::Hidden));
        assert_eq!(map.revealed_count(), 0);
        assert_eq!(map.flagged_count(), 0);
    }

    #[test]
    fn toggle_flag_cycles_hidden_and_flagged() {
        let mut map = VisibilityMap::new(2);

        assert_eq!(map.toggle_flag((0, 1)), Ok(MarkOutcome::Changed));
        assert_eq!(map.get((0, 1)), Ok(Visibility::Flagged));
        assert_eq!(map.flagged_count(), 1);

        assert_eq!(map.toggle_flag((0, 1)), Ok(MarkOutcome::Changed));
        assert_eq!(map.get((0, 1)), Ok(Visibility::Hidden));
        assert_eq!(map.flagged_count(), 0);
    }

    #[test]
    fn revealed_cells_ignore_reveal_and_flag() {
        let mut map = VisibilityMap::new(2);

        assert_eq!(map.reveal((1, 0)), Ok(MarkOutcome::Changed));
        assert_eq!(map.reveal((1, 0)), Ok(MarkOutcome::NoChange));
        assert_eq!(map.toggle_flag((1, 0)), Ok(MarkOutcome::NoChange));
        assert_eq!(map.get((1, 0)), Ok(Visibility::Revealed));
        assert_eq!(map.revealed_count(), 1);
    }

    #[test]
    fn revealing_flagged_cell_drops_flag() {
        let mut map = VisibilityMap::new(2);
        map.toggle_flag((0, 0)).unwrap();

        assert_eq!(map.reveal((0, 0)), Ok(MarkOutcome::Changed));
        assert_eq!(map.flagged_count(), 0);
        assert_eq!(map.revealed_count(), 1);
    }

    #[test]
    fn rejects_out_of_bounds() {
        let mut map = VisibilityMap::new(2);

        assert_eq!(map.reveal((2, 0)), Err(GameError::OutOfBoundsAction));
        assert_eq!(map.toggle_flag((0, 5)), Err(GameError::OutOfBoundsAction));
        assert_eq!(map.get((9, 9)), Err(GameError::OutOfBoundsAction));
    }

    #[test]
    fn reveal_all_reveals_every_cell() {
        let mut map = VisibilityMap::new(3);
        map.toggle_flag((1, 1)).unwrap();
        map.reveal((0, 0)).unwrap();

        map.reveal_all();

        assert_eq!(map.revealed_count(), 9);
        assert_eq!(map.flagged_count(), 0);
    }

    #[test]
    fn flagged_mine_does_not_clear_board() {
        let board = Board::from_mine_coords(2, &[(0, 0)]).unwrap();
        let mut map = VisibilityMap::new(2);

        map.reveal((1, 0)).unwrap();
        map.reveal((0, 1)).unwrap();
        map.toggle_flag((0, 0)).unwrap();
        assert!(!map.is_fully_cleared(&board));

        map.reveal((1, 1)).unwrap();
        assert!(map.is_fully_cleared(&board));
    }

    #[test]
    fn flagging_every_safe_cell_is_not_clearing() {
        let board = Board::from_mine_coords(2, &[(0, 0)]).unwrap();
        let mut map = VisibilityMap::new(2);

        map.toggle_flag((1, 0)).unwrap();
        map.toggle_flag((0, 1)).unwrap();
        map.toggle_flag((1, 1)).unwrap();

        assert!(!map.is_fully_cleared(&board));
    }
}
