use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a renderer needs to pick a sprite for one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    RevealedEmpty,
    RevealedCount(u8),
    Flagged,
    RevealedMine,
}

impl CellView {
    pub const fn new(content: Content, visibility: Visibility) -> Self {
        match (visibility, content) {
            (Visibility::Hidden, _) => Self::Hidden,
            (Visibility::Flagged, _) => Self::Flagged,
            (Visibility::Revealed, Content::Mine) => Self::RevealedMine,
            (Visibility::Revealed, Content::Adjacent(0)) => Self::RevealedEmpty,
            (Visibility::Revealed, Content::Adjacent(count)) => Self::RevealedCount(count),
        }
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}

/// Snapshot of a session handed to the renderer after every frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderState {
    pub size: Coord,
    pub cells: Array2<CellView>,
    pub status: SessionStatus,
    pub mines_left: isize,
    pub triggered_mine: Option<Coord2>,
    /// Set once the final board has been on screen for the terminal hold.
    pub session_over: bool,
}

impl RenderState {
    pub fn from_parts(board: &Board, visibility: &VisibilityMap, status: SessionStatus) -> Self {
        let size = board.size();
        let cells = Array2::from_shape_fn(square(size), |(x, y)| {
            let coords = (x as Coord, y as Coord);
            CellView::new(board[coords], visibility.at(coords))
        });

        Self {
            size,
            cells,
            status,
            mines_left: board.mine_count() as isize - visibility.flagged_count() as isize,
            triggered_mine: None,
            session_over: false,
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> CellView {
        self.cells[coords.to_nd_index()]
    }

    pub fn count(&self, view: CellView) -> usize {
        self.cells.iter().filter(|&&cell| cell == view).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_content_and_visibility() {
        let board = Board::from_mine_coords(3, &[(2, 2)]).unwrap();
        let mut visibility = VisibilityMap::new(3);
        visibility.reveal((0, 0)).unwrap();
        visibility.reveal((1, 1)).unwrap();
        visibility.reveal((2, 2)).unwrap();
        visibility.toggle_flag((0, 2)).unwrap();

        let state = RenderState::from_parts(&board, &visibility, SessionStatus::Running);

        assert_eq!(state.cell_at((0, 0)), CellView::RevealedEmpty);
        assert_eq!(state.cell_at((1, 1)), CellView::RevealedCount(1));
        assert_eq!(state.cell_at((2, 2)), CellView::RevealedMine);
        assert_eq!(state.cell_at((0, 2)), CellView::Flagged);
        assert_eq!(state.cell_at((2, 0)), CellView::Hidden);
        assert_eq!(state.count(CellView::Hidden), 5);
    }

    #[test]
    fn mines_left_can_go_negative() {
        let board = Board::from_mine_coords(3, &[(2, 2)]).unwrap();
        let mut visibility = VisibilityMap::new(3);
        visibility.toggle_flag((0, 0)).unwrap();
        visibility.toggle_flag((0, 1)).unwrap();

        let state = RenderState::from_parts(&board, &visibility, SessionStatus::Running);

        assert_eq!(state.mines_left, -1);
    }
}
