use std::fmt;
use sweeper_core::{CellView, RenderState, SessionStatus};

/// Text rendering of a [`RenderState`], one row per line.
pub struct Board<'a>(pub &'a RenderState);

impl fmt::Display for Board<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        writeln!(f, "mines left: {}  {}", state.mines_left, status_label(state.status))?;
        for y in 0..state.size {
            for x in 0..state.size {
                let glyph = match state.cell_at((x, y)) {
                    CellView::RevealedMine if state.triggered_mine == Some((x, y)) => 'X',
                    CellView::RevealedMine => '*',
                    CellView::Hidden => '#',
                    CellView::Flagged => 'F',
                    CellView::RevealedEmpty => '.',
                    CellView::RevealedCount(count) => char::from_digit(count.into(), 10).unwrap_or('?'),
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

pub fn status_label(status: SessionStatus) -> &'static str {
    match status {
        SessionStatus::Running => "running",
        SessionStatus::Won => "won",
        SessionStatus::Lost => "lost",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::{Action, Session, SessionSettings};
    use std::time::Instant;

    #[test]
    fn draws_lost_board_with_triggered_mine() {
        let board = sweeper_core::Board::from_mine_coords(3, &[(2, 2), (0, 2)]).unwrap();
        let mut session = Session::with_board(board, SessionSettings::default()).unwrap();
        let now = Instant::now();
        session.apply(Action::Reveal((2, 2)), now).unwrap();

        let text = Board(&session.render(now)).to_string();

        assert_eq!(text, "mines left: 2  lost\n...\n121\n*2X\n");
    }

    #[test]
    fn draws_hidden_and_flagged_cells() {
        let board = sweeper_core::Board::from_mine_coords(2, &[(1, 1)]).unwrap();
        let mut session = Session::with_board(board, SessionSettings::default()).unwrap();
        let now = Instant::now();
        session.apply(Action::ToggleFlag((1, 1)), now).unwrap();
        session.apply(Action::Reveal((0, 0)), now).unwrap();

        let text = Board(&session.render(now)).to_string();

        assert_eq!(text, "mines left: 0  running\n1#\n#F\n");
    }
}
