use core::time::Duration;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// One frame worth of polled input.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub left_down: bool,
    pub right_down: bool,
    pub cursor_pixel: (i32, i32),
}

impl InputSnapshot {
    pub const fn idle(cursor_pixel: (i32, i32)) -> Self {
        Self {
            left_down: false,
            right_down: false,
            cursor_pixel,
        }
    }

    pub const fn left(cursor_pixel: (i32, i32)) -> Self {
        Self {
            left_down: true,
            right_down: false,
            cursor_pixel,
        }
    }

    pub const fn right(cursor_pixel: (i32, i32)) -> Self {
        Self {
            left_down: false,
            right_down: true,
            cursor_pixel,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Button {
    Left,
    Right,
}

/// Discrete player action on a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Reveal(Coord2),
    ToggleFlag(Coord2),
}

impl Action {
    pub const fn coords(self) -> Coord2 {
        match self {
            Self::Reveal(coords) | Self::ToggleFlag(coords) => coords,
        }
    }

    const fn from_button(button: Button, coords: Coord2) -> Self {
        match button {
            Button::Left => Self::Reveal(coords),
            Button::Right => Self::ToggleFlag(coords),
        }
    }
}

/// Maps cursor pixels to cells of a square board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellMapping {
    pub cell_pixels: u32,
    pub size: Coord,
}

impl CellMapping {
    pub const fn new(cell_pixels: u32, size: Coord) -> Self {
        Self { cell_pixels, size }
    }

    pub fn cell_at(&self, (px, py): (i32, i32)) -> Option<Coord2> {
        if self.cell_pixels == 0 {
            return None;
        }
        let x = u32::try_from(px).ok()? / self.cell_pixels;
        let y = u32::try_from(py).ok()? / self.cell_pixels;
        let size = u32::from(self.size);
        if x >= size || y >= size {
            return None;
        }
        Some((x as Coord, y as Coord))
    }

    /// Pixel at the middle of `coords`, the inverse of [`CellMapping::cell_at`].
    pub fn center_of(&self, (x, y): Coord2) -> (i32, i32) {
        let half = self.cell_pixels / 2;
        let to_pixel = |c: Coord| {
            let pixel = u32::from(c).saturating_mul(self.cell_pixels).saturating_add(half);
            i32::try_from(pixel).unwrap_or(i32::MAX)
        };
        (to_pixel(x), to_pixel(y))
    }
}

/// Per-button edge state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonPhase {
    #[default]
    Idle,
    /// Went down this frame.
    Pressed,
    /// Still down since an earlier frame, suppressed.
    Held,
}

impl ButtonPhase {
    fn step(self, down: bool) -> Self {
        match (self, down) {
            (_, false) => Self::Idle,
            (Self::Idle, true) => Self::Pressed,
            (Self::Pressed | Self::Held, true) => Self::Held,
        }
    }
}

/// Turns continuously polled buttons into at most one action per press.
///
/// An action is accepted on the frame a button goes down, provided `cooldown` has passed since the last accepted
/// action of either button. A press that arrives during the cooldown, or while the cursor is off the board, is dropped
/// and the button stays suppressed until released.
#[derive(Clone, Debug)]
pub struct Debouncer {
    mapping: CellMapping,
    cooldown: Duration,
    left: ButtonPhase,
    right: ButtonPhase,
    last_accepted: Option<Instant>,
}

impl Debouncer {
    pub fn new(mapping: CellMapping, cooldown: Duration) -> Self {
        Self {
            mapping,
            cooldown,
            left: ButtonPhase::Idle,
            right: ButtonPhase::Idle,
            last_accepted: None,
        }
    }

    pub fn mapping(&self) -> CellMapping {
        self.mapping
    }

    pub fn phase(&self, button: Button) -> ButtonPhase {
        match button {
            Button::Left => self.left,
            Button::Right => self.right,
        }
    }

    pub fn poll(&mut self, input: &InputSnapshot, now: Instant) -> Option<Action> {
        self.left = self.left.step(input.left_down);
        self.right = self.right.step(input.right_down);

        // left has priority when both buttons go down on the same frame
        let button = match (self.left, self.right) {
            (ButtonPhase::Pressed, _) => Button::Left,
            (_, ButtonPhase::Pressed) => Button::Right,
            _ => return None,
        };

        if !self.cooled_down(now) {
            log::trace!("Dropped {:?} press inside cooldown", button);
            return None;
        }

        let Some(coords) = self.mapping.cell_at(input.cursor_pixel) else {
            log::trace!(
                "Dropped {:?} press outside the board at {:?}",
                button,
                input.cursor_pixel
            );
            return None;
        };

        self.last_accepted = Some(now);
        let action = Action::from_button(button, coords);
        log::debug!("Accepted {:?}", action);
        Some(action)
    }

    fn cooled_down(&self, now: Instant) -> bool {
        self.last_accepted
            .is_none_or(|last| now.saturating_duration_since(last) >= self.cooldown)
    }
}
