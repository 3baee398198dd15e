#![no_std]

extern crate alloc;

use core::time::Duration;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use debounce::*;
pub use error::*;
pub use generator::*;
pub use reveal::*;
pub use session::*;
pub use types::*;
pub use view::*;
pub use visibility::*;

mod board;
mod debounce;
mod error;
mod generator;
mod reveal;
mod session;
mod types;
mod view;
mod visibility;

/// Side length used when the caller does not pick one.
pub const DEFAULT_SIZE: Coord = 10;

pub const DEFAULT_MINES: CellCount = 10;

/// Width and height of one cell on screen, in pixels.
pub const CELL_PIXELS: u32 = 32;

pub const TARGET_FPS: u32 = 60;

/// Minimum time between two accepted clicks.
pub const CLICK_COOLDOWN: Duration = Duration::from_millis(100);

/// How long the final board stays on screen after a win or loss.
pub const TERMINAL_HOLD: Duration = Duration::from_secs(2);

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Validates that the board is non-empty and leaves at least one safe cell.
    pub fn new(size: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(ConfigError::EmptyBoard.into());
        }

        let cells = self.total_cells();
        if self.mines >= cells {
            return Err(ConfigError::TooManyMines {
                mines: self.mines,
                cells,
            }
            .into());
        }

        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.size)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_SIZE, DEFAULT_MINES)
    }
}

/// Tuning for the parts of a session that depend on the screen and the clock.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSettings {
    pub cell_pixels: u32,
    pub cooldown: Duration,
    pub terminal_hold: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            cell_pixels: CELL_PIXELS,
            cooldown: CLICK_COOLDOWN,
            terminal_hold: TERMINAL_HOLD,
        }
    }
}

/// Outcome of a flag or a single-cell visibility change.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}
