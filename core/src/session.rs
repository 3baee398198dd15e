use serde::{Deserialize, Serialize};
use web_time::{Instant, SystemTime};

use crate::*;

/// Valid transitions:
/// - Running -> Won
/// - Running -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Running,
    Won,
    Lost,
}

impl SessionStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for SessionStatus {
    fn default() -> Self {
        Self::Running
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ActionOutcome {
    NoChange,
    Changed,
    HitMine,
    Won,
}

impl ActionOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Starts a session on a random board seeded from the wall clock.
pub fn new_session(size: Coord, mines: CellCount) -> Result<Session> {
    let seed = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos() as u64);
    Session::with_seed(GameConfig::new(size, mines)?, seed, SessionSettings::default())
}

/// One game from the first frame to the end of the terminal hold.
#[derive(Clone, Debug)]
pub struct Session {
    board: Board,
    visibility: VisibilityMap,
    status: SessionStatus,
    debouncer: Debouncer,
    terminal_hold: core::time::Duration,
    ended_at: Option<Instant>,
    triggered_mine: Option<Coord2>,
}

impl Session {
    pub fn with_seed(config: GameConfig, seed: u64, settings: SessionSettings) -> Result<Self> {
        let board = RandomBoardGenerator::new(seed).generate(config)?;
        Self::with_board(board, settings)
    }

    pub fn with_board(board: Board, settings: SessionSettings) -> Result<Self> {
        board.game_config().validate()?;

        let size = board.size();
        let mapping = CellMapping::new(settings.cell_pixels, size);
        log::debug!(
            "New session on {}x{} board with {} mines",
            size,
            size,
            board.mine_count()
        );

        Ok(Self {
            board,
            visibility: VisibilityMap::new(size),
            status: SessionStatus::Running,
            debouncer: Debouncer::new(mapping, settings.cooldown),
            terminal_hold: settings.terminal_hold,
            ended_at: None,
            triggered_mine: None,
        })
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn visibility(&self) -> &VisibilityMap {
        &self.visibility
    }

    pub fn mapping(&self) -> CellMapping {
        self.debouncer.mapping()
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Whether the terminal hold has run out and the run loop should stop.
    pub fn is_over(&self, now: Instant) -> bool {
        self.ended_at
            .is_some_and(|ended_at| now.saturating_duration_since(ended_at) >= self.terminal_hold)
    }

    /// Advances the session by one frame of polled input.
    ///
    /// Input is ignored once the game is won or lost; the final board keeps being returned until the terminal hold
    /// elapses, at which point [`RenderState::session_over`] is set.
    pub fn handle_frame(&mut self, input: &InputSnapshot, now: Instant) -> RenderState {
        if !self.status.is_finished() {
            if let Some(action) = self.debouncer.poll(input, now) {
                // the debouncer only yields cells on the board
                if let Err(err) = self.apply(action, now) {
                    log::warn!("Ignored {:?}: {}", action, err);
                }
            }
        }

        self.render(now)
    }

    /// Applies one action directly, bypassing the debouncer.
    pub fn apply(&mut self, action: Action, now: Instant) -> Result<ActionOutcome> {
        let coords = self.board.validate_coords(action.coords())?;

        if self.status.is_finished() {
            return Ok(ActionOutcome::NoChange);
        }

        let outcome = match action {
            Action::Reveal(_) => self.reveal(coords),
            Action::ToggleFlag(_) => match self.visibility.toggle_flag(coords)? {
                MarkOutcome::Changed => ActionOutcome::Changed,
                MarkOutcome::NoChange => ActionOutcome::NoChange,
            },
        };

        let outcome = match outcome {
            ActionOutcome::HitMine => {
                self.end(SessionStatus::Lost, now);
                ActionOutcome::HitMine
            }
            _ if self.visibility.is_fully_cleared(&self.board) => {
                self.end(SessionStatus::Won, now);
                ActionOutcome::Won
            }
            outcome => outcome,
        };
        Ok(outcome)
    }

    pub fn render(&self, now: Instant) -> RenderState {
        let mut state = RenderState::from_parts(&self.board, &self.visibility, self.status);
        state.triggered_mine = self.triggered_mine;
        state.session_over = self.is_over(now);
        state
    }

    fn reveal(&mut self, coords: Coord2) -> ActionOutcome {
        if self.visibility.at(coords) != Visibility::Hidden {
            return ActionOutcome::NoChange;
        }

        match self.board[coords] {
            Content::Mine => {
                self.triggered_mine = Some(coords);
                ActionOutcome::HitMine
            }
            Content::Adjacent(0) => {
                match flood_reveal(coords, &self.board, &mut self.visibility) {
                    Ok(region) if !region.is_empty() => ActionOutcome::Changed,
                    _ => ActionOutcome::NoChange,
                }
            }
            Content::Adjacent(_) => match self.visibility.reveal_unchecked(coords) {
                MarkOutcome::Changed => ActionOutcome::Changed,
                MarkOutcome::NoChange => ActionOutcome::NoChange,
            },
        }
    }

    fn end(&mut self, status: SessionStatus, now: Instant) {
        if self.status.is_finished() {
            return;
        }

        self.status = status;
        self.ended_at = Some(now);
        self.visibility.reveal_all();
        log::debug!("Session ended: {:?}", status);
    }
}
