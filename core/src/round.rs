use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - AwaitingMove -> AwaitingMove
/// - AwaitingMove -> Hit
/// - AwaitingMove -> Won
/// - AwaitingMove -> QuitRequested
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    #[default]
    AwaitingMove,
    Hit,
    Won,
    QuitRequested,
}

impl RoundState {
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::AwaitingMove)
    }
}

/// A move that touches the board, already resolved to coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Reveal(Coord2),
    Flag(Coord2),
    ToggleRevealAll,
    Quit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurnEvent {
    Flagged(Coord2),
    Unflagged(Coord2),
    Revealed { count: CellCount },
    Chorded { count: CellCount },
    ChordBlocked { flagged: u8, needed: u8 },
    RevealToggled(bool),
    HitMine(Coord2),
    Won,
    Quit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub event: TurnEvent,
    pub state: RoundState,
}

/// One playthrough: a grid plus the state machine that decides how moves affect it.
#[derive(Clone, Debug, PartialEq)]
pub struct Round {
    grid: Grid,
    state: RoundState,
}

impl Round {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            state: Default::default(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    /// Display counter only, mines placed minus flags placed. Can go negative.
    pub fn mines_remaining(&self) -> i64 {
        i64::from(self.grid.mine_count()) - i64::from(self.grid.flag_count())
    }

    pub fn render(&self) -> alloc::string::String {
        self.grid.render(self.mines_remaining())
    }

    /// Apply one move. Rejected moves leave both grid and state untouched.
    pub fn play(&mut self, action: Action) -> Result<MoveOutcome> {
        use TurnEvent::*;

        self.check_awaiting()?;

        let event = match action {
            Action::Quit => {
                log::debug!("Quit requested");
                return Ok(self.finish(RoundState::QuitRequested, Quit));
            }
            Action::Flag(coords) => {
                let coords = self.grid.validate_coords(coords)?;
                if self.grid.cell_at(coords).is_revealed() {
                    log::debug!("Tried to flag revealed cell {:?}", coords);
                    return Err(GameError::FlagOnRevealed);
                }
                match self.grid.flag(coords)? {
                    FlagOutcome::Flagged => Flagged(coords),
                    FlagOutcome::Unflagged => Unflagged(coords),
                    FlagOutcome::NoChange => return Err(GameError::FlagOnRevealed),
                }
            }
            Action::Reveal(coords) => {
                let coords = self.grid.validate_coords(coords)?;
                let cell = self.grid.cell_at(coords);
                log::debug!(
                    "Move {}: mine {} | revealed {} | flagged {}",
                    self.grid.label(coords),
                    cell.is_mine(),
                    cell.is_revealed(),
                    cell.is_flagged()
                );
                if cell.is_flagged() {
                    return Err(GameError::CheckFlagged);
                }
                if cell.is_mine() {
                    return Ok(self.lose(coords));
                }
                if cell.is_revealed() {
                    match self.grid.reveal_chord(coords)? {
                        ChordOutcome::Blocked { flagged, needed } => {
                            ChordBlocked { flagged, needed }
                        }
                        ChordOutcome::Revealed(count) => Chorded { count },
                        ChordOutcome::HitMine(mine) => return Ok(self.lose(mine)),
                    }
                } else {
                    Revealed {
                        count: self.grid.reveal_cluster(coords)?,
                    }
                }
            }
            Action::ToggleRevealAll => RevealToggled(self.grid.toggle_reveal_all()),
        };

        if self.grid.check_win() {
            log::debug!("Win condition met");
            return Ok(self.finish(RoundState::Won, Won));
        }
        Ok(MoveOutcome {
            event,
            state: self.state,
        })
    }

    fn lose(&mut self, mine: Coord2) -> MoveOutcome {
        log::debug!("Hit mine at {}", self.grid.label(mine));
        self.grid.reveal_all();
        self.finish(RoundState::Hit, TurnEvent::HitMine(mine))
    }

    fn finish(&mut self, state: RoundState, event: TurnEvent) -> MoveOutcome {
        self.state = state;
        MoveOutcome { event, state }
    }

    fn check_awaiting(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
