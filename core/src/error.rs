use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must be at least 1 by 1")]
    InvalidSize,
    #[error("Board needs at least one mine")]
    NoMines,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Invalid input. Width cannot be less than {min} or exceed {max}.")]
    WidthOutOfRange { min: Coord, max: Coord },
    #[error("Invalid input. Height cannot be less than {min} or exceed {max}.")]
    HeightOutOfRange { min: Coord, max: Coord },
    #[error("Invalid input. Number of mines cannot exceed {max} or be less than 1.")]
    MinesOutOfRange { max: CellCount },
    #[error("Invalid input. Please enter a valid move.")]
    InvalidMove,
    #[error("Invalid input. Please enter a valid difficulty level.")]
    InvalidDifficulty,
    #[error("You can't flag a revealed cell.")]
    FlagOnRevealed,
    #[error("Cell is flagged. Remove the flag first.")]
    CheckFlagged,
    #[error("Cell is not revealed")]
    NotRevealed,
    #[error("Flood reveal started on a mine")]
    UnexpectedMine,
    #[error("Round already ended, no new moves are accepted")]
    AlreadyEnded,
}

impl GameError {
    /// Illegal-but-harmless player input: report it and keep the round going.
    pub const fn is_rejection(self) -> bool {
        use GameError::*;
        matches!(
            self,
            InvalidMove
                | InvalidDifficulty
                | FlagOnRevealed
                | CheckFlagged
                | WidthOutOfRange { .. }
                | HeightOutOfRange { .. }
                | MinesOutOfRange { .. }
        )
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
