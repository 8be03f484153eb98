use thiserror::Error;

use crate::parchis::{PieceId, TeamColor};

/// A rejected rule operation. The state is left untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("piece {piece} is not one of the eligible pieces")]
    InvalidSelection { piece: PieceId },
    #[error("piece {piece} is not on a track")]
    NotMovable { piece: PieceId },
    #[error("team {team} has no piece in jail")]
    JailEmpty { team: TeamColor },
    #[error("cell {cell} is not on the track")]
    OffTrack { cell: u8 },
    #[error("cell {cell} is blocked")]
    BlockedDestination { cell: u8 },
    #[error("cell {cell} is safe, no capture allowed")]
    SafeCellProtection { cell: u8 },
    #[error("piece {piece} cannot move {steps} steps, it would pass home")]
    Overshoot { piece: PieceId, steps: u32 },
}
