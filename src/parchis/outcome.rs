use crate::parchis::{PieceId, TeamColor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Won(TeamColor),
    Ongoing,
}

/// What a successful move did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { from: u8, to: u8 },
    Captured { from: u8, to: u8, captured: Vec<PieceId> },
    EnteredInternal { slot: u8 },
    Advanced { from: u8, to: u8 },
    Home,
}

/// Effect of a roll on the consecutive doubles counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollEffect {
    Normal,
    Double,
    /// Third double in a row: the team is penalised instead of playing.
    Penalty,
}
