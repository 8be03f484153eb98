use std::fmt;

use crate::parchis::TeamColor;

/// Identity of a piece: its team plus a number in `0..4`.
/// The board stores these instead of the pieces themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceId {
    pub team: TeamColor,
    pub number: u8,
}

impl PieceId {
    pub fn new(team: TeamColor, number: u8) -> Self {
        PieceId { team, number }
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.team.letter(), self.number)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceState {
    Jailed,
    /// Outer track cell in `1..=68`.
    OnTrack(u8),
    /// Slot on the team's private track in `0..7`.
    OnInternalTrack(u8),
    Home,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    id: PieceId,
    state: PieceState,
}

impl Piece {
    pub fn new(team: TeamColor, number: u8) -> Self {
        Piece {
            id: PieceId::new(team, number),
            state: PieceState::Jailed,
        }
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn team(&self) -> TeamColor {
        self.id.team
    }

    pub fn number(&self) -> u8 {
        self.id.number
    }

    pub fn state(&self) -> PieceState {
        self.state
    }

    pub fn is_jailed(&self) -> bool {
        self.state == PieceState::Jailed
    }

    pub fn is_home(&self) -> bool {
        self.state == PieceState::Home
    }

    /// Pieces on the outer or internal track can be moved by dice or bonus steps.
    pub fn is_movable(&self) -> bool {
        matches!(self.state, PieceState::OnTrack(_) | PieceState::OnInternalTrack(_))
    }

    pub(crate) fn set_state(&mut self, state: PieceState) {
        self.state = state;
    }
}
