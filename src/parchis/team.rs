use crate::parchis::{Piece, PieceId, PieceState, TeamColor};

pub const PIECES_PER_TEAM: usize = 4;

/// Number of slots on a team's private track. The last slot is the arrival,
/// a piece reaching it goes home.
pub const INTERNAL_TRACK_LENGTH: u8 = 8;
pub const ARRIVAL_SLOT: u8 = INTERNAL_TRACK_LENGTH - 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    color: TeamColor,
    pieces: [Piece; PIECES_PER_TEAM],
    home: Vec<PieceId>,
}

impl Team {
    pub fn new(color: TeamColor) -> Self {
        Team {
            color,
            pieces: std::array::from_fn(|i| Piece::new(color, i as u8)),
            home: Vec::with_capacity(PIECES_PER_TEAM),
        }
    }

    pub fn color(&self) -> TeamColor {
        self.color
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece(&self, number: u8) -> Option<&Piece> {
        self.pieces.get(number as usize)
    }

    pub(crate) fn piece_mut(&mut self, number: u8) -> Option<&mut Piece> {
        self.pieces.get_mut(number as usize)
    }

    fn ids_where(&self, pred: impl Fn(&Piece) -> bool) -> Vec<PieceId> {
        self.pieces.iter().filter(|p| pred(p)).map(Piece::id).collect()
    }

    pub fn jailed(&self) -> Vec<PieceId> {
        self.ids_where(Piece::is_jailed)
    }

    pub fn on_track(&self) -> Vec<PieceId> {
        self.ids_where(|p| matches!(p.state(), PieceState::OnTrack(_)))
    }

    pub fn internal(&self) -> Vec<PieceId> {
        self.ids_where(|p| matches!(p.state(), PieceState::OnInternalTrack(_)))
    }

    /// Pieces that can take steps: those on the outer track first, then those on the internal track.
    pub fn movable(&self) -> Vec<PieceId> {
        let mut movable = self.on_track();
        movable.extend(self.internal());
        movable
    }

    /// Pieces in an internal slot. Pieces of the same team may share a slot.
    pub fn internal_occupants(&self, slot: u8) -> Vec<PieceId> {
        self.ids_where(|p| p.state() == PieceState::OnInternalTrack(slot))
    }

    /// Pieces that reached home, in arrival order.
    pub fn home(&self) -> &[PieceId] {
        &self.home
    }

    pub fn has_won(&self) -> bool {
        self.home.len() == PIECES_PER_TEAM
    }

    /// Marks a piece as home and records its arrival. Board bookkeeping is the caller's job.
    pub(crate) fn send_home(&mut self, number: u8) -> bool {
        let Some(piece) = self.piece_mut(number) else {
            return false;
        };
        if piece.is_home() {
            return false;
        }
        piece.set_state(PieceState::Home);
        let id = piece.id();
        self.home.push(id);
        true
    }
}
