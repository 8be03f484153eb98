use std::collections::VecDeque;

use crate::parchis::{PieceId, TeamColor};

/// Optional moves offered to the player during a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    LeaveJail,
    /// Move another piece with the die that was not used to leave jail.
    MoveOther { steps: u8 },
}

/// Supplies every decision the engine cannot take alone. Calls block until an
/// answer is available. `None` stands for an answer that could not be understood.
pub trait DecisionProvider {
    fn confirm_roll(&mut self, team: TeamColor) -> bool;

    fn accept(&mut self, team: TeamColor, offer: Offer) -> bool;

    /// Number of the piece to move, among `movable`.
    fn choose_piece(&mut self, team: TeamColor, movable: &[PieceId]) -> Option<u8>;

    /// Bonus steps to spend, at most `remaining`.
    fn choose_bonus_steps(&mut self, team: TeamColor, remaining: u32) -> Option<u32>;
}

/// Answers from prepared queues. Once a queue is empty it declines: no roll,
/// no offer taken, no piece, no steps.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisions {
    rolls: VecDeque<bool>,
    offers: VecDeque<bool>,
    pieces: VecDeque<Option<u8>>,
    steps: VecDeque<Option<u32>>,
}

impl ScriptedDecisions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rolls(mut self, answers: impl IntoIterator<Item = bool>) -> Self {
        self.rolls.extend(answers);
        self
    }

    pub fn offers(mut self, answers: impl IntoIterator<Item = bool>) -> Self {
        self.offers.extend(answers);
        self
    }

    pub fn pieces(mut self, answers: impl IntoIterator<Item = Option<u8>>) -> Self {
        self.pieces.extend(answers);
        self
    }

    pub fn steps(mut self, answers: impl IntoIterator<Item = Option<u32>>) -> Self {
        self.steps.extend(answers);
        self
    }

    /// True when every prepared answer has been used.
    pub fn is_exhausted(&self) -> bool {
        self.rolls.is_empty() && self.offers.is_empty() && self.pieces.is_empty() && self.steps.is_empty()
    }
}

impl DecisionProvider for ScriptedDecisions {
    fn confirm_roll(&mut self, _team: TeamColor) -> bool {
        self.rolls.pop_front().unwrap_or(false)
    }

    fn accept(&mut self, _team: TeamColor, _offer: Offer) -> bool {
        self.offers.pop_front().unwrap_or(false)
    }

    fn choose_piece(&mut self, _team: TeamColor, _movable: &[PieceId]) -> Option<u8> {
        self.pieces.pop_front().flatten()
    }

    fn choose_bonus_steps(&mut self, _team: TeamColor, _remaining: u32) -> Option<u32> {
        self.steps.pop_front().flatten()
    }
}
