use parking_lot::Mutex;

use crate::{
    layout::{self, GridPos},
    parchis::{Dice, GameOutcome, GameState, PieceState, TeamColor},
};

/// A piece as the board window draws it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub position: GridPos,
    pub team: TeamColor,
    pub label: String,
    pub state: PieceState,
}

/// Copy of everything the board window shows. Built while holding the state
/// lock and used after releasing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub tokens: Vec<Token>,
    pub active_team: TeamColor,
    pub last_roll: Option<Dice>,
    pub bonus: Vec<(TeamColor, u32)>,
    pub home: Vec<(TeamColor, usize)>,
    pub outcome: GameOutcome,
}

impl Snapshot {
    pub fn from_state(state: &GameState) -> Self {
        let tokens = state
            .teams()
            .flat_map(|team| team.pieces())
            .map(|piece| Token {
                position: layout::position(piece.team(), piece.number(), piece.state()),
                team: piece.team(),
                label: piece.id().to_string(),
                state: piece.state(),
            })
            .collect();

        Snapshot {
            tokens,
            active_team: state.active_team(),
            last_roll: state.last_roll(),
            bonus: TeamColor::ALL
                .into_iter()
                .map(|c| (c, state.bonus(c)))
                .filter(|(_, steps)| *steps > 0)
                .collect(),
            home: state.teams().map(|t| (t.color(), t.home().len())).collect(),
            outcome: state.outcome(),
        }
    }

    pub fn capture(shared: &Mutex<GameState>) -> Self {
        let state = shared.lock();
        Self::from_state(&state)
    }
}
