pub mod board;
pub use board::{Board, CELL_CAPACITY, SAFE_CELLS, TRACK_LENGTH};

mod color;
pub use color::TeamColor;

mod piece;
pub use piece::{Piece, PieceId, PieceState};

mod team;
pub use team::{Team, ARRIVAL_SLOT, INTERNAL_TRACK_LENGTH, PIECES_PER_TEAM};

mod dice;
pub use dice::{Dice, FixedDice, RandomDice, Roll, JAIL_EXIT_VALUE};

mod outcome;
pub use outcome::{GameOutcome, MoveOutcome, RollEffect};

mod error;
pub use error::MoveError;

mod state;
pub use state::{GameState, CAPTURE_BONUS, HOME_BONUS, MAX_DOUBLES};

mod decision;
pub use decision::{DecisionProvider, Offer, ScriptedDecisions};

mod game;
pub use game::{Game, Notify, Silent};
