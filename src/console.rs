use std::io::{self, BufRead, StdinLock, Write};

use log::warn;

use crate::parchis::{DecisionProvider, Offer, PieceId, TeamColor};

/// Asks the players on the terminal. End of input or an unreadable answer counts as "no".
pub struct ConsoleDecisions<R> {
    input: R,
}

impl ConsoleDecisions<StdinLock<'static>> {
    pub fn stdin() -> Self {
        ConsoleDecisions::new(io::stdin().lock())
    }
}

impl<R: BufRead> ConsoleDecisions<R> {
    pub fn new(input: R) -> Self {
        ConsoleDecisions { input }
    }

    fn prompt(&mut self, message: &str) -> Option<String> {
        print!("{}", message);
        if let Err(err) = io::stdout().flush() {
            warn!("Could not show the prompt: {}", err);
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_owned()),
            Err(err) => {
                warn!("Could not read the answer: {}", err);
                None
            }
        }
    }

    fn yes_no(&mut self, message: &str) -> bool {
        self.prompt(message)
            .map(|answer| matches!(answer.to_lowercase().as_str(), "y" | "yes" | "s" | "si"))
            .unwrap_or(false)
    }

    pub fn turn_order(&mut self) -> String {
        self.prompt("Turn order (e.g. RBGY): ").unwrap_or_default()
    }
}

impl<R: BufRead> DecisionProvider for ConsoleDecisions<R> {
    fn confirm_roll(&mut self, team: TeamColor) -> bool {
        let message = format!("Team {}, type GO to roll the dice: ", team);
        self.prompt(&message)
            .is_some_and(|answer| answer.eq_ignore_ascii_case("go"))
    }

    fn accept(&mut self, _team: TeamColor, offer: Offer) -> bool {
        match offer {
            Offer::LeaveJail => self.yes_no("Take a piece out of jail? (y/n): "),
            Offer::MoveOther { steps } => {
                self.yes_no(&format!("Move another piece {} steps? (y/n): ", steps))
            }
        }
    }

    fn choose_piece(&mut self, _team: TeamColor, movable: &[PieceId]) -> Option<u8> {
        let pieces: Vec<String> = movable.iter().map(PieceId::to_string).collect();
        println!("Movable pieces: {}", pieces.join(", "));
        self.prompt("Number of the piece to move: ")?.parse().ok()
    }

    fn choose_bonus_steps(&mut self, _team: TeamColor, remaining: u32) -> Option<u32> {
        self.prompt(&format!("How many bonus steps (1-{})? ", remaining))?.parse().ok()
    }
}
