use std::sync::Arc;

use log::{debug, info, warn};
use parking_lot::Mutex;

use crate::parchis::{
    DecisionProvider, GameOutcome, GameState, MoveError, Offer, PieceId, Roll, RollEffect,
    TeamColor, JAIL_EXIT_VALUE,
};

/// Receives a signal after every change to the game state.
pub trait Notify: Send {
    fn state_changed(&self);
}

/// Notifier for games nobody watches.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Notify for Silent {
    fn state_changed(&self) {}
}

enum Selection {
    Piece(PieceId),
    Invalid,
    Declined,
}

/// Runs turns against a shared [`GameState`].
///
/// Every mutation happens with the state locked and is followed by a
/// notification once the lock is released. Decisions are always requested
/// with the lock released, so readers such as a board window are never kept
/// waiting on a player.
pub struct Game {
    state: Arc<Mutex<GameState>>,
    notifier: Box<dyn Notify>,
    dice: Box<dyn Roll + Send>,
}

impl Game {
    pub fn new(state: GameState, notifier: Box<dyn Notify>, dice: Box<dyn Roll + Send>) -> Self {
        Game {
            state: Arc::new(Mutex::new(state)),
            notifier,
            dice,
        }
    }

    /// Handle for readers of the state. Lock it only briefly.
    pub fn shared_state(&self) -> Arc<Mutex<GameState>> {
        Arc::clone(&self.state)
    }

    fn read<T>(&self, f: impl FnOnce(&GameState) -> T) -> T {
        f(&*self.state.lock())
    }

    fn mutate<T>(&self, f: impl FnOnce(&mut GameState) -> T) -> T {
        let out = {
            let mut state = self.state.lock();
            f(&mut *state)
        };
        self.notifier.state_changed();
        out
    }

    pub fn outcome(&self) -> GameOutcome {
        self.read(GameState::outcome)
    }

    /// Plays turns until a team has all its pieces home.
    pub fn run(&mut self, decisions: &mut dyn DecisionProvider) -> TeamColor {
        loop {
            debug!("\n{}", self.read(|s| s.to_string()));
            if let GameOutcome::Won(color) = self.play_turn(decisions) {
                info!("Team {} wins!", color);
                return color;
            }
        }
    }

    /// Plays one turn of the active team and returns the state of the match afterwards.
    pub fn play_turn(&mut self, decisions: &mut dyn DecisionProvider) -> GameOutcome {
        let (color, outcome) = self.read(|s| (s.active_team(), s.outcome()));
        if outcome != GameOutcome::Ongoing {
            return outcome;
        }
        info!("Turn of team {}", color);

        self.resolve_bonus(color, decisions);
        if self.read(|s| s.team(color).has_won()) {
            return self.outcome();
        }

        if !decisions.confirm_roll(color) {
            info!("Team {} does not roll, turn skipped", color);
            return self.end_turn(false);
        }
        let dice = self.dice.roll();
        info!("Team {} rolls {}", color, dice);

        let extra_turn = match self.mutate(|s| s.record_roll(color, dice)) {
            RollEffect::Normal => false,
            RollEffect::Double => {
                info!("Double, team {} plays again", color);
                true
            }
            RollEffect::Penalty => {
                self.mutate(|s| s.punish_doubles(color));
                return self.end_turn(false);
            }
        };

        let (movable, jailed) = self.read(|s| {
            let team = s.team(color);
            (team.movable(), team.jailed())
        });
        if movable.is_empty() && !dice.allows_jail_exit() {
            info!("Team {} has no possible move", color);
            return self.end_turn(extra_turn);
        }

        if dice.allows_jail_exit() && !jailed.is_empty() && decisions.accept(color, Offer::LeaveJail) {
            if let Err(err) = self.mutate(|s| s.exit_jail(color)) {
                warn!("Team {} cannot leave jail: {}", color, err);
            }
            let steps = dice.other_than(JAIL_EXIT_VALUE);
            if decisions.accept(color, Offer::MoveOther { steps }) {
                self.select_and_move(color, steps as u32, decisions);
            }
            return self.end_turn(extra_turn);
        }

        self.select_and_move(color, dice.total() as u32, decisions);
        self.end_turn(extra_turn)
    }

    fn end_turn(&mut self, extra_turn: bool) -> GameOutcome {
        self.mutate(|s| {
            let outcome = s.outcome();
            if outcome == GameOutcome::Ongoing {
                s.advance_turn(extra_turn);
            }
            outcome
        })
    }

    fn select_piece(
        &self,
        color: TeamColor,
        movable: &[PieceId],
        decisions: &mut dyn DecisionProvider,
    ) -> Selection {
        match movable {
            [] => Selection::Declined,
            [only] => Selection::Piece(*only),
            _ => match decisions.choose_piece(color, movable) {
                None => Selection::Declined,
                Some(number) => match movable.iter().find(|p| p.number == number) {
                    Some(&piece) => Selection::Piece(piece),
                    None => {
                        warn!("{}", MoveError::InvalidSelection { piece: PieceId::new(color, number) });
                        Selection::Invalid
                    }
                },
            },
        }
    }

    fn select_and_move(&mut self, color: TeamColor, steps: u32, decisions: &mut dyn DecisionProvider) {
        let movable = self.read(|s| s.team(color).movable());
        match self.select_piece(color, &movable, decisions) {
            Selection::Piece(piece) => {
                if let Ok(outcome) = self.mutate(|s| s.move_piece(piece, steps)) {
                    debug!("{} -> {:?}", piece, outcome);
                }
            }
            Selection::Invalid => (),
            Selection::Declined => info!("Team {} makes no move", color),
        }
    }

    /// Spends the team's bonus pool before it rolls. Stops when the pool is
    /// empty, when no piece can move or when the player declines.
    fn resolve_bonus(&mut self, color: TeamColor, decisions: &mut dyn DecisionProvider) {
        loop {
            let (pool, movable) = self.read(|s| (s.bonus(color), s.team(color).movable()));
            if pool == 0 {
                return;
            }
            info!("Team {} has {} bonus steps", color, pool);
            if movable.is_empty() {
                info!("No piece of team {} can use bonus steps", color);
                return;
            }
            let piece = match self.select_piece(color, &movable, decisions) {
                Selection::Piece(piece) => piece,
                Selection::Invalid => continue,
                Selection::Declined => {
                    info!("Team {} keeps its bonus steps for later", color);
                    return;
                }
            };
            let Some(steps) = decisions.choose_bonus_steps(color, pool) else {
                info!("Team {} keeps its bonus steps for later", color);
                return;
            };
            if steps == 0 || steps > pool {
                warn!("Cannot spend {} bonus steps, {} available", steps, pool);
                continue;
            }
            self.mutate(|s| {
                if s.move_piece(piece, steps).is_ok() {
                    s.spend_bonus(color, steps);
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::parchis::{Dice, FixedDice, PieceState, ScriptedDecisions};

    struct Counter(Arc<AtomicUsize>);

    impl Notify for Counter {
        fn state_changed(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn game_with(state: GameState, rolls: Vec<Dice>) -> Game {
        Game::new(state, Box::new(Silent), Box::new(FixedDice::new(rolls)))
    }

    fn id(team: TeamColor, number: u8) -> PieceId {
        PieceId::new(team, number)
    }

    #[test]
    fn test_unconfirmed_roll_skips_turn() {
        let mut game = game_with(GameState::new("GY"), vec![Dice::new(5, 2)]);
        let mut decisions = ScriptedDecisions::new().rolls([false]);
        assert_eq!(game.play_turn(&mut decisions), GameOutcome::Ongoing);
        let state = game.shared_state();
        let state = state.lock();
        assert_eq!(state.active_team(), TeamColor::Yellow);
        assert_eq!(state.last_roll(), None);
    }

    #[test]
    fn test_no_moves_skips_turn() {
        let mut game = game_with(GameState::new(""), vec![Dice::new(1, 2), Dice::new(3, 3)]);
        let mut decisions = ScriptedDecisions::new().rolls([true, true]);
        game.play_turn(&mut decisions);
        assert_eq!(game.read(GameState::active_team), TeamColor::Green);
        // A double without moves still grants the extra turn.
        game.play_turn(&mut decisions);
        assert_eq!(game.read(GameState::active_team), TeamColor::Green);
        assert_eq!(game.read(|s| s.doubles(TeamColor::Green)), 1);
    }

    #[test]
    fn test_leave_jail_then_move_other_die() {
        let mut game = game_with(GameState::new(""), vec![Dice::new(5, 3)]);
        let mut decisions = ScriptedDecisions::new().rolls([true]).offers([true, true]);
        game.play_turn(&mut decisions);
        let state = game.shared_state();
        let state = state.lock();
        let piece = id(TeamColor::Yellow, 0);
        assert_eq!(state.piece(piece).unwrap().state(), PieceState::OnTrack(7));
        assert!(state.board().occupants(4).is_empty());
        assert_eq!(state.active_team(), TeamColor::Green);
    }

    #[test]
    fn test_declined_jail_exit_moves_with_total() {
        let mut state = GameState::new("");
        state.place(id(TeamColor::Yellow, 1), PieceState::OnTrack(20)).unwrap();
        let mut game = game_with(state, vec![Dice::new(5, 1)]);
        let mut decisions = ScriptedDecisions::new().rolls([true]).offers([false]);
        game.play_turn(&mut decisions);
        assert_eq!(
            game.read(|s| s.piece(id(TeamColor::Yellow, 1)).unwrap().state()),
            PieceState::OnTrack(26)
        );
        assert_eq!(game.read(|s| s.team(TeamColor::Yellow).jailed().len()), 3);
    }

    #[test]
    fn test_piece_selection() {
        let mut state = GameState::new("");
        state.place(id(TeamColor::Yellow, 0), PieceState::OnTrack(20)).unwrap();
        state.place(id(TeamColor::Yellow, 2), PieceState::OnTrack(30)).unwrap();
        let mut game = game_with(state, vec![Dice::new(1, 3), Dice::new(2, 4)]);

        let mut decisions = ScriptedDecisions::new().rolls([true]).pieces([Some(2)]);
        game.play_turn(&mut decisions);
        assert_eq!(
            game.read(|s| s.piece(id(TeamColor::Yellow, 2)).unwrap().state()),
            PieceState::OnTrack(34)
        );

        // Unknown pieces and unreadable answers leave everything in place.
        let before = game.read(|s| s.board().clone());
        for _ in 0..3 {
            game.mutate(|s| s.advance_turn(false));
        }
        let mut decisions = ScriptedDecisions::new().rolls([true]).pieces([Some(1)]);
        game.play_turn(&mut decisions);
        assert_eq!(game.read(|s| s.board().clone()), before);
        assert_eq!(game.read(GameState::active_team), TeamColor::Green);
    }

    #[test]
    fn test_third_double_sends_piece_to_jail() {
        let mut state = GameState::new("Y");
        state.place(id(TeamColor::Yellow, 0), PieceState::OnTrack(20)).unwrap();
        let mut game = game_with(state, vec![Dice::new(1, 1), Dice::new(2, 2), Dice::new(3, 3)]);
        let mut decisions = ScriptedDecisions::new().rolls([true, true, true]);

        game.play_turn(&mut decisions);
        game.play_turn(&mut decisions);
        assert_eq!(
            game.read(|s| s.piece(id(TeamColor::Yellow, 0)).unwrap().state()),
            PieceState::OnTrack(26)
        );
        assert_eq!(game.read(GameState::active_team), TeamColor::Yellow);

        game.play_turn(&mut decisions);
        let state = game.shared_state();
        let state = state.lock();
        assert_eq!(state.piece(id(TeamColor::Yellow, 0)).unwrap().state(), PieceState::Jailed);
        assert_eq!(state.doubles(TeamColor::Yellow), 0);
        assert_eq!(state.active_team(), TeamColor::Green);
    }

    #[test]
    fn test_bonus_is_spent_before_rolling() {
        let mut state = GameState::new("");
        state.place(id(TeamColor::Yellow, 0), PieceState::OnTrack(20)).unwrap();
        state.set_bonus(TeamColor::Yellow, 20);
        let mut game = game_with(state, vec![Dice::new(1, 2)]);
        let mut decisions = ScriptedDecisions::new()
            .rolls([true])
            .steps([Some(25), Some(0), Some(12), Some(8)]);
        game.play_turn(&mut decisions);
        let state = game.shared_state();
        let state = state.lock();
        assert_eq!(state.piece(id(TeamColor::Yellow, 0)).unwrap().state(), PieceState::OnTrack(43));
        assert_eq!(state.bonus(TeamColor::Yellow), 0);
        assert!(decisions.is_exhausted());
    }

    #[test]
    fn test_bonus_asks_again_for_unmovable_piece() {
        let mut state = GameState::new("");
        state.place(id(TeamColor::Yellow, 0), PieceState::OnTrack(20)).unwrap();
        state.place(id(TeamColor::Yellow, 1), PieceState::OnTrack(30)).unwrap();
        state.set_bonus(TeamColor::Yellow, 20);
        let mut game = game_with(state, vec![Dice::new(1, 2)]);
        // Piece 3 is still in jail.
        let mut decisions = ScriptedDecisions::new()
            .pieces([Some(3), Some(0)])
            .steps([Some(20)]);
        game.play_turn(&mut decisions);
        assert!(decisions.is_exhausted());
        let state = game.shared_state();
        let state = state.lock();
        assert_eq!(state.piece(id(TeamColor::Yellow, 0)).unwrap().state(), PieceState::OnTrack(40));
        assert_eq!(state.piece(id(TeamColor::Yellow, 1)).unwrap().state(), PieceState::OnTrack(30));
        assert_eq!(state.piece(id(TeamColor::Yellow, 3)).unwrap().state(), PieceState::Jailed);
        assert_eq!(state.bonus(TeamColor::Yellow), 0);
    }

    #[test]
    fn test_failed_bonus_move_keeps_pool() {
        let mut state = GameState::new("");
        state.place(id(TeamColor::Yellow, 0), PieceState::OnInternalTrack(5)).unwrap();
        state.set_bonus(TeamColor::Yellow, 10);
        let mut game = game_with(state, vec![Dice::new(1, 2)]);
        let mut decisions = ScriptedDecisions::new().steps([Some(4), None]);
        game.play_turn(&mut decisions);
        assert_eq!(game.read(|s| s.bonus(TeamColor::Yellow)), 10);
        assert_eq!(
            game.read(|s| s.piece(id(TeamColor::Yellow, 0)).unwrap().state()),
            PieceState::OnInternalTrack(5)
        );
    }

    #[test]
    fn test_notifies_after_mutations() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut game = Game::new(
            GameState::new(""),
            Box::new(Counter(Arc::clone(&count))),
            Box::new(FixedDice::new(vec![Dice::new(5, 2)])),
        );
        let mut decisions = ScriptedDecisions::new().rolls([true]).offers([true, false]);
        game.play_turn(&mut decisions);
        // Roll, jail exit and end of turn.
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_finished_game_does_not_change() {
        let mut state = GameState::new("");
        for number in 0..4 {
            state.place(id(TeamColor::Blue, number), PieceState::Home).unwrap();
        }
        let mut game = game_with(state, vec![Dice::new(5, 5)]);
        let mut decisions = ScriptedDecisions::new().rolls([true]);
        assert_eq!(game.play_turn(&mut decisions), GameOutcome::Won(TeamColor::Blue));
        assert_eq!(game.read(GameState::active_team), TeamColor::Yellow);
        assert_eq!(game.read(GameState::last_roll), None);
        assert_eq!(game.run(&mut decisions), TeamColor::Blue);
    }
}
