use std::{cmp::Ordering, fmt};

use hashbrown::HashMap;
use log::{info, warn};

use crate::parchis::{
    board, Board, Dice, GameOutcome, MoveError, MoveOutcome, Piece, PieceId, PieceState,
    RollEffect, Team, TeamColor, ARRIVAL_SLOT, TRACK_LENGTH,
};

pub const HOME_BONUS: u32 = 10;
pub const CAPTURE_BONUS: u32 = 20;
pub const MAX_DOUBLES: u8 = 3;

/// Everything that changes during a match. All rule operations are plain
/// state transitions; sequencing and decisions live in [`crate::parchis::Game`].
#[derive(Debug, Clone)]
pub struct GameState {
    turn_order: Vec<TeamColor>,
    teams: HashMap<TeamColor, Team>,
    board: Board,
    turn_index: usize,
    bonus_moves: HashMap<TeamColor, u32>,
    doubles_count: HashMap<TeamColor, u8>,
    last_roll: Option<Dice>,
}

impl GameState {
    /// Creates a match with every piece in jail. `turn_order` is a code like `"RBGY"`.
    pub fn new(turn_order: &str) -> Self {
        GameState {
            turn_order: TeamColor::turn_order(turn_order),
            teams: TeamColor::ALL.into_iter().map(|c| (c, Team::new(c))).collect(),
            board: Board::new(),
            turn_index: 0,
            bonus_moves: HashMap::new(),
            doubles_count: TeamColor::ALL.into_iter().map(|c| (c, 0)).collect(),
            last_roll: None,
        }
    }

    pub fn turn_order(&self) -> &[TeamColor] {
        &self.turn_order
    }

    pub fn active_team(&self) -> TeamColor {
        self.turn_order[self.turn_index]
    }

    pub fn team(&self, color: TeamColor) -> &Team {
        &self.teams[&color]
    }

    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        TeamColor::ALL.into_iter().map(|c| &self.teams[&c])
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.team(id.team).piece(id.number)
    }

    fn piece_mut(&mut self, id: PieceId) -> Result<&mut Piece, MoveError> {
        self.teams
            .get_mut(&id.team)
            .and_then(|team| team.piece_mut(id.number))
            .ok_or(MoveError::InvalidSelection { piece: id })
    }

    pub fn bonus(&self, color: TeamColor) -> u32 {
        self.bonus_moves.get(&color).copied().unwrap_or(0)
    }

    pub fn doubles(&self, color: TeamColor) -> u8 {
        self.doubles_count.get(&color).copied().unwrap_or(0)
    }

    pub fn last_roll(&self) -> Option<Dice> {
        self.last_roll
    }

    /// The first team, in turn order, with all its pieces home.
    pub fn outcome(&self) -> GameOutcome {
        match self.turn_order.iter().find(|c| self.team(**c).has_won()) {
            Some(&color) => GameOutcome::Won(color),
            None => GameOutcome::Ongoing,
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome() != GameOutcome::Ongoing
    }

    /// Moves the turn to the next team unless the current one earned an extra turn.
    pub fn advance_turn(&mut self, extra_turn: bool) {
        if !extra_turn {
            self.turn_index = (self.turn_index + 1) % self.turn_order.len();
        }
    }

    /// Stores the roll and updates the team's consecutive doubles counter.
    pub fn record_roll(&mut self, color: TeamColor, dice: Dice) -> RollEffect {
        self.last_roll = Some(dice);
        let count = self.doubles_count.entry(color).or_insert(0);
        if !dice.is_double() {
            *count = 0;
            return RollEffect::Normal;
        }
        *count += 1;
        if *count >= MAX_DOUBLES {
            RollEffect::Penalty
        } else {
            RollEffect::Double
        }
    }

    /// Third double in a row: the first movable piece goes back to jail and the counter resets.
    pub fn punish_doubles(&mut self, color: TeamColor) -> Option<PieceId> {
        self.doubles_count.insert(color, 0);
        let piece = self.team(color).movable().first().copied()?;
        info!("Three doubles in a row, {} goes back to jail", piece);
        self.capture(piece);
        Some(piece)
    }

    pub fn add_bonus(&mut self, color: TeamColor, steps: u32) {
        *self.bonus_moves.entry(color).or_insert(0) += steps;
        info!("Team {} earns {} bonus steps", color, steps);
    }

    /// Spends bonus steps; the entry disappears once the pool is empty.
    pub fn spend_bonus(&mut self, color: TeamColor, steps: u32) {
        if let Some(pool) = self.bonus_moves.get_mut(&color) {
            *pool = pool.saturating_sub(steps);
            if *pool == 0 {
                self.bonus_moves.remove(&color);
            }
        }
    }

    /// Takes the first jailed piece out to the team's launch cell.
    pub fn exit_jail(&mut self, color: TeamColor) -> Result<PieceId, MoveError> {
        let id = self
            .team(color)
            .jailed()
            .first()
            .copied()
            .ok_or(MoveError::JailEmpty { team: color })?;
        let launch = color.launch_cell();
        let occupants = self.board.occupants(launch);
        if occupants.is_full() {
            return Err(MoveError::BlockedDestination { cell: launch });
        }
        if occupants.iter().any(|p| p.team != color) {
            return Err(MoveError::SafeCellProtection { cell: launch });
        }
        self.board.place(launch, id);
        self.piece_mut(id)?.set_state(PieceState::OnTrack(launch));
        info!("{} leaves jail to cell {}", id, launch);
        Ok(id)
    }

    /// Moves a piece on the outer or internal track, dispatching on its state.
    pub fn move_piece(&mut self, id: PieceId, steps: u32) -> Result<MoveOutcome, MoveError> {
        let state = self
            .piece(id)
            .map(Piece::state)
            .ok_or(MoveError::InvalidSelection { piece: id })?;
        let outcome = match state {
            PieceState::OnTrack(cell) => self.move_outer(id, cell, steps),
            PieceState::OnInternalTrack(slot) => self.move_internal(id, slot, steps),
            PieceState::Jailed | PieceState::Home => Err(MoveError::NotMovable { piece: id }),
        };
        if let Err(err) = &outcome {
            warn!("Move of {} by {} rejected: {}", id, steps, err);
        }
        outcome
    }

    fn move_outer(&mut self, id: PieceId, cell: u8, steps: u32) -> Result<MoveOutcome, MoveError> {
        let to_threshold = board::distance(cell, id.team.entry_threshold());
        if steps > to_threshold {
            let slot = steps - to_threshold - 1;
            return match slot.cmp(&(ARRIVAL_SLOT as u32)) {
                Ordering::Less => {
                    self.board.remove(cell, id);
                    self.piece_mut(id)?.set_state(PieceState::OnInternalTrack(slot as u8));
                    info!("{} enters the internal track at slot {}", id, slot);
                    Ok(MoveOutcome::EnteredInternal { slot: slot as u8 })
                }
                Ordering::Equal => {
                    self.board.remove(cell, id);
                    self.arrive_home(id);
                    Ok(MoveOutcome::Home)
                }
                Ordering::Greater => Err(MoveError::Overshoot { piece: id, steps }),
            };
        }

        let target = board::advance(cell, steps);
        let occupants = self.board.occupants(target);
        if occupants.is_full() {
            return Err(MoveError::BlockedDestination { cell: target });
        }
        let rivals: Vec<PieceId> = occupants.iter().filter(|p| p.team != id.team).copied().collect();
        if !occupants.is_empty() && rivals.is_empty() {
            return Err(MoveError::BlockedDestination { cell: target });
        }
        if !rivals.is_empty() && board::is_safe(target) {
            return Err(MoveError::SafeCellProtection { cell: target });
        }

        for &rival in &rivals {
            self.capture(rival);
            info!("{} captures {} on cell {}", id, rival, target);
        }
        if !rivals.is_empty() {
            self.add_bonus(id.team, CAPTURE_BONUS);
        }
        self.board.relocate(cell, target, id);
        self.piece_mut(id)?.set_state(PieceState::OnTrack(target));
        info!("{} moves from cell {} to {}", id, cell, target);

        if rivals.is_empty() {
            Ok(MoveOutcome::Moved { from: cell, to: target })
        } else {
            Ok(MoveOutcome::Captured { from: cell, to: target, captured: rivals })
        }
    }

    fn move_internal(&mut self, id: PieceId, slot: u8, steps: u32) -> Result<MoveOutcome, MoveError> {
        let target = slot as u32 + steps;
        match target.cmp(&(ARRIVAL_SLOT as u32)) {
            Ordering::Less => {
                self.piece_mut(id)?.set_state(PieceState::OnInternalTrack(target as u8));
                info!("{} advances on the internal track from {} to {}", id, slot, target);
                Ok(MoveOutcome::Advanced { from: slot, to: target as u8 })
            }
            Ordering::Equal => {
                self.arrive_home(id);
                Ok(MoveOutcome::Home)
            }
            Ordering::Greater => Err(MoveError::Overshoot { piece: id, steps }),
        }
    }

    fn arrive_home(&mut self, id: PieceId) {
        if let Some(team) = self.teams.get_mut(&id.team) {
            if team.send_home(id.number) {
                info!("{} reached home", id);
                self.add_bonus(id.team, HOME_BONUS);
            }
        }
    }

    /// Sends a piece back to jail. Capturing a jailed piece changes nothing,
    /// and pieces at home stay there.
    pub fn capture(&mut self, id: PieceId) {
        let Some(state) = self.piece(id).map(Piece::state) else {
            warn!("Cannot capture unknown piece {}", id);
            return;
        };
        match state {
            PieceState::Home => {
                warn!("{} is home and cannot be captured", id);
                return;
            }
            PieceState::Jailed => return,
            PieceState::OnTrack(cell) => {
                self.board.remove(cell, id);
            }
            PieceState::OnInternalTrack(_) => (),
        }
        if let Ok(piece) = self.piece_mut(id) {
            piece.set_state(PieceState::Jailed);
            info!("{} is sent to jail", id);
        }
    }

    /// Puts a piece in an arbitrary state, keeping the board and home list consistent.
    /// Intended for setting up positions; a piece that is home stays home.
    pub fn place(&mut self, id: PieceId, state: PieceState) -> Result<(), MoveError> {
        let current = self
            .piece(id)
            .map(Piece::state)
            .ok_or(MoveError::InvalidSelection { piece: id })?;
        if current == PieceState::Home {
            return Err(MoveError::NotMovable { piece: id });
        }
        match state {
            PieceState::OnTrack(cell) if !(1..=TRACK_LENGTH).contains(&cell) => {
                return Err(MoveError::OffTrack { cell });
            }
            PieceState::OnTrack(cell) if current != state => {
                if !self.board.has_space(cell) {
                    return Err(MoveError::BlockedDestination { cell });
                }
                let rival = self.board.occupants(cell).iter().any(|p| p.team != id.team);
                if rival && board::is_safe(cell) {
                    return Err(MoveError::SafeCellProtection { cell });
                }
            }
            PieceState::OnInternalTrack(slot) if slot >= ARRIVAL_SLOT => {
                return Err(MoveError::Overshoot { piece: id, steps: slot as u32 });
            }
            _ => (),
        }

        if let PieceState::OnTrack(cell) = current {
            self.board.remove(cell, id);
        }
        match state {
            PieceState::Home => {
                if let Some(team) = self.teams.get_mut(&id.team) {
                    team.send_home(id.number);
                }
            }
            PieceState::OnTrack(cell) => {
                self.board.place(cell, id);
                self.piece_mut(id)?.set_state(state);
            }
            _ => self.piece_mut(id)?.set_state(state),
        }
        Ok(())
    }

    /// Sets a team's bonus pool directly. Intended for setting up positions.
    pub fn set_bonus(&mut self, color: TeamColor, steps: u32) {
        if steps == 0 {
            self.bonus_moves.remove(&color);
        } else {
            self.bonus_moves.insert(color, steps);
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list(ids: &[PieceId]) -> String {
            ids.iter().map(PieceId::to_string).collect::<Vec<_>>().join(", ")
        }
        writeln!(f, "Outer track: {}", self.board)?;
        for team in self.teams() {
            write!(
                f,
                "{} - jail: [{}], track: [{}], internal: [{}], home: [{}]",
                team.color(),
                list(&team.jailed()),
                list(&team.on_track()),
                list(&team.internal()),
                list(team.home()),
            )?;
            match self.bonus(team.color()) {
                0 => writeln!(f)?,
                bonus => writeln!(f, ", bonus: {}", bonus)?,
            }
        }
        Ok(())
    }
}
