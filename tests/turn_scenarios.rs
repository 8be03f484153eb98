use parchis::parchis::{
    Dice, FixedDice, Game, GameOutcome, GameState, PieceId, PieceState, ScriptedDecisions, Silent,
    TeamColor, CAPTURE_BONUS, HOME_BONUS,
};

fn id(team: TeamColor, number: u8) -> PieceId {
    PieceId::new(team, number)
}

fn game(state: GameState, rolls: Vec<Dice>) -> Game {
    Game::new(state, Box::new(Silent), Box::new(FixedDice::new(rolls)))
}

fn state_of(game: &Game, piece: PieceId) -> PieceState {
    let state = game.shared_state();
    let state = state.lock();
    state.piece(piece).map(|p| p.state()).unwrap()
}

#[test]
fn test_yellow_enters_internal_track_after_wrap() {
    let mut state = GameState::new("YGRB");
    state.place(id(TeamColor::Yellow, 0), PieceState::OnTrack(66)).unwrap();
    let mut game = game(state, vec![Dice::new(1, 2)]);
    let mut decisions = ScriptedDecisions::new().rolls([true]);

    assert_eq!(game.play_turn(&mut decisions), GameOutcome::Ongoing);
    assert_eq!(state_of(&game, id(TeamColor::Yellow, 0)), PieceState::OnInternalTrack(1));

    let shared = game.shared_state();
    let state = shared.lock();
    assert!(state.board().occupants(66).is_empty());
    assert_eq!(state.active_team(), TeamColor::Green);
}

#[test]
fn test_bonus_steps_bring_the_whole_team_home() {
    let mut state = GameState::new("YGRB");
    for number in 0..4 {
        state.place(id(TeamColor::Yellow, number), PieceState::OnInternalTrack(6)).unwrap();
    }
    state.set_bonus(TeamColor::Yellow, 1);
    let mut game = game(state, vec![Dice::new(3, 4)]);
    // The last piece is the only movable one and needs no selection.
    let mut decisions = ScriptedDecisions::new()
        .pieces([Some(0), Some(1), Some(2)])
        .steps([Some(1), Some(1), Some(1), Some(1)]);

    assert_eq!(game.play_turn(&mut decisions), GameOutcome::Won(TeamColor::Yellow));
    assert!(decisions.is_exhausted());

    let shared = game.shared_state();
    let state = shared.lock();
    let yellow = state.team(TeamColor::Yellow);
    assert_eq!(
        yellow.home(),
        &[0, 1, 2, 3].map(|n| id(TeamColor::Yellow, n))
    );
    // Every arrival adds its bonus before the spent step is taken away.
    assert_eq!(state.bonus(TeamColor::Yellow), 1 + 4 * HOME_BONUS - 4);
    assert_eq!(state.last_roll(), None);
    assert_eq!(state.active_team(), TeamColor::Yellow);
}

#[test]
fn test_double_five_leaves_jail_and_plays_again() {
    let mut game = game(GameState::new("YGRB"), vec![Dice::new(5, 5)]);
    let mut decisions = ScriptedDecisions::new().rolls([true]).offers([true, true]);

    game.play_turn(&mut decisions);
    assert_eq!(state_of(&game, id(TeamColor::Yellow, 0)), PieceState::OnTrack(9));

    let shared = game.shared_state();
    let state = shared.lock();
    assert_eq!(state.doubles(TeamColor::Yellow), 1);
    assert_eq!(state.active_team(), TeamColor::Yellow);
    assert_eq!(state.team(TeamColor::Yellow).jailed().len(), 3);
}

#[test]
fn test_third_double_in_a_row_is_punished() {
    let mut game = game(GameState::new("YGRB"), vec![Dice::new(5, 5)]);
    let mut decisions = ScriptedDecisions::new()
        .rolls([true, true, true])
        .offers([true, true, true, true])
        .pieces([Some(0)]);

    game.play_turn(&mut decisions);
    game.play_turn(&mut decisions);
    assert_eq!(state_of(&game, id(TeamColor::Yellow, 0)), PieceState::OnTrack(14));
    assert_eq!(state_of(&game, id(TeamColor::Yellow, 1)), PieceState::OnTrack(4));

    game.play_turn(&mut decisions);
    assert!(decisions.is_exhausted());
    assert_eq!(state_of(&game, id(TeamColor::Yellow, 0)), PieceState::Jailed);
    assert_eq!(state_of(&game, id(TeamColor::Yellow, 1)), PieceState::OnTrack(4));

    let shared = game.shared_state();
    let state = shared.lock();
    assert!(state.board().occupants(14).is_empty());
    assert_eq!(state.doubles(TeamColor::Yellow), 0);
    assert_eq!(state.active_team(), TeamColor::Green);
}

#[test]
fn test_capture_earns_bonus_for_the_next_turn() {
    let mut state = GameState::new("BR");
    state.place(id(TeamColor::Blue, 0), PieceState::OnTrack(10)).unwrap();
    state.place(id(TeamColor::Red, 0), PieceState::OnTrack(15)).unwrap();
    let rolls = vec![
        Dice::new(1, 4),
        Dice::new(1, 2),
        Dice::new(1, 2),
        Dice::new(1, 2),
        Dice::new(2, 4),
    ];
    let mut game = game(state, rolls);
    let mut decisions = ScriptedDecisions::new()
        .rolls([true; 5])
        .steps([Some(20)]);

    game.play_turn(&mut decisions);
    assert_eq!(state_of(&game, id(TeamColor::Blue, 0)), PieceState::OnTrack(15));
    assert_eq!(state_of(&game, id(TeamColor::Red, 0)), PieceState::Jailed);
    assert_eq!(game.shared_state().lock().bonus(TeamColor::Blue), CAPTURE_BONUS);

    // Red, yellow and green have nothing to move.
    for team in [TeamColor::Red, TeamColor::Yellow, TeamColor::Green] {
        assert_eq!(game.shared_state().lock().active_team(), team);
        game.play_turn(&mut decisions);
    }
    assert_eq!(game.shared_state().lock().active_team(), TeamColor::Blue);

    // Blue spends the bonus first, then rolls.
    game.play_turn(&mut decisions);
    assert_eq!(state_of(&game, id(TeamColor::Blue, 0)), PieceState::OnTrack(41));
    assert_eq!(game.shared_state().lock().bonus(TeamColor::Blue), 0);
    assert!(decisions.is_exhausted());
}

#[test]
fn test_run_until_a_team_wins() {
    let mut state = GameState::new("RY");
    for number in 0..3 {
        state.place(id(TeamColor::Red, number), PieceState::Home).unwrap();
    }
    state.place(id(TeamColor::Red, 3), PieceState::OnInternalTrack(3)).unwrap();
    let mut game = game(state, vec![Dice::new(1, 3)]);
    let mut decisions = ScriptedDecisions::new().rolls([true]);

    assert_eq!(game.run(&mut decisions), TeamColor::Red);
    assert_eq!(game.outcome(), GameOutcome::Won(TeamColor::Red));
}
