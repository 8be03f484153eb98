use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use log::error;
use nannou::color::{self, Srgb, BLACK, WHITE};
use parchis::{
    config::Config,
    console::ConsoleDecisions,
    layout::{self, GridPos, Tile, GRID_SIZE},
    log_init,
    parchis::{Game, GameOutcome, GameState, Notify, RandomDice, TeamColor},
    snapshot::Snapshot,
};
use parking_lot::Mutex;

const PANEL_WIDTH: f32 = 260.0;

/// Marks the board as stale whenever the engine changes something.
struct RedrawFlag(Arc<AtomicBool>);

impl Notify for RedrawFlag {
    fn state_changed(&self) {
        self.0.store(true, Ordering::Release);
    }
}

fn main() {
    let config = Config::new();
    if let Err(err) = log_init::init(config.log_level()) {
        eprintln!("Could not start the logger: {}", err);
    }
    config.log();

    if !config.headless {
        nannou::app(model).update(update).run();
        return;
    }

    let (_, _, game_thread) = start_game(&config);
    if game_thread.join().is_err() {
        error!("The game thread stopped unexpectedly");
    }
}

/// Builds the match and starts playing it on its own thread. Returns the state
/// handle and redraw flag for whoever shows the board.
fn start_game(config: &Config) -> (Arc<Mutex<GameState>>, Arc<AtomicBool>, JoinHandle<()>) {
    let order = match &config.turn_order {
        Some(order) => order.clone(),
        None => ConsoleDecisions::stdin().turn_order(),
    };

    let redraw = Arc::new(AtomicBool::new(true));
    let game = Game::new(
        GameState::new(&order),
        Box::new(RedrawFlag(Arc::clone(&redraw))),
        Box::new(RandomDice),
    );
    let state = game.shared_state();
    let headless = config.headless;
    let game_thread = thread::spawn(move || play(game, headless));
    (state, redraw, game_thread)
}

/// Game loop for the console. Without a window the board is printed before every turn.
fn play(mut game: Game, print_board: bool) {
    let mut decisions = ConsoleDecisions::stdin();
    let winner = if print_board {
        let state = game.shared_state();
        loop {
            println!("\n{}", *state.lock());
            if let GameOutcome::Won(color) = game.play_turn(&mut decisions) {
                break color;
            }
        }
    } else {
        game.run(&mut decisions)
    };
    println!("Team {} has won!", winner);
}

struct Model {
    state: Arc<Mutex<GameState>>,
    redraw: Arc<AtomicBool>,
    refresh: Duration,
    last_refresh: Instant,
    grid: Vec<Vec<Tile>>,
    snapshot: Snapshot,
    _game_thread: JoinHandle<()>,
}

fn model(app: &nannou::App) -> Model {
    let config = Config::new();
    let (state, redraw, game_thread) = start_game(&config);

    app.new_window()
        .title("Parchis")
        .size(960, 700)
        .view(view)
        .build()
        .expect("Failed to open the board window");

    Model {
        snapshot: Snapshot::capture(&state),
        state,
        redraw,
        refresh: config.refresh_interval,
        last_refresh: Instant::now(),
        grid: layout::grid(),
        _game_thread: game_thread,
    }
}

fn update(_app: &nannou::App, model: &mut Model, _update: nannou::event::Update) {
    let notified = model.redraw.swap(false, Ordering::AcqRel);
    if notified || model.last_refresh.elapsed() >= model.refresh {
        model.snapshot = Snapshot::capture(&model.state);
        model.last_refresh = Instant::now();
    }
}

fn tile_color(tile: Tile) -> Srgb<u8> {
    match tile {
        Tile::Empty => color::LIGHTGRAY,
        Tile::Path => color::DARKGRAY,
        Tile::Yellow => color::YELLOW,
        Tile::Green => color::GREEN,
        Tile::Red => color::RED,
        Tile::Blue => color::BLUE,
        Tile::YellowLane => color::KHAKI,
        Tile::GreenLane => color::LIGHTGREEN,
        Tile::RedLane => color::LIGHTCORAL,
        Tile::BlueLane => color::LIGHTSKYBLUE,
        Tile::Safe => color::MAGENTA,
        Tile::Launch => color::PURPLE,
    }
}

fn team_color(team: TeamColor) -> Srgb<u8> {
    match team {
        TeamColor::Yellow => color::GOLD,
        TeamColor::Green => color::DARKGREEN,
        TeamColor::Red => color::DARKRED,
        TeamColor::Blue => color::NAVY,
    }
}

fn view(app: &nannou::App, model: &Model, frame: nannou::frame::Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let window_rect = app.window_rect();
    let board_width = window_rect.w() - PANEL_WIDTH;
    let tile = (board_width.min(window_rect.h()) / GRID_SIZE as f32).max(1.0);
    let (left, top) = (window_rect.left(), window_rect.top());
    let center = |(row, col): GridPos| {
        (
            left + (col as f32 + 0.5) * tile,
            top - (row as f32 + 0.5) * tile,
        )
    };

    // Board
    for (row, tiles) in model.grid.iter().enumerate() {
        for (col, &kind) in tiles.iter().enumerate() {
            let (x, y) = center((row as u8, col as u8));
            draw.rect()
                .x_y(x, y)
                .w_h(tile - 1.0, tile - 1.0)
                .color(tile_color(kind));
        }
    }

    // Pieces. Tokens sharing a tile are spread out so each label stays readable.
    for (i, token) in model.snapshot.tokens.iter().enumerate() {
        let stacked = model.snapshot.tokens[..i]
            .iter()
            .filter(|other| other.position == token.position)
            .count();
        let (x, y) = center(token.position);
        let x = x + stacked as f32 * tile * 0.25;
        draw.ellipse()
            .x_y(x, y)
            .w_h(tile * 0.8, tile * 0.8)
            .color(team_color(token.team));
        draw.text(&token.label)
            .x_y(x, y)
            .font_size((tile / 2.5) as u32)
            .color(WHITE);
    }

    // Status panel
    let panel_x = window_rect.right() - PANEL_WIDTH / 2.0;
    let mut y = window_rect.top() - 40.0;
    let mut line = |text: &str, size: u32| {
        draw.text(text)
            .x_y(panel_x, y)
            .w(PANEL_WIDTH - 20.0)
            .font_size(size)
            .color(WHITE);
        y -= 30.0;
    };

    line("Parchis", 30);
    let snapshot = &model.snapshot;
    match snapshot.outcome {
        GameOutcome::Won(team) => line(&format!("Team {} has won!", team), 18),
        GameOutcome::Ongoing => line(&format!("Turn: {}", snapshot.active_team), 16),
    }
    match snapshot.last_roll {
        Some(dice) => line(&format!("Last roll: {}", dice), 16),
        None => line("Last roll: -", 16),
    }
    for (team, home) in &snapshot.home {
        line(&format!("{} home: {}/4", team, home), 16);
    }
    for (team, steps) in &snapshot.bonus {
        line(&format!("{} bonus: {}", team, steps), 16);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        error!("Could not draw the board: {:?}", err);
    }
}
