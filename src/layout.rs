//! Static layout of the board window: a 23 by 23 grid of coloured tiles and
//! the grid position of every place a piece can be.

use crate::parchis::{PieceState, TeamColor, ARRIVAL_SLOT, PIECES_PER_TEAM, TRACK_LENGTH};

pub const GRID_SIZE: usize = 23;

/// Position on the grid as `(row, col)`.
pub type GridPos = (u8, u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Empty,
    Path,
    Yellow,
    Green,
    Red,
    Blue,
    YellowLane,
    GreenLane,
    RedLane,
    BlueLane,
    Safe,
    Launch,
}

impl Tile {
    pub fn from_code(code: &str) -> Option<Tile> {
        match code {
            "W" => Some(Tile::Empty),
            "HW" => Some(Tile::Path),
            "Y" => Some(Tile::Yellow),
            "G" => Some(Tile::Green),
            "R" => Some(Tile::Red),
            "B" => Some(Tile::Blue),
            "HY" => Some(Tile::YellowLane),
            "HG" => Some(Tile::GreenLane),
            "HR" => Some(Tile::RedLane),
            "HB" => Some(Tile::BlueLane),
            "BR" => Some(Tile::Safe),
            "GO" => Some(Tile::Launch),
            _ => None,
        }
    }
}

const GRID: [&str; 23] = [
    "W W W W W W HW Y Y Y BR BR BR B B B HW W W W W W W",
    "W W W W W W HW Y Y Y HY HY HY B B B HW W W W W W W",
    "W W W W W W HW Y Y Y HY HY HY B B B HW W W W W W W",
    "W W W W W W HW Y Y Y HY HY HY B B B HW W W W W W W",
    "W W W W W W HW GO GO GO HY HY HY BR BR BR HW W W W W W W",
    "W W W W W W HW Y Y Y HY HY HY B B B HW W W W W W W",
    "HW HW HW HW HW HW HW Y Y Y HY HY HY B B B HW HW HW HW HW HW HW",
    "Y Y Y Y BR Y Y Y Y Y HY HY HY B B B B B GO B B B B",
    "Y Y Y Y BR Y Y Y Y HW Y Y Y HW B B B B GO B B B B",
    "Y Y Y Y BR Y Y Y HW W W W W W HW B B B GO B B B B",
    "BR HG HG HG HG HG HG HG G W HW HW HW W B HB HB HB HB HB HB HB BR",
    "BR HG HG HG HG HG HG HG G W HW W HW W B HB HB HB HB HB HB HB BR",
    "BR HG HG HG HG HG HG HG G W HW HW HW W B HB HB HB HB HB HB HB BR",
    "G G G G GO G G G HW W W W W W HW R R R BR R R R R",
    "G G G G GO G G G G HW R R R HW R R R R BR R R R R",
    "G G G G GO G G G G G HR HR HR R R R R R BR R R R R",
    "HW HW HW HW HW HW HW G G G HR HR HR R R R HW HW HW HW HW HW HW",
    "W W W W W W HW G G G HR HR HR R R R HW W W W W W W",
    "W W W W W W HW BR BR BR HR HR HR GO GO GO HW W W W W W W",
    "W W W W W W HW G G G HR HR HR R R R HW W W W W W W",
    "W W W W W W HW G G G HR HR HR R R R HW W W W W W W",
    "W W W W W W HW G G G HR HR HR R R R HW W W W W W W",
    "W W W W W W HW G G G BR BR BR R R R HW W W W W W W",
];

/// Grid position of every outer cell. Cell `c` uses entry `c % 68`.
const TRACK: [(u8, u8); TRACK_LENGTH as usize] = [
    (0, 8), (1, 8), (2, 8), (3, 8), (4, 8), (5, 8), (6, 8), (7, 8),
    (8, 7), (8, 6), (8, 5), (8, 4), (8, 3), (8, 2), (8, 1), (8, 0),
    (11, 0), (14, 0), (14, 1), (14, 2), (14, 3), (14, 4), (14, 5), (14, 6),
    (14, 7), (15, 8), (16, 8), (17, 8), (18, 8), (19, 8), (20, 8), (21, 8),
    (22, 8), (22, 11), (22, 14), (21, 14), (20, 14), (19, 14), (18, 14), (17, 14),
    (16, 14), (15, 14), (14, 15), (14, 16), (14, 17), (14, 18), (14, 19), (14, 20),
    (14, 21), (14, 22), (11, 22), (8, 22), (8, 21), (8, 20), (8, 19), (8, 18),
    (8, 17), (8, 16), (8, 15), (7, 14), (6, 14), (5, 14), (4, 14), (3, 14),
    (2, 14), (1, 14), (0, 14), (0, 11),
];

const INTERNAL: [[GridPos; 8]; 4] = [
    [(11, 1), (11, 2), (11, 3), (11, 4), (11, 5), (11, 6), (11, 7), (11, 8)],
    [(1, 11), (2, 11), (3, 11), (4, 11), (5, 11), (6, 11), (7, 11), (8, 11)],
    [(11, 21), (11, 20), (11, 19), (11, 18), (11, 17), (11, 16), (11, 15), (11, 14)],
    [(21, 11), (20, 11), (19, 11), (18, 11), (17, 11), (16, 11), (15, 11), (14, 11)],
];

const JAIL: [[GridPos; PIECES_PER_TEAM]; 4] = [
    [(2, 2), (3, 2), (2, 3), (3, 3)],
    [(19, 2), (20, 2), (19, 3), (20, 3)],
    [(19, 19), (20, 19), (19, 20), (20, 20)],
    [(2, 19), (3, 19), (2, 20), (3, 20)],
];

fn team_row(team: TeamColor) -> usize {
    match team {
        TeamColor::Yellow => 0,
        TeamColor::Green => 1,
        TeamColor::Red => 2,
        TeamColor::Blue => 3,
    }
}

/// Tiles of the board, row by row. Unknown codes are drawn as empty tiles.
pub fn grid() -> Vec<Vec<Tile>> {
    GRID.iter()
        .map(|row| {
            row.split_whitespace()
                .map(|code| Tile::from_code(code).unwrap_or(Tile::Empty))
                .collect()
        })
        .collect()
}

pub fn track_position(cell: u8) -> GridPos {
    TRACK[(cell % TRACK_LENGTH) as usize]
}

pub fn internal_position(team: TeamColor, slot: u8) -> GridPos {
    INTERNAL[team_row(team)][slot.min(ARRIVAL_SLOT) as usize]
}

pub fn jail_position(team: TeamColor, number: u8) -> GridPos {
    JAIL[team_row(team)][number as usize % PIECES_PER_TEAM]
}

/// Where a piece is drawn. Pieces at home sit on the arrival slot.
pub fn position(team: TeamColor, number: u8, state: PieceState) -> GridPos {
    match state {
        PieceState::Jailed => jail_position(team, number),
        PieceState::OnTrack(cell) => track_position(cell),
        PieceState::OnInternalTrack(slot) => internal_position(team, slot),
        PieceState::Home => internal_position(team, ARRIVAL_SLOT),
    }
}
