use std::fmt;

use crate::{misc::TinyVec, parchis::PieceId};

pub const TRACK_LENGTH: u8 = 68;
pub const CELL_CAPACITY: usize = 2;

/// Launch cells and the cell seven steps after each of them. No capture can happen here.
pub const SAFE_CELLS: [u8; 8] = [4, 11, 21, 28, 38, 45, 55, 62];

pub type Cell = TinyVec<PieceId, CELL_CAPACITY>;

pub fn is_safe(cell: u8) -> bool {
    SAFE_CELLS.contains(&cell)
}

/// Cell reached after `steps` from `cell`, wrapping past 68 back to 1.
pub fn advance(cell: u8, steps: u32) -> u8 {
    ((cell as u32 - 1 + steps) % TRACK_LENGTH as u32 + 1) as u8
}

/// Steps needed to go from `from` to `to` moving forward around the track.
pub fn distance(from: u8, to: u8) -> u32 {
    (to as i32 - from as i32).rem_euclid(TRACK_LENGTH as i32) as u32
}

/// The shared outer track. Cells are numbered `1..=68` and hold at most two pieces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; TRACK_LENGTH as usize],
}

impl Board {
    pub fn new() -> Self {
        Board {
            cells: [Cell::new(); TRACK_LENGTH as usize],
        }
    }

    fn index(cell: u8) -> usize {
        assert!(
            (1..=TRACK_LENGTH).contains(&cell),
            "cell {} is not on the track",
            cell
        );
        cell as usize - 1
    }

    pub fn occupants(&self, cell: u8) -> &Cell {
        &self.cells[Self::index(cell)]
    }

    pub fn has_space(&self, cell: u8) -> bool {
        !self.occupants(cell).is_full()
    }

    /// Puts a piece on a cell. Legal move validation must have checked
    /// [`Self::has_space`] first; a third piece on a cell is an engine bug.
    pub fn place(&mut self, cell: u8, piece: PieceId) {
        if self.cells[Self::index(cell)].push(piece).is_err() {
            panic!("cell {} already holds {} pieces, cannot place {}", cell, CELL_CAPACITY, piece);
        }
    }

    pub fn remove(&mut self, cell: u8, piece: PieceId) -> bool {
        self.cells[Self::index(cell)].remove(&piece)
    }

    pub fn relocate(&mut self, from: u8, to: u8, piece: PieceId) {
        self.remove(from, piece);
        self.place(to, piece);
    }

    /// Occupied cells in track order.
    pub fn occupied(&self) -> impl Iterator<Item = (u8, &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(i, cell)| (i as u8 + 1, cell))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (cell, pieces) in self.occupied() {
            write!(f, "{}:[", cell)?;
            for (i, piece) in pieces.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", piece)?;
            }
            write!(f, "]  ")?;
        }
        Ok(())
    }
}
