//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a cell in offset coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Apply a signed offset, returning `None` when the result leaves a
    /// `rows` x `cols` grid
    pub fn offset(&self, d_row: isize, d_col: isize, rows: usize, cols: usize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        if row < rows && col < cols {
            Some(Self { row, col })
        } else {
            None
        }
    }

    pub fn is_even_row(&self) -> bool {
        self.row % 2 == 0
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// What occupies a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellStatus {
    #[default]
    Dead,
    Prey,
    Predator,
}

impl CellStatus {
    /// Console symbol for this status
    pub fn symbol(&self) -> char {
        match self {
            CellStatus::Dead => '-',
            CellStatus::Prey => 'P',
            CellStatus::Predator => 'X',
        }
    }
}

/// Cell state.
///
/// `energy` only means something for predators and `reproduction_cooldown`
/// only for prey; the other field stays at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub status: CellStatus,
    pub energy: i32,
    pub reproduction_cooldown: i32,
}

impl Cell {
    pub fn dead() -> Self {
        Self::default()
    }

    pub fn prey(reproduction_cooldown: i32) -> Self {
        Self {
            status: CellStatus::Prey,
            energy: 0,
            reproduction_cooldown,
        }
    }

    pub fn predator(energy: i32) -> Self {
        Self {
            status: CellStatus::Predator,
            energy,
            reproduction_cooldown: 0,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.status == CellStatus::Dead
    }

    pub fn is_prey(&self) -> bool {
        self.status == CellStatus::Prey
    }

    pub fn is_predator(&self) -> bool {
        self.status == CellStatus::Predator
    }

    /// A predator with no energy left dies before it can act
    pub fn is_starving(&self) -> bool {
        self.is_predator() && self.energy <= 0
    }
}
