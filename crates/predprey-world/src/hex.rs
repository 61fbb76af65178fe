//! Hexagonal adjacency on a rectangular array.
//!
//! Rows are staggered, so the six neighbors of a cell depend on whether its
//! row is even or odd. The offset tables below are `(row delta, column
//! delta)` pairs, and their order is the order in which neighbors are
//! returned and sampled.
//!
//! The two tables mirror each other across the stagger, so adjacency is
//! reciprocal even though the raw offsets differ between rows.

use crate::grid::Grid;
use predprey_core::{CellStatus, Coord};

pub const EVEN_ROW_OFFSETS: [(isize, isize); 6] =
    [(-1, -1), (-1, 0), (0, -1), (0, 1), (1, -1), (1, 0)];

pub const ODD_ROW_OFFSETS: [(isize, isize); 6] =
    [(-1, 0), (-1, 1), (0, -1), (0, 1), (1, 0), (1, 1)];

pub fn offsets_for(coord: Coord) -> &'static [(isize, isize); 6] {
    if coord.is_even_row() {
        &EVEN_ROW_OFFSETS
    } else {
        &ODD_ROW_OFFSETS
    }
}

/// Neighbors of `coord` that fall inside a `rows` x `cols` grid
pub fn neighbors(coord: Coord, rows: usize, cols: usize) -> Vec<Coord> {
    offsets_for(coord)
        .iter()
        .filter_map(|&(d_row, d_col)| coord.offset(d_row, d_col, rows, cols))
        .collect()
}

/// Neighbors of a cell split by what occupies them, each list keeping
/// offset-table order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Neighborhood {
    pub prey: Vec<Coord>,
    pub empty: Vec<Coord>,
    pub predators: Vec<Coord>,
}

impl Neighborhood {
    pub fn survey(grid: &Grid, coord: Coord) -> Self {
        let mut neighborhood = Self::default();
        for neighbor in grid.neighbors(coord) {
            match grid.cell(neighbor).status {
                CellStatus::Prey => neighborhood.prey.push(neighbor),
                CellStatus::Dead => neighborhood.empty.push(neighbor),
                CellStatus::Predator => neighborhood.predators.push(neighbor),
            }
        }
        neighborhood
    }
}
