//! Console rendering of the grid.
//!
//! One symbol per cell followed by a space; odd rows are shifted right by a
//! space so the stagger of the hex lattice shows.

use crate::grid::Grid;
use std::fmt;

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows() {
            if row % 2 != 0 {
                write!(f, " ")?;
            }
            for cell in self.row(row) {
                write!(f, "{} ", cell.status.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Render a grid followed by a blank separator line
pub fn render(grid: &Grid) -> String {
    format!("{}\n", grid)
}
