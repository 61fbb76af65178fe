//! 2D grid for the world.

use crate::hex;
use predprey_core::{
    Cell, CellStatus, Census, Coord, Error, PopulationConfig, Result, WorldConfig,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A bounded rectangular grid holding a hexagonal lattice in offset coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// An all-dead grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::dead(); rows * cols],
        }
    }

    /// Build a grid from explicit rows, which must all have the same length
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self> {
        let num_rows = rows.len();
        let num_cols = rows.first().map(Vec::len).unwrap_or(0);
        if num_rows == 0 || num_cols == 0 {
            return Err(Error::Validation("Grid must not be empty".to_string()));
        }

        let mut cells = Vec::with_capacity(num_rows * num_cols);
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != num_cols {
                return Err(Error::Validation(format!(
                    "Row {} has {} cells, expected {}",
                    idx,
                    row.len(),
                    num_cols
                )));
            }
            cells.extend(row);
        }

        Ok(Self {
            rows: num_rows,
            cols: num_cols,
            cells,
        })
    }

    /// Create a grid with a randomly placed population.
    ///
    /// Prey go down first, then predators. Coordinates are drawn
    /// independently, so a later placement overwrites an earlier one and
    /// the resulting population can be smaller than requested.
    pub fn from_config<R: Rng + ?Sized>(
        world: &WorldConfig,
        population: &PopulationConfig,
        rng: &mut R,
    ) -> Self {
        let mut grid = Self::new(world.rows, world.cols);
        if grid.rows == 0 || grid.cols == 0 {
            return grid;
        }

        for _ in 0..population.num_prey {
            let coord = grid.random_coord(rng);
            grid.set(coord, Cell::prey(0));
        }

        for _ in 0..population.num_predators {
            let coord = grid.random_coord(rng);
            grid.set(coord, Cell::predator(population.initial_predator_energy));
        }

        grid
    }

    fn random_coord<R: Rng + ?Sized>(&self, rng: &mut R) -> Coord {
        Coord::new(rng.gen_range(0..self.rows), rng.gen_range(0..self.cols))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Get the cell at a coordinate, if it is on the grid
    pub fn get(&self, coord: Coord) -> Option<&Cell> {
        if self.contains(coord) {
            Some(&self.cells[self.coord_to_index(coord)])
        } else {
            None
        }
    }

    /// Cell at an on-grid coordinate.
    ///
    /// Callers pass coordinates that came from this grid (neighbor lookups,
    /// `iter`); an off-grid coordinate panics.
    pub fn cell(&self, coord: Coord) -> &Cell {
        &self.cells[self.coord_to_index(coord)]
    }

    pub fn cell_mut(&mut self, coord: Coord) -> &mut Cell {
        let index = self.coord_to_index(coord);
        &mut self.cells[index]
    }

    /// Overwrite an on-grid cell
    pub fn set(&mut self, coord: Coord, cell: Cell) {
        *self.cell_mut(coord) = cell;
    }

    /// On-grid hex neighbors of a coordinate, in offset-table order
    pub fn neighbors(&self, coord: Coord) -> Vec<Coord> {
        hex::neighbors(coord, self.rows, self.cols)
    }

    /// Check that the cell buffer matches the declared dimensions
    pub fn validate(&self) -> Result<()> {
        let expected = self.rows.checked_mul(self.cols).ok_or_else(|| {
            Error::InvalidState(format!(
                "Grid dimensions {}x{} overflow",
                self.rows, self.cols
            ))
        })?;
        if self.cells.len() != expected {
            return Err(Error::InvalidState(format!(
                "Grid declares {}x{} but holds {} cells",
                self.rows,
                self.cols,
                self.cells.len()
            )));
        }
        Ok(())
    }

    fn coord_to_index(&self, coord: Coord) -> usize {
        debug_assert!(self.contains(coord), "{} is off a {}x{} grid", coord, self.rows, self.cols);
        coord.row * self.cols + coord.col
    }

    fn index_to_coord(&self, index: usize) -> Coord {
        Coord::new(index / self.cols, index % self.cols)
    }

    /// Iterator over all cells with coordinates, row-major
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.index_to_coord(i), cell))
    }

    /// Row-major coordinates of every cell with the given status
    pub fn coords_with(&self, status: CellStatus) -> Vec<Coord> {
        self.iter()
            .filter(|(_, cell)| cell.status == status)
            .map(|(coord, _)| coord)
            .collect()
    }

    /// Borrow one row of cells
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    pub fn census(&self) -> Census {
        Census::from_cells(&self.cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(10, 12);
        assert_eq!(grid.rows(), 10);
        assert_eq!(grid.cols(), 12);
        assert_eq!(grid.cells.len(), 120);
        assert!(grid.census().is_extinct());
    }

    #[test]
    fn test_from_rows() {
        let grid = Grid::from_rows(vec![
            vec![Cell::dead(), Cell::prey(1)],
            vec![Cell::predator(4), Cell::dead()],
        ])
        .unwrap();

        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 2);
        assert_eq!(*grid.cell(Coord::new(0, 1)), Cell::prey(1));
        assert_eq!(*grid.cell(Coord::new(1, 0)), Cell::predator(4));
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let result = Grid::from_rows(vec![vec![Cell::dead(); 3], vec![Cell::dead(); 2]]);
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_from_rows_rejects_empty() {
        assert!(Grid::from_rows(vec![]).is_err());
        assert!(Grid::from_rows(vec![vec![]]).is_err());
    }

    #[test]
    fn test_get_out_of_bounds() {
        let grid = Grid::new(3, 4);
        assert!(grid.get(Coord::new(2, 3)).is_some());
        assert!(grid.get(Coord::new(3, 0)).is_none());
        assert!(grid.get(Coord::new(0, 4)).is_none());
    }

    #[test]
    fn test_iter_is_row_major() {
        let grid = Grid::new(2, 3);
        let coords: Vec<Coord> = grid.iter().map(|(coord, _)| coord).collect();
        assert_eq!(coords[0], Coord::new(0, 0));
        assert_eq!(coords[2], Coord::new(0, 2));
        assert_eq!(coords[3], Coord::new(1, 0));
        assert_eq!(coords.len(), 6);
    }

    #[test]
    fn test_coords_with_status() {
        let mut grid = Grid::new(4, 4);
        grid.set(Coord::new(3, 1), Cell::prey(0));
        grid.set(Coord::new(0, 2), Cell::prey(0));
        grid.set(Coord::new(2, 2), Cell::predator(5));

        assert_eq!(
            grid.coords_with(CellStatus::Prey),
            vec![Coord::new(0, 2), Coord::new(3, 1)]
        );
        assert_eq!(grid.coords_with(CellStatus::Predator), vec![Coord::new(2, 2)]);
    }

    #[test]
    fn test_grid_from_config() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let world = WorldConfig { rows: 20, cols: 20 };
        let population = PopulationConfig {
            num_prey: 30,
            num_predators: 10,
            initial_predator_energy: 5,
        };

        let grid = Grid::from_config(&world, &population, &mut rng);
        let census = grid.census();

        assert_eq!(census.prey + census.predators + census.dead, 400);
        assert!(census.prey > 0 && census.prey <= 30);
        assert!(census.predators > 0 && census.predators <= 10);

        for (_, cell) in grid.iter().filter(|(_, c)| c.is_predator()) {
            assert_eq!(cell.energy, 5);
        }
    }

    #[test]
    fn test_from_config_is_deterministic() {
        let world = WorldConfig::default();
        let population = PopulationConfig::default();
        let a = Grid::from_config(&world, &population, &mut ChaCha8Rng::seed_from_u64(7));
        let b = Grid::from_config(&world, &population, &mut ChaCha8Rng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_validate_detects_mismatch() {
        let mut grid = Grid::new(2, 2);
        assert!(grid.validate().is_ok());
        grid.cells.pop();
        assert!(matches!(grid.validate(), Err(Error::InvalidState(_))));
    }

    #[test]
    fn test_validate_rejects_overflowing_dimensions() {
        let grid = Grid {
            rows: usize::MAX,
            cols: 2,
            cells: Vec::new(),
        };
        assert!(matches!(grid.validate(), Err(Error::InvalidState(_))));
    }
}
