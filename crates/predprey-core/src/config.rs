//! Configuration types for the simulation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Cooldown a prey receives after producing offspring
pub const PREY_REPRODUCTION_COOLDOWN: i32 = 2;
/// Energy a predator spends every step it acts
pub const PREDATOR_MOVE_COST: i32 = 1;
/// Energy a predator gains from eating a prey
pub const PREDATOR_HUNT_GAIN: i32 = 5;
/// Minimum energy both parents need for paired reproduction
pub const PREDATOR_REPRODUCTION_THRESHOLD: i32 = 5;
/// Energy deducted from each parent after reproduction
pub const PREDATOR_REPRODUCTION_COST: i32 = 3;
/// Starting energy of a newborn predator
pub const PREDATOR_OFFSPRING_ENERGY: i32 = 5;

/// World configuration parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Number of grid rows
    pub rows: usize,
    /// Number of grid columns
    pub cols: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self { rows: 10, cols: 10 }
    }
}

/// Initial population
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Prey placement attempts (repeated coordinates overwrite)
    pub num_prey: usize,
    /// Predator placement attempts, placed after prey
    pub num_predators: usize,
    /// Energy given to seeded predators
    pub initial_predator_energy: i32,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            num_prey: 10,
            num_predators: 6,
            initial_predator_energy: 5,
        }
    }
}

/// Full run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Random seed for reproducibility; drawn from OS entropy when absent
    pub seed: Option<u64>,
    /// Number of steps to run
    pub num_steps: u64,
    pub world: WorldConfig,
    pub population: PopulationConfig,
    /// Print the grid before every step
    pub render: bool,
    /// Emit a population log record every this many steps
    pub log_interval: u64,
    /// Write a snapshot here once the run finishes
    pub snapshot_path: Option<String>,
    /// Resume from this snapshot instead of seeding a fresh grid
    pub resume_from: Option<String>,
    /// End the run early once no organism is left
    pub stop_when_extinct: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            num_steps: 20,
            world: WorldConfig::default(),
            population: PopulationConfig::default(),
            render: true,
            log_interval: 1,
            snapshot_path: None,
            resume_from: None,
            stop_when_extinct: false,
        }
    }
}

impl SimulationConfig {
    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading simulation config");
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.world.rows == 0 || self.world.cols == 0 {
            return Err(Error::Validation(format!(
                "Grid must have at least one row and one column, got {}x{}",
                self.world.rows, self.world.cols
            )));
        }

        if self.log_interval == 0 {
            return Err(Error::Validation(
                "log_interval must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
