//! World simulation engine.
//!
//! This module implements the hexagonal grid where prey and predators
//! reproduce, hunt and starve, one double-buffered step at a time.

pub mod grid;
pub mod hex;
pub mod staging;
pub mod prey;
pub mod predator;
pub mod stepper;
pub mod simulation;
pub mod render;
pub mod snapshot;

pub use grid::Grid;
pub use hex::Neighborhood;
pub use prey::{apply_prey, PreyOutcome};
pub use predator::{apply_predator, PredatorBirth, PredatorOutcome};
pub use render::render;
pub use simulation::{Simulation, StepReport};
pub use snapshot::Snapshot;
pub use staging::StagedGrid;
pub use stepper::step_grid;
