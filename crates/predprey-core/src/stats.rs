//! Population statistics and per-step event counters.

use crate::{Cell, CellStatus};
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Head count of a grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    pub prey: usize,
    pub predators: usize,
    pub dead: usize,
    /// Sum of energy over all predators
    pub total_predator_energy: i64,
}

impl Census {
    pub fn from_cells<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> Self {
        let mut census = Self::default();
        for cell in cells {
            match cell.status {
                CellStatus::Dead => census.dead += 1,
                CellStatus::Prey => census.prey += 1,
                CellStatus::Predator => {
                    census.predators += 1;
                    census.total_predator_energy += cell.energy as i64;
                }
            }
        }
        census
    }

    pub fn total_population(&self) -> usize {
        self.prey + self.predators
    }

    /// No organism left; the grid cannot change any more
    pub fn is_extinct(&self) -> bool {
        self.total_population() == 0
    }

    pub fn avg_predator_energy(&self) -> f64 {
        if self.predators == 0 {
            0.0
        } else {
            self.total_predator_energy as f64 / self.predators as f64
        }
    }
}

/// What happened during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepEvents {
    pub prey_births: u64,
    pub prey_moves: u64,
    pub predator_births: u64,
    pub predator_moves: u64,
    /// Predators that moved onto a prey cell
    pub hunts: u64,
    pub starvations: u64,
}

impl StepEvents {
    /// True when nothing was born, eaten or starved
    pub fn is_quiet(&self) -> bool {
        self.prey_births == 0
            && self.predator_births == 0
            && self.hunts == 0
            && self.starvations == 0
    }
}

impl AddAssign for StepEvents {
    fn add_assign(&mut self, other: Self) {
        self.prey_births += other.prey_births;
        self.prey_moves += other.prey_moves;
        self.predator_births += other.predator_births;
        self.predator_moves += other.predator_moves;
        self.hunts += other.hunts;
        self.starvations += other.starvations;
    }
}

/// Outcome of a whole run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub seed: u64,
    pub steps_run: u64,
    pub final_census: Census,
    pub totals: StepEvents,
    pub peak_prey: usize,
    pub peak_predators: usize,
    /// First step after which the grid held no organisms
    pub extinct_at: Option<u64>,
}

impl RunSummary {
    pub fn new(seed: u64, initial: Census) -> Self {
        Self {
            seed,
            final_census: initial,
            peak_prey: initial.prey,
            peak_predators: initial.predators,
            ..Default::default()
        }
    }

    /// Fold one finished step into the summary
    pub fn record(&mut self, step: u64, events: StepEvents, census: Census) {
        self.steps_run += 1;
        self.totals += events;
        self.final_census = census;
        self.peak_prey = self.peak_prey.max(census.prey);
        self.peak_predators = self.peak_predators.max(census.predators);
        if census.is_extinct() && self.extinct_at.is_none() {
            self.extinct_at = Some(step);
        }
    }
}
