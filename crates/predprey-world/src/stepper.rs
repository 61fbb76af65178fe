//! Two-phase grid transition.
//!
//! Every prey of the committed grid acts first, then every predator, both in
//! row-major order. All neighbor queries read the committed grid; all writes
//! go to a [`StagedGrid`] seeded from it, so a predator never sees a prey
//! move that happened earlier in the same step. When two writes target the
//! same cell the later one in this order wins.

use crate::grid::Grid;
use crate::predator::{apply_predator, PredatorOutcome};
use crate::prey::apply_prey;
use crate::staging::StagedGrid;
use predprey_core::{CellStatus, StepEvents};
use rand::Rng;

/// Compute the grid that follows `current`
pub fn step_grid<R: Rng + ?Sized>(current: &Grid, rng: &mut R) -> (Grid, StepEvents) {
    let mut staged = StagedGrid::new(current);
    let mut events = StepEvents::default();

    for origin in current.coords_with(CellStatus::Prey) {
        if let Some(outcome) = apply_prey(origin, current, &mut staged, rng) {
            if outcome.offspring.is_some() {
                events.prey_births += 1;
            }
            if outcome.moved(origin) {
                events.prey_moves += 1;
            }
        }
    }

    for origin in current.coords_with(CellStatus::Predator) {
        match apply_predator(origin, current, &mut staged, rng) {
            Some(PredatorOutcome::Starved) => events.starvations += 1,
            Some(PredatorOutcome::Acted {
                destination,
                hunted,
                birth,
                ..
            }) => {
                if destination != origin {
                    events.predator_moves += 1;
                }
                if hunted {
                    events.hunts += 1;
                }
                if birth.is_some() {
                    events.predator_births += 1;
                }
            }
            None => {}
        }
    }

    (staged.commit(), events)
}
