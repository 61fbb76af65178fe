//! Prey behavior: reproduce next to another prey, then wander.

use crate::grid::Grid;
use crate::hex::Neighborhood;
use crate::staging::StagedGrid;
use predprey_core::{Cell, Coord, PREY_REPRODUCTION_COOLDOWN};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

/// What a prey did during its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreyOutcome {
    /// Where the prey was written; equal to its origin when boxed in
    pub destination: Coord,
    /// Cell that received an offspring, if any
    pub offspring: Option<Coord>,
}

impl PreyOutcome {
    pub fn moved(&self, origin: Coord) -> bool {
        self.destination != origin
    }
}

/// Apply the prey rule to the cell at `origin`.
///
/// Returns `None` unless the cell is prey in `current`. The offspring cell
/// and the movement target are drawn independently from the empty
/// neighbors; when they coincide the moving parent overwrites its offspring.
pub fn apply_prey<R: Rng + ?Sized>(
    origin: Coord,
    current: &Grid,
    staged: &mut StagedGrid,
    rng: &mut R,
) -> Option<PreyOutcome> {
    let cell = current.get(origin)?;
    if !cell.is_prey() {
        return None;
    }

    let neighborhood = Neighborhood::survey(current, origin);

    let mut cooldown = (cell.reproduction_cooldown - 1).max(0);
    let mut offspring = None;
    if !neighborhood.prey.is_empty() && cell.reproduction_cooldown == 0 {
        if let Some(&birthplace) = neighborhood.empty.choose(rng) {
            staged.write(birthplace, Cell::prey(0));
            cooldown = PREY_REPRODUCTION_COOLDOWN;
            offspring = Some(birthplace);
            trace!(parent = %origin, offspring = %birthplace, "Prey reproduced");
        }
    }

    let destination = neighborhood.empty.choose(rng).copied().unwrap_or(origin);
    staged.write(destination, Cell::prey(cooldown));
    if destination != origin {
        staged.vacate(origin);
    }

    Some(PreyOutcome {
        destination,
        offspring,
    })
}
