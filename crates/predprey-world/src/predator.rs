//! Predator behavior: starve, hunt or wander, then breed with a well-fed
//! neighbor.

use crate::grid::Grid;
use crate::hex::Neighborhood;
use crate::staging::StagedGrid;
use predprey_core::{
    Cell, Coord, PREDATOR_HUNT_GAIN, PREDATOR_MOVE_COST, PREDATOR_OFFSPRING_ENERGY,
    PREDATOR_REPRODUCTION_COST, PREDATOR_REPRODUCTION_THRESHOLD,
};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

/// A successful paired reproduction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredatorBirth {
    /// Pre-step coordinate of the partner
    pub partner: Coord,
    /// Cell that received the newborn
    pub birthplace: Coord,
}

/// What a predator did during its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredatorOutcome {
    /// Energy was already exhausted; the cell is now dead
    Starved,
    Acted {
        destination: Coord,
        hunted: bool,
        /// Energy after movement and feeding, before any reproduction cost
        energy: i32,
        birth: Option<PredatorBirth>,
    },
}

/// Apply the predator rule to the cell at `origin`.
///
/// Returns `None` unless the cell is a predator in `current`. Partner
/// selection reads pre-step energy from `current`; the newborn goes to the
/// first empty neighbor that nothing has claimed in `staged` yet.
pub fn apply_predator<R: Rng + ?Sized>(
    origin: Coord,
    current: &Grid,
    staged: &mut StagedGrid,
    rng: &mut R,
) -> Option<PredatorOutcome> {
    let cell = current.get(origin)?;
    if !cell.is_predator() {
        return None;
    }

    if cell.is_starving() {
        staged.vacate(origin);
        trace!(predator = %origin, energy = cell.energy, "Predator starved");
        return Some(PredatorOutcome::Starved);
    }

    let neighborhood = Neighborhood::survey(current, origin);

    let (destination, hunted) = match neighborhood.prey.choose(rng) {
        Some(&target) => (target, true),
        None => match neighborhood.empty.choose(rng) {
            Some(&target) => (target, false),
            None => (origin, false),
        },
    };

    let gain = if hunted { PREDATOR_HUNT_GAIN } else { 0 };
    let new_energy = cell.energy - PREDATOR_MOVE_COST + gain;
    let owed = staged.take_pending_debit(origin);

    staged.write(destination, Cell::predator(new_energy - owed));
    if destination != origin {
        staged.vacate(origin);
    }
    staged.record_relocation(origin, destination);

    let birth = if new_energy >= PREDATOR_REPRODUCTION_THRESHOLD {
        reproduce(origin, destination, current, &neighborhood, staged)
    } else {
        None
    };

    Some(PredatorOutcome::Acted {
        destination,
        hunted,
        energy: new_energy,
        birth,
    })
}

fn reproduce(
    origin: Coord,
    destination: Coord,
    current: &Grid,
    neighborhood: &Neighborhood,
    staged: &mut StagedGrid,
) -> Option<PredatorBirth> {
    let partner = neighborhood
        .predators
        .iter()
        .copied()
        .find(|&p| current.cell(p).energy >= PREDATOR_REPRODUCTION_THRESHOLD)?;

    let Some(birthplace) = neighborhood
        .empty
        .iter()
        .copied()
        .find(|&c| staged.is_vacant(c))
    else {
        trace!(predator = %origin, partner = %partner, "No room for offspring");
        return None;
    };

    staged.write(birthplace, Cell::predator(PREDATOR_OFFSPRING_ENERGY));
    staged.debit_predator(origin, PREDATOR_REPRODUCTION_COST);
    staged.debit_predator(partner, PREDATOR_REPRODUCTION_COST);

    trace!(
        predator = %origin,
        destination = %destination,
        partner = %partner,
        offspring = %birthplace,
        "Predators reproduced"
    );

    Some(PredatorBirth {
        partner,
        birthplace,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn run(grid: &Grid, origin: Coord, seed: u64) -> (Option<PredatorOutcome>, Grid) {
        let mut staged = StagedGrid::new(grid);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let outcome = apply_predator(origin, grid, &mut staged, &mut rng);
        (outcome, staged.commit())
    }

    #[test]
    fn test_non_predator_is_noop() {
        let mut grid = Grid::new(5, 5);
        grid.set(Coord::new(1, 1), Cell::prey(0));

        let (outcome, next) = run(&grid, Coord::new(1, 1), 0);
        assert!(outcome.is_none());
        assert_eq!(next, grid);
    }

    #[test]
    fn test_starvation() {
        let origin = Coord::new(3, 3);
        let mut grid = Grid::new(6, 6);
        grid.set(origin, Cell::predator(0));
        grid.set(Coord::new(2, 3), Cell::prey(0));

        let (outcome, next) = run(&grid, origin, 0);
        assert_eq!(outcome, Some(PredatorOutcome::Starved));
        assert!(next.cell(origin).is_dead());
        // Starving predators do not eat
        assert!(next.cell(Coord::new(2, 3)).is_prey());
    }

    #[test]
    fn test_wandering_costs_one_energy() {
        let origin = Coord::new(5, 5);
        let mut grid = Grid::new(10, 10);
        grid.set(origin, Cell::predator(3));

        for seed in 0..20 {
            let (outcome, next) = run(&grid, origin, seed);
            match outcome {
                Some(PredatorOutcome::Acted {
                    destination,
                    hunted,
                    energy,
                    birth,
                }) => {
                    assert!(!hunted);
                    assert!(birth.is_none());
                    assert_eq!(energy, 2);
                    assert!(grid.neighbors(origin).contains(&destination));
                    assert_eq!(*next.cell(destination), Cell::predator(2));
                    assert!(next.cell(origin).is_dead());
                }
                other => panic!("unexpected outcome {:?}", other),
            }
        }
    }

    #[test]
    fn test_hunting_prefers_prey() {
        let origin = Coord::new(5, 5);
        let prey = Coord::new(6, 6);
        let mut grid = Grid::new(10, 10);
        grid.set(origin, Cell::predator(2));
        grid.set(prey, Cell::prey(1));

        for seed in 0..20 {
            let (outcome, next) = run(&grid, origin, seed);
            assert_eq!(
                outcome,
                Some(PredatorOutcome::Acted {
                    destination: prey,
                    hunted: true,
                    energy: 6,
                    birth: None,
                })
            );
            assert_eq!(*next.cell(prey), Cell::predator(6));
            assert!(next.cell(origin).is_dead());
        }
    }

    #[test]
    fn test_surrounded_predator_stays() {
        let origin = Coord::new(0, 0);
        let mut grid = Grid::new(4, 4);
        grid.set(origin, Cell::predator(4));
        grid.set(Coord::new(0, 1), Cell::predator(1));
        grid.set(Coord::new(1, 0), Cell::predator(1));

        let (outcome, next) = run(&grid, origin, 0);
        assert_eq!(
            outcome,
            Some(PredatorOutcome::Acted {
                destination: origin,
                hunted: false,
                energy: 3,
                birth: None,
            })
        );
        assert_eq!(*next.cell(origin), Cell::predator(3));
    }

    #[test]
    fn test_paired_reproduction() {
        // (2, 2) is even: neighbors (1,1) (1,2) (2,1) (2,3) (3,1) (3,2)
        let origin = Coord::new(2, 2);
        let partner = Coord::new(2, 1);
        let mut grid = Grid::new(6, 6);
        grid.set(origin, Cell::predator(7));
        grid.set(partner, Cell::predator(6));

        for seed in 0..30 {
            let (outcome, next) = run(&grid, origin, seed);
            let Some(PredatorOutcome::Acted {
                destination,
                energy,
                birth: Some(birth),
                ..
            }) = outcome
            else {
                panic!("expected reproduction, got {:?}", outcome);
            };

            assert_eq!(energy, 6);
            assert_eq!(birth.partner, partner);
            assert_ne!(birth.birthplace, destination);
            assert_eq!(*next.cell(birth.birthplace), Cell::predator(5));
            // Acting parent: 7 - 1 - 3
            assert_eq!(*next.cell(destination), Cell::predator(3));
            // Partner has not acted; its charge is pending
            assert_eq!(*next.cell(partner), Cell::predator(6));
            assert_eq!(next.census().predators, 3);
        }
    }

    #[test]
    fn test_newborn_takes_first_unclaimed_empty_neighbor() {
        let origin = Coord::new(2, 2);
        let mut grid = Grid::new(6, 6);
        grid.set(origin, Cell::predator(7));
        grid.set(Coord::new(2, 1), Cell::predator(6));

        for seed in 0..30 {
            let (outcome, _) = run(&grid, origin, seed);
            let Some(PredatorOutcome::Acted {
                destination,
                birth: Some(birth),
                ..
            }) = outcome
            else {
                panic!("expected reproduction");
            };
            let expected = if destination == Coord::new(1, 1) {
                Coord::new(1, 2)
            } else {
                Coord::new(1, 1)
            };
            assert_eq!(birth.birthplace, expected);
        }
    }

    #[test]
    fn test_hungry_partner_blocks_reproduction() {
        let origin = Coord::new(2, 2);
        let mut grid = Grid::new(6, 6);
        grid.set(origin, Cell::predator(9));
        grid.set(Coord::new(2, 1), Cell::predator(4));

        let (outcome, next) = run(&grid, origin, 5);
        assert!(matches!(
            outcome,
            Some(PredatorOutcome::Acted { birth: None, energy: 8, .. })
        ));
        assert_eq!(next.census().predators, 2);
    }

    #[test]
    fn test_low_energy_blocks_reproduction() {
        // After the move cost the acting predator has 4
        let origin = Coord::new(2, 2);
        let mut grid = Grid::new(6, 6);
        grid.set(origin, Cell::predator(5));
        grid.set(Coord::new(2, 1), Cell::predator(9));

        let (outcome, _) = run(&grid, origin, 2);
        assert!(matches!(
            outcome,
            Some(PredatorOutcome::Acted { birth: None, energy: 4, .. })
        ));
    }

    #[test]
    fn test_no_room_blocks_reproduction() {
        // Corner predator: neighbors (0, 1) partner and (1, 0) prey
        let origin = Coord::new(0, 0);
        let mut grid = Grid::new(4, 4);
        grid.set(origin, Cell::predator(6));
        grid.set(Coord::new(0, 1), Cell::predator(6));
        grid.set(Coord::new(1, 0), Cell::prey(0));

        let (outcome, next) = run(&grid, origin, 0);
        assert_eq!(
            outcome,
            Some(PredatorOutcome::Acted {
                destination: Coord::new(1, 0),
                hunted: true,
                energy: 10,
                birth: None,
            })
        );
        assert_eq!(*next.cell(Coord::new(1, 0)), Cell::predator(10));
        assert_eq!(next.census().predators, 2);
    }

    #[test]
    fn test_pending_debit_applied_when_partner_acts() {
        let origin = Coord::new(2, 2);
        let mut grid = Grid::new(6, 6);
        grid.set(origin, Cell::predator(8));

        let mut staged = StagedGrid::new(&grid);
        staged.debit_predator(origin, 3);

        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let outcome = apply_predator(origin, &grid, &mut staged, &mut rng);
        let Some(PredatorOutcome::Acted { destination, energy, .. }) = outcome else {
            panic!("expected the predator to act");
        };
        assert_eq!(energy, 7);

        let next = staged.commit();
        assert_eq!(*next.cell(destination), Cell::predator(4));
    }
}
