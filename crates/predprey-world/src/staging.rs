//! Next-state buffer for a single step.
//!
//! Rules read the committed grid and write only here. Besides the next grid
//! the buffer remembers where each predator ended up this step, so energy
//! charged to a reproduction partner lands on the partner's post-move cell
//! whether or not the partner has acted yet.

use crate::grid::Grid;
use predprey_core::{Cell, Coord};
use std::collections::HashMap;
use tracing::trace;

pub struct StagedGrid {
    next: Grid,
    /// Predator origin -> destination, for predators that have acted
    relocations: HashMap<Coord, Coord>,
    /// Destination -> origin of the predator that moved there last
    occupants: HashMap<Coord, Coord>,
    /// Energy owed by predators that have not acted yet, keyed by origin
    pending_debits: HashMap<Coord, i32>,
}

impl StagedGrid {
    /// Seed the buffer with a copy of the committed grid so untouched cells
    /// keep their state
    pub fn new(current: &Grid) -> Self {
        Self {
            next: current.clone(),
            relocations: HashMap::new(),
            occupants: HashMap::new(),
            pending_debits: HashMap::new(),
        }
    }

    pub fn cell(&self, coord: Coord) -> &Cell {
        self.next.cell(coord)
    }

    pub fn write(&mut self, coord: Coord, cell: Cell) {
        self.next.set(coord, cell);
    }

    pub fn vacate(&mut self, coord: Coord) {
        self.next.set(coord, Cell::dead());
    }

    /// Nothing has been written into this cell, or it was vacated
    pub fn is_vacant(&self, coord: Coord) -> bool {
        self.next.cell(coord).is_dead()
    }

    /// Record where the predator that started at `origin` now stands.
    ///
    /// A later predator moving into the same cell displaces the earlier one,
    /// which no longer exists in the next grid.
    pub fn record_relocation(&mut self, origin: Coord, destination: Coord) {
        self.relocations.insert(origin, destination);
        self.occupants.insert(destination, origin);
    }

    /// Claim whatever energy earlier partners charged to this predator
    pub fn take_pending_debit(&mut self, origin: Coord) -> i32 {
        self.pending_debits.remove(&origin).unwrap_or(0)
    }

    /// Charge energy to the predator that started the step at `origin`.
    ///
    /// If it already moved, the charge applies at its destination; if that
    /// cell was since taken over by anything else, including another
    /// predator, the charge is dropped. Otherwise the charge waits until the
    /// predator acts.
    pub fn debit_predator(&mut self, origin: Coord, amount: i32) {
        match self.relocations.get(&origin).copied() {
            Some(destination) => {
                let still_there = self.occupants.get(&destination) == Some(&origin);
                let cell = self.next.cell_mut(destination);
                if still_there && cell.is_predator() {
                    cell.energy -= amount;
                } else {
                    trace!(
                        origin = %origin,
                        destination = %destination,
                        "Dropping debit, partner was displaced from its cell"
                    );
                }
            }
            None => {
                *self.pending_debits.entry(origin).or_insert(0) += amount;
            }
        }
    }

    /// Finish the step and hand back the next grid
    pub fn commit(self) -> Grid {
        if !self.pending_debits.is_empty() {
            trace!(
                unclaimed = self.pending_debits.len(),
                "Debits left for predators that never acted"
            );
        }
        self.next
    }
}
