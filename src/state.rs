//! Search state records and their provenance.

use crate::grid::{Distance, SubsetKey};

/// Index into the arena of closed (frozen) states.
pub type StateId = usize;

/// How a state's best label was obtained.
///
/// Ids always refer to states that were already closed when the label was
/// written, so backtracking only ever follows frozen records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    /// Bare terminal seed.
    Seed,
    /// Extension along one grid edge from the given state.
    Extend(StateId),
    /// Union of two disjoint subsets meeting at the same vertex.
    Merge(StateId, StateId),
}

/// An open (vertex, subset) label, mutated in place while it sits in the heap.
#[derive(Clone, Copy, Debug)]
pub struct SearchState {
    pub vertex: usize,
    pub subset: SubsetKey,
    pub length: Distance,
    /// `length` plus the lower-bound estimate at creation time.
    pub priority: Distance,
    pub heap_slot: usize,
    pub origin: Origin,
}

impl SearchState {
    pub fn seed(vertex: usize, subset: SubsetKey, priority: Distance) -> Self {
        Self {
            vertex,
            subset,
            length: 0,
            priority,
            heap_slot: 0,
            origin: Origin::Seed,
        }
    }

    /// Strip the fields only the open set needs.
    pub fn freeze(&self) -> FrozenState {
        FrozenState {
            vertex: self.vertex,
            length: self.length,
            origin: self.origin,
        }
    }

    /// Lower the label to `length`, shifting the priority by the same amount.
    ///
    /// Returns `false` (and leaves the state alone) unless `length` improves.
    pub fn improve(&mut self, length: Distance, origin: Origin) -> bool {
        if length >= self.length {
            return false;
        }
        let delta = self.length - length;
        self.length = length;
        self.priority -= delta;
        self.origin = origin;
        true
    }
}

/// A closed state: final length plus what is needed to backtrack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrozenState {
    pub vertex: usize,
    pub length: Distance,
    pub origin: Origin,
}

/// What a vertex's subset store points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    /// Index into the open-state arena.
    Open(usize),
    Closed(StateId),
}
