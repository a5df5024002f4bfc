//! Dijkstra-Steiner label-correcting search.
//!
//! States are (vertex, subset) pairs where the subset names the non-anchor
//! terminals a partial tree already connects. Starting from one seed per
//! non-anchor terminal, the engine repeatedly closes the open state of least
//! `length + lower bound` and relaxes from it in two ways:
//! 1. along every grid edge of its vertex, picking up the neighbour's
//!    terminal bit if there is one (the label without that bit is offered
//!    as well, since a tree may branch at a terminal);
//! 2. by merging with every closed state at the same vertex whose subset is
//!    disjoint from its own.
//!
//! The search stops when the anchor vertex is closed with every non-anchor
//! bit set. Closed states are kept in an arena together with their
//! [`Origin`], which is all [`SteinerEngine::run`] needs to backtrack the grid
//! edges of the tree.

use crate::builder::Settings;
use crate::error::{Result, SteinerError};
use crate::grid::{Distance, GridInstance, SubsetKey, MAX_TERMINALS};
use crate::heap;
use crate::state::{FrozenState, Origin, SearchState, Slot, StateId};
use crate::subset_store::SubsetStore;
use crate::traits::LowerBound;
use crate::utils::default_layer_width;

/// Counters describing one search run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States taken out of the open set, goal included.
    pub extracted: usize,
    /// Distinct (vertex, subset) states ever opened, seeds included.
    pub created: usize,
    /// Decrease-key operations on already open states.
    pub decreased: usize,
    /// Merge relaxations that opened or improved a state.
    pub merges: usize,
    /// Largest number of simultaneously open states.
    pub peak_open: usize,
}

/// Result of a search on a prepared grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridSolution {
    pub length: Distance,
    /// Grid edges of the tree as vertex id pairs.
    pub edges: Vec<(usize, usize)>,
    pub stats: SearchStats,
}

/// Heap element: the open-state arena index plus the ordering key.
#[derive(Clone, Copy, Debug)]
struct HeapEntry {
    priority: Distance,
    vertex: usize,
    subset: SubsetKey,
    state: usize,
}

/// Ties break on vertex id, then subset. Arena indices are recycled in
/// small-memory mode and stay out of the order.
#[inline]
fn entry_less(a: &HeapEntry, b: &HeapEntry) -> bool {
    (a.priority, a.vertex, a.subset) < (b.priority, b.vertex, b.subset)
}

/// A closed state filed under its vertex and subset size for merge lookups.
#[derive(Clone, Copy, Debug)]
struct Closed {
    subset: SubsetKey,
    length: Distance,
    id: StateId,
}

/// Search engine bound to one instance and one lower-bound strategy.
///
/// ```
/// use dijkstra_steiner::{BoundingBoxBound, GridInstance, Settings, SteinerEngine};
///
/// let instance = GridInstance::from_terminals(&[vec![0, 0], vec![4, 0], vec![0, 4]]).unwrap();
/// let settings = Settings::default();
/// let solution = SteinerEngine::new(&instance, &BoundingBoxBound, &settings).run().unwrap();
/// assert_eq!(solution.length, 8);
/// assert_eq!(solution.edges.len(), 2);
/// ```
pub struct SteinerEngine<'a, L: LowerBound + ?Sized> {
    instance: &'a GridInstance,
    bound: &'a L,
    settings: &'a Settings,
}

impl<'a, L: LowerBound + ?Sized> SteinerEngine<'a, L> {
    pub fn new(instance: &'a GridInstance, bound: &'a L, settings: &'a Settings) -> Self {
        Self {
            instance,
            bound,
            settings,
        }
    }

    pub fn instance(&self) -> &GridInstance {
        self.instance
    }

    /// Run the search to completion and backtrack the tree's grid edges.
    pub fn run(&self) -> Result<GridSolution> {
        let instance = self.instance;
        let terminals = instance.terminal_count();
        if terminals == 0 {
            return Err(SteinerError::NoTerminals);
        }
        if terminals > MAX_TERMINALS {
            return Err(SteinerError::TooManyTerminals {
                count: terminals,
                max: MAX_TERMINALS,
            });
        }
        instance.check_terminals()?;
        if terminals == 1 {
            return Ok(GridSolution {
                length: 0,
                edges: Vec::new(),
                stats: SearchStats::default(),
            });
        }

        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!(
            "steiner_search",
            terminals,
            vertices = instance.vertex_count()
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let key_bits = terminals - 1;
        let layer_width = self
            .settings
            .layer_width
            .unwrap_or_else(|| default_layer_width(key_bits));
        let mut open = OpenSet::new(instance, self.bound, key_bits, layer_width, self.settings)?;
        let goal_subset: SubsetKey = SubsetKey::MAX >> (SubsetKey::BITS as usize - key_bits);
        let anchor = instance.anchor();

        // Closed labels bucketed by vertex * terminals + popcount.
        let mut buckets: Vec<Vec<Closed>> = vec![Vec::new(); instance.vertex_count() * terminals];
        let mut closed: Vec<FrozenState> = Vec::new();

        for (terminal, &vertex) in instance.terminals()[..key_bits].iter().enumerate() {
            open.seed(vertex, 1 << terminal);
        }
        open.heapify();

        loop {
            let Some(state) = open.pop() else {
                return Err(SteinerError::SearchExhausted {
                    extracted: open.stats.extracted,
                });
            };
            let id = closed.len();
            closed.push(state.freeze());
            open.close(&state, id);
            let count = state.subset.count_ones() as usize;
            buckets[state.vertex * terminals + count].push(Closed {
                subset: state.subset,
                length: state.length,
                id,
            });

            if state.vertex == anchor && state.subset == goal_subset {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    length = state.length,
                    extracted = open.stats.extracted,
                    created = open.stats.created,
                    "goal reached"
                );
                let edges = backtrack(&closed, id);
                return Ok(GridSolution {
                    length: state.length,
                    edges,
                    stats: open.stats,
                });
            }
            if let Some(limit) = self.settings.extraction_limit {
                if open.stats.extracted >= limit {
                    return Err(SteinerError::ExtractionLimit { limit });
                }
            }

            for neighbor in &instance.vertex(state.vertex).neighbors {
                let length = state.length + neighbor.distance;
                let bit = terminal_bit(instance, neighbor.vertex, key_bits);
                open.relax(
                    neighbor.vertex,
                    state.subset | bit,
                    length,
                    Origin::Extend(id),
                );
                // Keep the bare label too so other branches can still be
                // merged in at this terminal.
                if bit != 0 && state.subset & bit == 0 {
                    open.relax(neighbor.vertex, state.subset, length, Origin::Extend(id));
                }
            }

            // Partners must leave room in the non-anchor bits for the union.
            for partner_count in 1..terminals - count {
                for partner in &buckets[state.vertex * terminals + partner_count] {
                    if partner.subset & state.subset != 0 {
                        continue;
                    }
                    if open.relax(
                        state.vertex,
                        state.subset | partner.subset,
                        state.length + partner.length,
                        Origin::Merge(id, partner.id),
                    ) {
                        open.stats.merges += 1;
                    }
                }
            }
        }
    }
}

#[inline]
fn terminal_bit(instance: &GridInstance, vertex: usize, key_bits: usize) -> SubsetKey {
    match instance.vertex(vertex).terminal {
        Some(t) if t < key_bits => 1 << t,
        _ => 0,
    }
}

/// Collect the grid edges below a closed state.
fn backtrack(closed: &[FrozenState], goal: StateId) -> Vec<(usize, usize)> {
    #[cfg(feature = "tracing")]
    let span = tracing::trace_span!("backtrack");
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    let mut edges = Vec::new();
    let mut stack = vec![goal];
    while let Some(id) = stack.pop() {
        match closed[id].origin {
            Origin::Seed => {}
            Origin::Extend(prev) => {
                edges.push((closed[prev].vertex, closed[id].vertex));
                stack.push(prev);
            }
            Origin::Merge(left, right) => {
                stack.push(left);
                stack.push(right);
            }
        }
    }
    edges
}

/// Open states, their heap and the per-vertex stores that index them.
struct OpenSet<'a, L: LowerBound + ?Sized> {
    instance: &'a GridInstance,
    bound: &'a L,
    stores: Vec<SubsetStore<Slot>>,
    states: Vec<SearchState>,
    /// Recycled arena slots, only filled in small-memory mode.
    free: Vec<usize>,
    heap: Vec<HeapEntry>,
    small_memory: bool,
    stats: SearchStats,
}

impl<'a, L: LowerBound + ?Sized> OpenSet<'a, L> {
    fn new(
        instance: &'a GridInstance,
        bound: &'a L,
        key_bits: usize,
        layer_width: usize,
        settings: &Settings,
    ) -> Result<Self> {
        let stores = instance
            .vertices()
            .iter()
            .map(|vertex| {
                let bits = if vertex.excluded { 0 } else { key_bits };
                SubsetStore::new(bits, layer_width)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            instance,
            bound,
            stores,
            states: Vec::new(),
            free: Vec::new(),
            heap: Vec::new(),
            small_memory: settings.small_memory_mode,
            stats: SearchStats::default(),
        })
    }

    fn alloc(&mut self, state: SearchState) -> usize {
        self.stats.created += 1;
        match self.free.pop() {
            Some(slot) => {
                self.states[slot] = state;
                slot
            }
            None => {
                self.states.push(state);
                self.states.len() - 1
            }
        }
    }

    fn track_peak(&mut self) {
        self.stats.peak_open = self.stats.peak_open.max(self.heap.len());
    }

    /// Add a seed without restoring heap order; call [`Self::heapify`] after.
    fn seed(&mut self, vertex: usize, subset: SubsetKey) {
        let priority = self.bound.estimate(subset, vertex, self.instance);
        let state = self.alloc(SearchState::seed(vertex, subset, priority));
        self.stores[vertex].insert(subset, Slot::Open(state));
        self.heap.push(HeapEntry {
            priority,
            vertex,
            subset,
            state,
        });
    }

    fn heapify(&mut self) {
        let states = &mut self.states;
        heap::make_heap(&mut self.heap, entry_less, |entry, slot| {
            states[entry.state].heap_slot = slot
        });
        self.track_peak();
    }

    fn pop(&mut self) -> Option<SearchState> {
        let states = &mut self.states;
        let top = heap::extract_min(&mut self.heap, entry_less, |entry, slot| {
            states[entry.state].heap_slot = slot
        })?;
        self.heap.pop();
        self.stats.extracted += 1;
        let state = self.states[top.state];
        if self.small_memory {
            self.free.push(top.state);
        }
        Some(state)
    }

    fn close(&mut self, state: &SearchState, id: StateId) {
        self.stores[state.vertex].insert(state.subset, Slot::Closed(id));
    }

    /// Offer a candidate label for (vertex, subset).
    ///
    /// Returns whether the state was opened or improved. Closed states are
    /// final and left untouched.
    fn relax(&mut self, vertex: usize, subset: SubsetKey, length: Distance, origin: Origin) -> bool {
        match self.stores[vertex].get(subset).copied() {
            None => {
                let estimate = self.bound.estimate(subset, vertex, self.instance);
                let priority = length.saturating_add(estimate);
                let state = self.alloc(SearchState {
                    vertex,
                    subset,
                    length,
                    priority,
                    heap_slot: self.heap.len(),
                    origin,
                });
                self.stores[vertex].insert(subset, Slot::Open(state));
                self.heap.push(HeapEntry {
                    priority,
                    vertex,
                    subset,
                    state,
                });
                self.track_peak();
                let last = self.heap.len() - 1;
                self.sift_up(last);
                true
            }
            Some(Slot::Open(state)) => {
                if !self.states[state].improve(length, origin) {
                    return false;
                }
                self.stats.decreased += 1;
                let slot = self.states[state].heap_slot;
                self.heap[slot].priority = self.states[state].priority;
                self.sift_up(slot);
                true
            }
            Some(Slot::Closed(_)) => false,
        }
    }

    fn sift_up(&mut self, slot: usize) {
        let states = &mut self.states;
        heap::shift_up(&mut self.heap, slot, entry_less, |entry, at| {
            states[entry.state].heap_slot = at
        });
        debug_assert!(heap::check_heap(&self.heap, entry_less));
    }
}
