//! The lower-bound strategy seam of the search engine.
//!
//! The engine orders its open set by `length + estimate`, A*-style. Any
//! strategy plugged in here only changes how many states are extracted
//! before the goal, never the length that is returned, provided it honours
//! the contract on [`LowerBound`].

use crate::grid::{Distance, GridInstance, SubsetKey};

/// Admissible estimate of the cost left to finish a partial tree.
///
/// A partial tree is identified by the vertex it is rooted at and the subset
/// of non-anchor terminals it already connects. `estimate` must never exceed
/// the length of the cheapest tree that joins that vertex with every
/// terminal outside the subset and with the anchor terminal.
///
/// Two further properties keep closed labels final:
/// - moving across a grid edge of length `w` changes the estimate by at
///   most `w`;
/// - for disjoint subsets `a` and `b` at one vertex, `estimate(a | b)` is not
///   smaller than `estimate(a)` minus the length already paid for `b`.
///
/// The constant zero bound satisfies all of this and turns the search into
/// plain Dijkstra over (vertex, subset) states. The value at the goal (every
/// non-anchor terminal connected, rooted at the anchor) must be zero.
///
/// Implementations receive the instance by reference and must not keep
/// scratch state between calls.
pub trait LowerBound {
    fn estimate(&self, subset: SubsetKey, vertex: usize, instance: &GridInstance) -> Distance;
}

impl<F> LowerBound for F
where
    F: Fn(SubsetKey, usize, &GridInstance) -> Distance,
{
    fn estimate(&self, subset: SubsetKey, vertex: usize, instance: &GridInstance) -> Distance {
        self(subset, vertex, instance)
    }
}
