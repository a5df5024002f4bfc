//! Exact Rectilinear Steiner Minimal Trees via Dijkstra-Steiner search
//!
//! Given terminals in d-dimensional integer space, this crate finds the
//! shortest tree joining them along grid lines (Manhattan metric), possibly
//! through extra Steiner points. It is exact: it runs the generalized
//! Dreyfus-Wagner recurrence as a label-correcting search over
//! (vertex, terminal subset) states, ordered A*-style by a pluggable lower
//! bound.
//!
//! ## Pipeline
//! 1. [`GridInstance`] compresses the terminal coordinates into a grid and
//!    wires up nearest-neighbour adjacency.
//! 2. [`GridInstance::apply_dominance_pruning`] removes vertices no optimal
//!    tree needs.
//! 3. [`SteinerEngine`] runs the search using a [`SubsetStore`] per vertex and
//!    an indexable binary heap, and backtracks the grid edges of the tree.
//! 4. [`projection::reduce`] collapses pass-through chains so that only
//!    terminals and branch points remain.
//!
//! ## Quick start
//! ```
//! use dijkstra_steiner::{solve_terminals, BoundingBoxBound, Settings};
//!
//! let terminals = vec![vec![0, 0, 0], vec![4, 0, 0], vec![0, 4, 0]];
//! let tree = solve_terminals(&terminals, &Settings::default(), &BoundingBoxBound).unwrap();
//! assert_eq!(tree.length, 8);
//! assert!(tree.steiner_points.is_empty());
//! assert_eq!(tree.edges.len(), 2);
//! ```
//!
//! ## Lower bounds
//! [`ZeroBound`] turns the search into plain Dijkstra; [`BoundingBoxBound`]
//! usually extracts far fewer states. Any closure
//! `Fn(SubsetKey, usize, &GridInstance) -> Distance` honouring the
//! [`LowerBound`] contract can be used instead.

pub mod bounds;
pub mod builder;
pub mod engine;
pub mod error;
pub mod grid;
pub mod heap;
pub mod io;
pub mod projection;
pub mod pruning;
pub mod state;
pub mod subset_store;
pub mod traits;
pub mod utils;

pub use crate::bounds::{BoundingBoxBound, ZeroBound};
pub use crate::builder::{Settings, SteinerSolver, SteinerSolverBuilder};
pub use crate::engine::{GridSolution, SearchStats, SteinerEngine};
pub use crate::error::{ParseError, Result, SteinerError};
pub use crate::grid::{Coord, Distance, GridInstance, SubsetKey};
pub use crate::projection::SteinerTree;
pub use crate::subset_store::SubsetStore;
pub use crate::traits::LowerBound;

/// Solve on a prepared grid, returning the length and the tree's grid edges.
pub fn solve<L: LowerBound + ?Sized>(
    instance: &GridInstance,
    settings: &Settings,
    bound: &L,
) -> Result<GridSolution> {
    SteinerEngine::new(instance, bound, settings).run()
}

/// Build a grid from raw terminal coordinates, prune it (unless disabled),
/// solve, and reduce the result to terminals plus Steiner points.
pub fn solve_terminals<L: LowerBound + ?Sized>(
    terminals: &[Vec<Coord>],
    settings: &Settings,
    bound: &L,
) -> Result<SteinerTree> {
    let mut instance = GridInstance::from_terminals(terminals)?;
    if settings.dominance_pruning {
        instance.apply_dominance_pruning();
    }
    let solution = solve(&instance, settings, bound)?;
    Ok(projection::reduce(
        &instance,
        &solution,
        settings.edge_as_steiner_point,
    ))
}
