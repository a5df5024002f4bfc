use crate::engine::GridSolution;
use crate::error::Result;
use crate::grid::{Coord, GridInstance};
use crate::projection::SteinerTree;
use crate::traits::LowerBound;

/// Search configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Recycle each open record as soon as its state is closed.
    pub small_memory_mode: bool,
    /// Bits per subset-store layer; `None` picks a balanced width.
    pub layer_width: Option<usize>,
    /// Keep degree-2 corner vertices as Steiner points when reducing a tree.
    pub edge_as_steiner_point: bool,
    /// Prune dominated vertices when building a grid from raw terminals.
    pub dominance_pruning: bool,
    /// Abort after this many extractions without reaching the goal.
    pub extraction_limit: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            small_memory_mode: false,
            layer_width: None,
            edge_as_steiner_point: true,
            dominance_pruning: true,
            extraction_limit: None,
        }
    }
}

pub struct SteinerSolverBuilder<L: LowerBound> {
    bound: L,
    settings: Settings,
}

impl<L: LowerBound> SteinerSolverBuilder<L> {
    pub fn new(bound: L) -> Self {
        Self {
            bound,
            settings: Settings::default(),
        }
    }
    pub fn with_layer_width(mut self, layer_width: usize) -> Self {
        self.settings.layer_width = Some(layer_width);
        self
    }
    pub fn small_memory_mode(mut self, enabled: bool) -> Self {
        self.settings.small_memory_mode = enabled;
        self
    }
    pub fn edge_as_steiner_point(mut self, enabled: bool) -> Self {
        self.settings.edge_as_steiner_point = enabled;
        self
    }
    pub fn dominance_pruning(mut self, enabled: bool) -> Self {
        self.settings.dominance_pruning = enabled;
        self
    }
    pub fn with_extraction_limit(mut self, limit: usize) -> Self {
        self.settings.extraction_limit = Some(limit);
        self
    }
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }
    pub fn build(self) -> SteinerSolver<L> {
        SteinerSolver {
            bound: self.bound,
            settings: self.settings,
        }
    }
}

/// A lower bound paired with settings, reusable across instances.
pub struct SteinerSolver<L: LowerBound> {
    bound: L,
    settings: Settings,
}

impl<L: LowerBound> SteinerSolver<L> {
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn bound(&self) -> &L {
        &self.bound
    }

    /// Solve on a prepared (and possibly pruned) grid.
    pub fn solve(&self, instance: &GridInstance) -> Result<GridSolution> {
        crate::solve(instance, &self.settings, &self.bound)
    }

    /// Build, prune, solve and reduce in one call.
    pub fn solve_terminals(&self, terminals: &[Vec<Coord>]) -> Result<SteinerTree> {
        crate::solve_terminals(terminals, &self.settings, &self.bound)
    }
}
