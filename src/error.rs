//! Error types for instance construction, search and text loading.

use std::io;

use thiserror::Error;

use crate::grid::Coord;

/// Failures raised while building an instance or running a search.
///
/// Every variant is terminal for the solve that produced it: no partial tree
/// is ever returned alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SteinerError {
    #[error("instance has no terminals")]
    NoTerminals,
    #[error("{count} terminals exceed the subset key width of {max}")]
    TooManyTerminals { count: usize, max: usize },
    #[error("terminal {terminal} has {found} coordinates, expected {expected}")]
    DimensionMismatch {
        terminal: usize,
        expected: usize,
        found: usize,
    },
    #[error("terminals {first} and {second} occupy the same grid vertex")]
    DuplicateTerminal { first: usize, second: usize },
    #[error("terminal {terminal} uses coordinate {value} which is not on axis {axis}")]
    UnknownCoordinate {
        terminal: usize,
        axis: usize,
        value: Coord,
    },
    #[error("grid vertex count overflows usize")]
    GridTooLarge,
    #[error("layer width {width} is outside 1..={max}")]
    InvalidLayerWidth { width: usize, max: usize },
    #[error("terminal {terminal} sits on excluded vertex {vertex}")]
    ExcludedTerminal { terminal: usize, vertex: usize },
    #[error("open set exhausted after {extracted} extractions without reaching the goal")]
    SearchExhausted { extracted: usize },
    #[error("extraction limit of {limit} reached before the goal")]
    ExtractionLimit { limit: usize },
}

/// Failures raised by the text instance loader.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read instance: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: can't read number '{token}'")]
    BadNumber { line: usize, token: String },
    #[error("instance has no terminal line")]
    MissingTerminalLine,
    #[error("coordinate {value} appears twice on axis {axis}")]
    DuplicateCoordinate { axis: usize, value: Coord },
    #[error("terminal {terminal}: coordinate {value} doesn't exist on axis {axis}")]
    UnknownCoordinate {
        terminal: usize,
        axis: usize,
        value: Coord,
    },
    #[error("number of terminal values ({values}) doesn't match dimension {dimension}")]
    TerminalCountMismatch { values: usize, dimension: usize },
    #[error(transparent)]
    Instance(#[from] SteinerError),
}

/// Crate-wide result alias.
pub type Result<T, E = SteinerError> = std::result::Result<T, E>;
