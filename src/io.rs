//! Plain-text instance loader and printer.
//!
//! The format has one line per axis listing that axis's usable coordinates,
//! followed by a single line of terminal coordinate tuples written back to
//! back:
//!
//! ```text
//! 0 4
//! 0 4
//! 0
//! 0 0 0  4 0 0  0 4 0
//! ```
//!
//! Blank lines are ignored. Axis coordinates no terminal uses are dropped
//! when the grid is built.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::error::ParseError;
use crate::grid::{Coord, GridInstance};

fn numbers(line_no: usize, line: &str) -> Result<Vec<Coord>, ParseError> {
    line.split_whitespace()
        .map(|token| {
            token.parse::<Coord>().map_err(|_| ParseError::BadNumber {
                line: line_no,
                token: token.to_string(),
            })
        })
        .collect()
}

/// Parse an instance, taking every non-blank line but the last as an axis.
pub fn parse_instance(text: &str) -> Result<GridInstance, ParseError> {
    let lines = text.lines().filter(|l| !l.trim().is_empty()).count();
    if lines < 2 {
        return Err(ParseError::MissingTerminalLine);
    }
    parse_instance_with_dimension(text, lines - 1)
}

/// Parse an instance with exactly `dimension` axis lines. Lines after the
/// terminal line are ignored.
pub fn parse_instance_with_dimension(
    text: &str,
    dimension: usize,
) -> Result<GridInstance, ParseError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .filter(|(_, l)| !l.trim().is_empty());

    let mut axes = Vec::with_capacity(dimension);
    for axis in 0..dimension {
        let (line_no, line) = lines.next().ok_or(ParseError::MissingTerminalLine)?;
        let mut coords = numbers(line_no, line)?;
        coords.sort_unstable();
        if let Some(pair) = coords.windows(2).find(|w| w[0] == w[1]) {
            return Err(ParseError::DuplicateCoordinate {
                axis,
                value: pair[0],
            });
        }
        axes.push(coords);
    }

    let (line_no, line) = lines.next().ok_or(ParseError::MissingTerminalLine)?;
    let values = numbers(line_no, line)?;
    if dimension == 0 || values.len() % dimension != 0 {
        return Err(ParseError::TerminalCountMismatch {
            values: values.len(),
            dimension,
        });
    }
    let terminals: Vec<Vec<Coord>> = values.chunks(dimension).map(<[Coord]>::to_vec).collect();

    let mut used = vec![Vec::with_capacity(terminals.len()); dimension];
    for (terminal, coords) in terminals.iter().enumerate() {
        for (axis, &value) in coords.iter().enumerate() {
            if axes[axis].binary_search(&value).is_err() {
                return Err(ParseError::UnknownCoordinate {
                    terminal,
                    axis,
                    value,
                });
            }
            used[axis].push(value);
        }
    }
    Ok(GridInstance::from_axes(used, &terminals)?)
}

/// Read and parse an instance file.
pub fn read_instance(path: impl AsRef<Path>) -> Result<GridInstance, ParseError> {
    let text = fs::read_to_string(path)?;
    parse_instance(&text)
}

fn tuple(coords: &[Coord]) -> String {
    let parts: Vec<String> = coords.iter().map(Coord::to_string).collect();
    format!("({})", parts.join(", "))
}

/// Human-readable dump of an instance: sizes, axes, terminals and every
/// vertex with its exclusion flag.
pub fn format_instance(instance: &GridInstance) -> String {
    let mut out = String::new();
    let sizes: Vec<String> = instance.sizes().iter().map(usize::to_string).collect();
    let _ = writeln!(out, "dimensions: {}", sizes.join(" x "));
    for (axis, coords) in instance.axes().iter().enumerate() {
        let coords: Vec<String> = coords.iter().map(Coord::to_string).collect();
        let _ = writeln!(out, "axis {axis}: {}", coords.join(" "));
    }
    let terminals: Vec<String> = (0..instance.terminal_count())
        .map(|t| tuple(instance.terminal_coords(t)))
        .collect();
    let _ = writeln!(out, "terminals: {}", terminals.join(" "));
    let _ = writeln!(
        out,
        "excluded: {} of {}",
        instance.excluded_count(),
        instance.vertex_count()
    );
    for (id, vertex) in instance.vertices().iter().enumerate() {
        let _ = write!(out, "vertex {id} {}", tuple(&vertex.coords));
        if let Some(t) = vertex.terminal {
            let _ = write!(out, " terminal {t}");
        }
        if vertex.excluded {
            let _ = write!(out, " excluded");
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_dimension_from_line_count() {
        let g = parse_instance("0 4\n0 4\n0\n0 0 0 4 0 0 0 4 0\n").unwrap();
        assert_eq!(g.dimension(), 3);
        assert_eq!(g.terminal_count(), 3);
        assert_eq!(g.terminal_coords(2), &[0, 4, 0]);
    }

    #[test]
    fn unused_axis_coordinates_are_dropped() {
        let g = parse_instance("0 1 2 3\n5 6\n\n0 5 3 6\n").unwrap();
        assert_eq!(g.axes()[0], vec![0, 3]);
        assert_eq!(g.vertex_count(), 4);
    }

    #[test]
    fn explicit_dimension_ignores_trailing_lines() {
        let g = parse_instance_with_dimension("1 2\n1 2\n# trailing\n", 1).unwrap();
        assert_eq!(g.terminal_count(), 2);
    }

    #[test]
    fn format_lists_every_vertex() {
        let mut g = parse_instance("0 2\n0\n0 0 2 0\n").unwrap();
        g.exclude(1);
        let text = format_instance(&g);
        assert!(text.starts_with("dimensions: 2 x 1\n"));
        assert!(text.contains("terminals: (0, 0) (2, 0)\n"));
        assert!(text.contains("vertex 0 (0, 0) terminal 0\n"));
        assert!(text.contains("vertex 1 (2, 0) terminal 1 excluded\n"));
    }
}
