//! Coordinate-compressed grid instances.
//!
//! A [`GridInstance`] is the axis-aligned grid spanned by per-axis coordinate
//! lists. Vertices are stored row-major with axis 0 varying fastest, and each
//! vertex knows its immediate non-excluded predecessor and successor along
//! every axis together with the Manhattan length of that grid edge.

use crate::error::{Result, SteinerError};
use crate::pruning;
use crate::utils::{checked_volume, grid_position, grid_steps, linear_index, manhattan};

pub type Coord = i32;
pub type Distance = u64;
/// One bit per terminal except the anchor.
pub type SubsetKey = u64;

pub const SUBSET_KEY_BITS: usize = SubsetKey::BITS as usize;
/// Largest terminal count a search accepts.
pub const MAX_TERMINALS: usize = SUBSET_KEY_BITS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighbor {
    pub vertex: usize,
    pub distance: Distance,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vertex {
    pub coords: Vec<Coord>,
    /// Index into the instance's terminal list.
    pub terminal: Option<usize>,
    pub excluded: bool,
    pub neighbors: Vec<Neighbor>,
}

#[derive(Clone, Debug)]
pub struct GridInstance {
    vertices: Vec<Vertex>,
    axes: Vec<Vec<Coord>>,
    sizes: Vec<usize>,
    steps: Vec<usize>,
    terminals: Vec<usize>,
    terminal_coords: Vec<Coord>,
}

impl GridInstance {
    /// Build the compressed grid induced by the terminals themselves: axis `k`
    /// holds exactly the distinct `k`-th coordinates of the terminals.
    pub fn from_terminals(terminals: &[Vec<Coord>]) -> Result<Self> {
        let first = terminals.first().ok_or(SteinerError::NoTerminals)?;
        let dimension = first.len();
        let mut axes = vec![Vec::with_capacity(terminals.len()); dimension];
        for (index, terminal) in terminals.iter().enumerate() {
            if terminal.len() != dimension {
                return Err(SteinerError::DimensionMismatch {
                    terminal: index,
                    expected: dimension,
                    found: terminal.len(),
                });
            }
            for (axis, &value) in terminal.iter().enumerate() {
                axes[axis].push(value);
            }
        }
        Self::from_axes(axes, terminals)
    }

    /// Build a grid over explicit per-axis coordinates.
    ///
    /// Axis lists are sorted and deduplicated. Every terminal coordinate must
    /// appear on its axis; terminals keep their given order and the last one
    /// is the search anchor.
    pub fn from_axes(mut axes: Vec<Vec<Coord>>, terminals: &[Vec<Coord>]) -> Result<Self> {
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("build_instance", terminals = terminals.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        if terminals.is_empty() {
            return Err(SteinerError::NoTerminals);
        }
        if terminals.len() > MAX_TERMINALS {
            return Err(SteinerError::TooManyTerminals {
                count: terminals.len(),
                max: MAX_TERMINALS,
            });
        }
        for axis in &mut axes {
            axis.sort_unstable();
            axis.dedup();
        }
        let dimension = axes.len();
        let sizes: Vec<usize> = axes.iter().map(Vec::len).collect();
        let volume = checked_volume(&sizes).ok_or(SteinerError::GridTooLarge)?;
        let steps = grid_steps(&sizes);

        let mut terminal_vertices = Vec::with_capacity(terminals.len());
        let mut terminal_coords = Vec::with_capacity(terminals.len() * dimension);
        for (index, terminal) in terminals.iter().enumerate() {
            if terminal.len() != dimension {
                return Err(SteinerError::DimensionMismatch {
                    terminal: index,
                    expected: dimension,
                    found: terminal.len(),
                });
            }
            let mut position = Vec::with_capacity(dimension);
            for (axis, &value) in terminal.iter().enumerate() {
                let slot = axes[axis]
                    .binary_search(&value)
                    .map_err(|_| SteinerError::UnknownCoordinate {
                        terminal: index,
                        axis,
                        value,
                    })?;
                position.push(slot);
            }
            terminal_vertices.push(linear_index(&position, &steps));
            terminal_coords.extend_from_slice(terminal);
        }

        let mut vertices: Vec<Vertex> = (0..volume)
            .map(|index| {
                let position = grid_position(index, &sizes);
                Vertex {
                    coords: position
                        .iter()
                        .zip(&axes)
                        .map(|(&p, axis)| axis[p])
                        .collect(),
                    terminal: None,
                    excluded: false,
                    neighbors: Vec::new(),
                }
            })
            .collect();
        for (index, &vertex) in terminal_vertices.iter().enumerate() {
            if let Some(first) = vertices[vertex].terminal {
                return Err(SteinerError::DuplicateTerminal {
                    first,
                    second: index,
                });
            }
            vertices[vertex].terminal = Some(index);
        }

        let mut instance = Self {
            vertices,
            axes,
            sizes,
            steps,
            terminals: terminal_vertices,
            terminal_coords,
        };
        instance.update_neighbors();
        Ok(instance)
    }

    pub fn dimension(&self) -> usize {
        self.sizes.len()
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn axes(&self) -> &[Vec<Coord>] {
        &self.axes
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex(&self, id: usize) -> &Vertex {
        &self.vertices[id]
    }

    /// Vertex ids of the terminals, in terminal order.
    pub fn terminals(&self) -> &[usize] {
        &self.terminals
    }

    pub fn terminal_count(&self) -> usize {
        self.terminals.len()
    }

    /// Coordinates of terminal `index`.
    pub fn terminal_coords(&self, index: usize) -> &[Coord] {
        let d = self.dimension();
        &self.terminal_coords[index * d..(index + 1) * d]
    }

    /// Vertex id of the last terminal, the fixed sink of the search.
    pub fn anchor(&self) -> usize {
        // Construction rejects empty terminal lists.
        self.terminals[self.terminals.len() - 1]
    }

    /// Per-axis grid indices of a vertex.
    pub fn position(&self, vertex: usize) -> Vec<usize> {
        grid_position(vertex, &self.sizes)
    }

    pub fn index_of(&self, position: &[usize]) -> usize {
        linear_index(position, &self.steps)
    }

    pub fn excluded_count(&self) -> usize {
        self.vertices.iter().filter(|v| v.excluded).count()
    }

    /// Mark a vertex unusable and drop it from every adjacency list.
    ///
    /// Excluding a terminal is not rejected here; the search refuses to start
    /// on such an instance.
    pub fn exclude(&mut self, vertex: usize) {
        if !self.vertices[vertex].excluded {
            self.vertices[vertex].excluded = true;
            self.update_neighbors();
        }
    }

    /// Exclude every vertex the per-plane terminal envelopes rule out.
    ///
    /// Returns how many vertices were newly excluded.
    pub fn apply_dominance_pruning(&mut self) -> usize {
        let positions: Vec<Vec<usize>> = self
            .terminals
            .iter()
            .map(|&vertex| self.position(vertex))
            .collect();
        let mask = pruning::exclusion_mask(&positions, &self.sizes);
        let mut newly = 0;
        for (vertex, excluded) in self.vertices.iter_mut().zip(mask) {
            if excluded && !vertex.excluded {
                vertex.excluded = true;
                newly += 1;
            }
        }
        if newly > 0 {
            self.update_neighbors();
        }
        newly
    }

    /// Fail if any terminal sits on an excluded vertex.
    pub fn check_terminals(&self) -> Result<()> {
        for (terminal, &vertex) in self.terminals.iter().enumerate() {
            if self.vertices[vertex].excluded {
                return Err(SteinerError::ExcludedTerminal { terminal, vertex });
            }
        }
        Ok(())
    }

    fn update_neighbors(&mut self) {
        let lists: Vec<Vec<Neighbor>> = self
            .vertices
            .iter()
            .enumerate()
            .map(|(index, vertex)| self.grid_neighbors(index, vertex))
            .collect();
        for (vertex, list) in self.vertices.iter_mut().zip(lists) {
            vertex.neighbors = list;
        }
    }

    fn grid_neighbors(&self, index: usize, vertex: &Vertex) -> Vec<Neighbor> {
        if vertex.excluded {
            return Vec::new();
        }
        let position = self.position(index);
        let mut list = Vec::with_capacity(2 * self.dimension());
        for (axis, (&p, &step)) in position.iter().zip(&self.steps).enumerate() {
            let lower = p.checked_sub(1).map(|_| index - step);
            let upper = (p + 1 < self.sizes[axis]).then(|| index + step);
            for other in lower.into_iter().chain(upper) {
                let target = &self.vertices[other];
                if !target.excluded {
                    list.push(Neighbor {
                        vertex: other,
                        distance: manhattan(&vertex.coords, &target.coords),
                    });
                }
            }
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner() -> GridInstance {
        GridInstance::from_terminals(&[vec![0, 0, 0], vec![4, 0, 0], vec![0, 4, 0]]).unwrap()
    }

    #[test]
    fn compression_keeps_terminal_coordinates_only() {
        let g = corner();
        assert_eq!(g.sizes(), &[2, 2, 1]);
        assert_eq!(g.axes()[0], vec![0, 4]);
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.terminals(), &[0, 1, 2]);
        assert_eq!(g.anchor(), 2);
        assert_eq!(g.terminal_coords(1), &[4, 0, 0]);
        assert_eq!(g.vertex(3).coords, vec![4, 4, 0]);
        assert_eq!(g.vertex(3).terminal, None);
    }

    #[test]
    fn neighbors_carry_manhattan_lengths() {
        let g = GridInstance::from_axes(vec![vec![0, 3, 10], vec![1, 2]], &[vec![0, 1], vec![10, 2]])
            .unwrap();
        let centre = g.index_of(&[1, 0]);
        let mut got: Vec<_> = g
            .vertex(centre)
            .neighbors
            .iter()
            .map(|n| (g.vertex(n.vertex).coords.clone(), n.distance))
            .collect();
        got.sort();
        assert_eq!(
            got,
            vec![(vec![0, 1], 3), (vec![3, 2], 1), (vec![10, 1], 7)]
        );
    }

    #[test]
    fn exclusion_removes_adjacency() {
        let mut g = GridInstance::from_axes(vec![vec![0, 1, 2]], &[vec![0], vec![2]]).unwrap();
        g.exclude(1);
        assert!(g.vertex(0).neighbors.is_empty());
        assert!(g.vertex(1).neighbors.is_empty());
        assert_eq!(g.excluded_count(), 1);
        assert!(g.check_terminals().is_ok());
        g.exclude(2);
        assert_eq!(
            g.check_terminals(),
            Err(SteinerError::ExcludedTerminal {
                terminal: 1,
                vertex: 2
            })
        );
    }

    #[test]
    fn construction_errors() {
        assert_eq!(
            GridInstance::from_terminals(&[]).err(),
            Some(SteinerError::NoTerminals)
        );
        assert_eq!(
            GridInstance::from_terminals(&[vec![0, 0], vec![1]]).err(),
            Some(SteinerError::DimensionMismatch {
                terminal: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            GridInstance::from_terminals(&[vec![1, 2], vec![3, 4], vec![1, 2]]).err(),
            Some(SteinerError::DuplicateTerminal {
                first: 0,
                second: 2
            })
        );
        assert_eq!(
            GridInstance::from_axes(vec![vec![0, 1]], &[vec![0], vec![5]]).err(),
            Some(SteinerError::UnknownCoordinate {
                terminal: 1,
                axis: 0,
                value: 5
            })
        );
        let many: Vec<Vec<Coord>> = (0..65).map(|i| vec![i]).collect();
        assert_eq!(
            GridInstance::from_terminals(&many).err(),
            Some(SteinerError::TooManyTerminals { count: 65, max: 64 })
        );
    }

    #[test]
    fn pruning_never_touches_terminals() {
        let mut g = GridInstance::from_terminals(&[
            vec![0, 0],
            vec![5, 1],
            vec![2, 4],
            vec![7, 6],
        ])
        .unwrap();
        let before = g.vertex_count();
        let removed = g.apply_dominance_pruning();
        assert!(removed > 0 && removed < before);
        assert!(g.check_terminals().is_ok());
        assert_eq!(g.apply_dominance_pruning(), 0);
    }
}
