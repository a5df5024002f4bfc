//! Collapse a grid path graph into terminals, Steiner points and direct edges.

use std::collections::BTreeMap;

use crate::engine::{GridSolution, SearchStats};
use crate::grid::{Coord, Distance, GridInstance};
use crate::utils::manhattan;

/// A Steiner tree over terminals and materialised Steiner points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SteinerTree {
    pub length: Distance,
    pub terminals: Vec<Vec<Coord>>,
    pub steiner_points: Vec<Vec<Coord>>,
    /// Point index pairs. Indices below `terminals.len()` are terminals in
    /// input order, the rest are `steiner_points` offset by the terminal
    /// count.
    pub edges: Vec<(usize, usize)>,
    pub stats: SearchStats,
}

impl SteinerTree {
    /// Coordinates of point `index` in the edge numbering.
    pub fn point(&self, index: usize) -> &[Coord] {
        match index.checked_sub(self.terminals.len()) {
            Some(steiner) => &self.steiner_points[steiner],
            None => &self.terminals[index],
        }
    }

    /// Sum of the Manhattan lengths of the reduced edges.
    pub fn edge_length(&self) -> Distance {
        self.edges
            .iter()
            .map(|&(a, b)| manhattan(self.point(a), self.point(b)))
            .sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Terminal(usize),
    Steiner(usize),
    PassThrough,
}

/// Axis along which two grid neighbours differ.
fn edge_axis(instance: &GridInstance, a: usize, b: usize) -> Option<usize> {
    let (pa, pb) = (&instance.vertex(a).coords, &instance.vertex(b).coords);
    pa.iter().zip(pb).position(|(x, y)| x != y)
}

/// Reduce the raw grid edges of `solution` to a tree whose inner vertices are
/// genuine branch points.
///
/// A degree-2 vertex whose two edges run along the same axis is always
/// elided. With `corners_as_steiner_points` a degree-2 vertex that turns a
/// corner is kept as a Steiner point; otherwise it is elided too.
pub fn reduce(
    instance: &GridInstance,
    solution: &GridSolution,
    corners_as_steiner_points: bool,
) -> SteinerTree {
    #[cfg(feature = "tracing")]
    let span = tracing::trace_span!("reduce_tree", grid_edges = solution.edges.len());
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    let mut edges: Vec<(usize, usize)> = solution
        .edges
        .iter()
        .map(|&(a, b)| (a.min(b), a.max(b)))
        .collect();
    edges.sort_unstable();
    edges.dedup();

    let mut adjacency: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for &(a, b) in &edges {
        adjacency.entry(a).or_default().push(b);
        adjacency.entry(b).or_default().push(a);
    }

    let terminal_count = instance.terminal_count();
    let mut kinds: BTreeMap<usize, Kind> = BTreeMap::new();
    let mut steiner_points = Vec::new();
    for (&vertex, around) in &adjacency {
        let kind = match instance.vertex(vertex).terminal {
            Some(t) => Kind::Terminal(t),
            None => {
                let straight = around.len() == 2
                    && (!corners_as_steiner_points
                        || edge_axis(instance, vertex, around[0])
                            == edge_axis(instance, vertex, around[1]));
                if straight {
                    Kind::PassThrough
                } else {
                    steiner_points.push(instance.vertex(vertex).coords.clone());
                    Kind::Steiner(terminal_count + steiner_points.len() - 1)
                }
            }
        };
        kinds.insert(vertex, kind);
    }
    let point_of = |vertex: usize| match kinds.get(&vertex) {
        Some(Kind::Terminal(t)) => Some(*t),
        Some(Kind::Steiner(s)) => Some(*s),
        _ => None,
    };

    let mut reduced = Vec::new();
    for (&start, around) in &adjacency {
        let Some(from) = point_of(start) else {
            continue;
        };
        for &first in around {
            let (mut prev, mut cur) = (start, first);
            while point_of(cur).is_none() {
                let next = adjacency[&cur].iter().copied().find(|&n| n != prev);
                match next {
                    Some(next) => {
                        prev = cur;
                        cur = next;
                    }
                    None => break,
                }
            }
            if let Some(to) = point_of(cur) {
                if from < to {
                    reduced.push((from, to));
                }
            }
        }
    }

    SteinerTree {
        length: solution.length,
        terminals: (0..terminal_count)
            .map(|t| instance.terminal_coords(t).to_vec())
            .collect(),
        steiner_points,
        edges: reduced,
        stats: solution.stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solution(edges: Vec<(usize, usize)>, length: Distance) -> GridSolution {
        GridSolution {
            length,
            edges,
            stats: SearchStats::default(),
        }
    }

    #[test]
    fn straight_chain_collapses() {
        let instance =
            GridInstance::from_axes(vec![vec![0, 2, 5]], &[vec![0], vec![5]]).unwrap();
        let tree = reduce(&instance, &solution(vec![(0, 1), (1, 2)], 5), true);
        assert!(tree.steiner_points.is_empty());
        assert_eq!(tree.edges, vec![(0, 1)]);
        assert_eq!(tree.edge_length(), 5);
    }

    #[test]
    fn corner_is_kept_only_when_requested() {
        // (0,0) -> (3,0) -> (3,2), the corner at (3,0) is no terminal.
        let instance = GridInstance::from_axes(
            vec![vec![0, 3], vec![0, 2]],
            &[vec![0, 0], vec![3, 2]],
        )
        .unwrap();
        let corner = instance.index_of(&[1, 0]);
        let end = instance.index_of(&[1, 1]);
        let raw = solution(vec![(0, corner), (corner, end)], 5);

        let kept = reduce(&instance, &raw, true);
        assert_eq!(kept.steiner_points, vec![vec![3, 0]]);
        assert_eq!(kept.edges.len(), 2);
        assert_eq!(kept.edge_length(), 5);

        let elided = reduce(&instance, &raw, false);
        assert!(elided.steiner_points.is_empty());
        assert_eq!(elided.edges, vec![(0, 1)]);
    }

    #[test]
    fn branch_point_survives() {
        // T-junction at (1,0) joining (0,0), (2,0) and (1,1).
        let instance = GridInstance::from_axes(
            vec![vec![0, 1, 2], vec![0, 1]],
            &[vec![0, 0], vec![2, 0], vec![1, 1]],
        )
        .unwrap();
        let hub = instance.index_of(&[1, 0]);
        let raw = solution(
            vec![
                (instance.index_of(&[0, 0]), hub),
                (hub, instance.index_of(&[2, 0])),
                (hub, instance.index_of(&[1, 1])),
            ],
            3,
        );
        let tree = reduce(&instance, &raw, false);
        assert_eq!(tree.steiner_points, vec![vec![1, 0]]);
        let mut edges = tree.edges.clone();
        edges.sort();
        assert_eq!(edges, vec![(0, 3), (1, 3), (2, 3)]);
        assert_eq!(tree.point(3), &[1, 0]);
    }

    #[test]
    fn empty_solution_has_no_edges() {
        let instance = GridInstance::from_terminals(&[vec![7, 7]]).unwrap();
        let tree = reduce(&instance, &solution(Vec::new(), 0), true);
        assert!(tree.edges.is_empty());
        assert_eq!(tree.terminals, vec![vec![7, 7]]);
    }
}
