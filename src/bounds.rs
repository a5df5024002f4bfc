//! Built-in lower-bound strategies.

use crate::grid::{Coord, Distance, GridInstance, SubsetKey};
use crate::traits::LowerBound;

/// Always zero; reduces the search to Dijkstra.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroBound;

impl LowerBound for ZeroBound {
    #[inline]
    fn estimate(&self, _subset: SubsetKey, _vertex: usize, _instance: &GridInstance) -> Distance {
        0
    }
}

/// Half-perimeter of the bounding box around the vertex, the anchor and
/// every terminal the subset does not cover yet.
///
/// Any rectilinear tree spanning a point set is at least as long as the sum
/// of the set's per-axis extents.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoundingBoxBound;

impl LowerBound for BoundingBoxBound {
    fn estimate(&self, subset: SubsetKey, vertex: usize, instance: &GridInstance) -> Distance {
        let coords = &instance.vertex(vertex).coords;
        let anchor = instance.terminal_count() - 1;
        let mut total: Distance = 0;
        for (axis, &origin) in coords.iter().enumerate() {
            let (mut lo, mut hi): (Coord, Coord) = (origin, origin);
            for terminal in (0..=anchor).filter(|&t| t == anchor || subset >> t & 1 == 0) {
                let value = instance.terminal_coords(terminal)[axis];
                lo = lo.min(value);
                hi = hi.max(value);
            }
            total += Distance::from(hi.abs_diff(lo));
        }
        total
    }
}
