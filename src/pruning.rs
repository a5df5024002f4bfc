//! Dominance pruning of grid vertices that no optimal tree needs.
//!
//! For every pair of axes the terminals are projected onto the plane they
//! span. One axis of the pair is swept layer by layer from its lowest index
//! upwards while keeping the running `[min, max]` of terminal positions on
//! the other axis over all layers seen so far. A projected point outside
//! that envelope, or on a layer below every terminal, is dominated: some
//! optimal tree avoids it. Exclusion on any plane excludes the vertex.
//!
//! Only the forward envelope is used. A mirrored backward sweep would also
//! cut vertices on layers above the topmost terminal, but combined with the
//! forward cut it can disconnect uncompressed grids.

use crate::utils::grid_position;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Exclusion flags for one projected plane, indexed `layer * width + x`.
struct Plane {
    layer_axis: usize,
    x_axis: usize,
    width: usize,
    excluded: Vec<bool>,
}

impl Plane {
    fn sweep(terminals: &[Vec<usize>], sizes: &[usize], layer_axis: usize, x_axis: usize) -> Self {
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("prune_plane", layer_axis, x_axis);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let width = sizes[x_axis];
        let height = sizes[layer_axis];
        let mut layer_range: Vec<Option<(usize, usize)>> = vec![None; height];
        for position in terminals {
            let x = position[x_axis];
            let range = &mut layer_range[position[layer_axis]];
            *range = Some(match *range {
                None => (x, x),
                Some((lo, hi)) => (lo.min(x), hi.max(x)),
            });
        }

        let mut excluded = Vec::with_capacity(width * height);
        let mut envelope: Option<(usize, usize)> = None;
        for range in layer_range {
            if let Some((lo, hi)) = range {
                envelope = Some(match envelope {
                    None => (lo, hi),
                    Some((a, b)) => (a.min(lo), b.max(hi)),
                });
            }
            excluded.extend((0..width).map(|x| match envelope {
                None => true,
                Some((lo, hi)) => x < lo || x > hi,
            }));
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            excluded = excluded.iter().filter(|&&e| e).count(),
            "plane swept"
        );

        Self {
            layer_axis,
            x_axis,
            width,
            excluded,
        }
    }

    #[inline]
    fn covers(&self, position: &[usize]) -> bool {
        self.excluded[position[self.layer_axis] * self.width + position[self.x_axis]]
    }
}

/// Compute which vertices of a grid with per-axis `sizes` are dominated,
/// given the grid positions of the terminals.
///
/// Grids with fewer than two axes are returned unpruned. Terminal vertices
/// are never excluded.
pub fn exclusion_mask(terminals: &[Vec<usize>], sizes: &[usize]) -> Vec<bool> {
    #[cfg(feature = "tracing")]
    let span = tracing::trace_span!("dominance_pruning", axes = sizes.len());
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    let volume: usize = sizes.iter().product();
    if sizes.len() < 2 || terminals.is_empty() {
        return vec![false; volume];
    }
    let pairs: Vec<(usize, usize)> = (1..sizes.len())
        .flat_map(|x_axis| (0..x_axis).map(move |layer_axis| (layer_axis, x_axis)))
        .collect();
    let planes = sweep_planes(terminals, sizes, &pairs);

    (0..volume)
        .map(|index| {
            let position = grid_position(index, sizes);
            planes.iter().any(|plane| plane.covers(&position))
        })
        .collect()
}

#[cfg(feature = "parallel")]
fn sweep_planes(terminals: &[Vec<usize>], sizes: &[usize], pairs: &[(usize, usize)]) -> Vec<Plane> {
    pairs
        .par_iter()
        .map(|&(layer_axis, x_axis)| Plane::sweep(terminals, sizes, layer_axis, x_axis))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn sweep_planes(terminals: &[Vec<usize>], sizes: &[usize], pairs: &[(usize, usize)]) -> Vec<Plane> {
    pairs
        .iter()
        .map(|&(layer_axis, x_axis)| Plane::sweep(terminals, sizes, layer_axis, x_axis))
        .collect()
}
