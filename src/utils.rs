//! Assorted grid and sizing helpers.

use crate::grid::{Coord, Distance};

/// Widest trie layer picked automatically.
const DEFAULT_MAX_LAYER_BITS: usize = 8;

/// Pick a balanced per-layer bit width for a subset key of `key_bits` bits.
///
/// Splits the key into the fewest layers of at most eight bits and spreads the
/// bits evenly across them, so a 9-bit key uses two 5-bit layers rather than
/// an 8-bit and a 1-bit one.
#[inline]
pub fn default_layer_width(key_bits: usize) -> usize {
    if key_bits <= 1 {
        1
    } else {
        let layers = key_bits.div_ceil(DEFAULT_MAX_LAYER_BITS);
        key_bits.div_ceil(layers)
    }
}

/// Row-major strides for a grid with the given per-axis sizes (axis 0 fastest).
pub fn grid_steps(sizes: &[usize]) -> Vec<usize> {
    let mut steps = Vec::with_capacity(sizes.len());
    let mut step = 1usize;
    for &size in sizes {
        steps.push(step);
        step = step.saturating_mul(size);
    }
    steps
}

/// Total number of vertices, or `None` on overflow.
pub fn checked_volume(sizes: &[usize]) -> Option<usize> {
    sizes
        .iter()
        .try_fold(1usize, |acc, &size| acc.checked_mul(size))
}

#[inline]
pub fn linear_index(position: &[usize], steps: &[usize]) -> usize {
    position.iter().zip(steps).map(|(p, s)| p * s).sum()
}

/// Inverse of [`linear_index`].
pub fn grid_position(mut index: usize, sizes: &[usize]) -> Vec<usize> {
    let mut position = Vec::with_capacity(sizes.len());
    for &size in sizes {
        position.push(index % size.max(1));
        index /= size.max(1);
    }
    position
}

/// Rectilinear distance between two points of equal dimension.
#[inline]
pub fn manhattan(a: &[Coord], b: &[Coord]) -> Distance {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| Distance::from(x.abs_diff(y)))
        .sum()
}
