//! Sparse trie keyed by terminal-subset bitmasks.
//!
//! A [`SubsetStore`] maps subset keys of up to 64 bits to values without
//! allocating a dense `2^bits` table. The key is cut into layers of
//! `layer_width` bits starting from the high end; the topmost layer takes
//! whatever remainder is left so the rest are all full width. Each trie node
//! owns its children, so dropping the store releases every layer.
//!
//! Lookups and inserts touch one node per layer, i.e. `O(bits / layer_width)`,
//! and memory grows with the number of distinct keys actually stored.

use crate::error::{Result, SteinerError};
use crate::grid::{SubsetKey, SUBSET_KEY_BITS};

/// Widest layer a store accepts.
pub const MAX_LAYER_WIDTH: usize = 16;

enum Node<V> {
    Inner(Box<[Option<Box<Node<V>>>]>),
    Leaf(Box<[Option<V>]>),
}

impl<V> Node<V> {
    fn boxed(layout: &Layout, layer: usize) -> Box<Self> {
        let fanout = 1usize << layout.bits[layer];
        let node = if layer + 1 == layout.bits.len() {
            Node::Leaf((0..fanout).map(|_| None).collect())
        } else {
            Node::Inner((0..fanout).map(|_| None).collect())
        };
        Box::new(node)
    }
}

/// Bit split of a key, top layer first.
struct Layout {
    shifts: Vec<u32>,
    bits: Vec<u32>,
}

impl Layout {
    fn new(key_bits: usize, layer_width: usize) -> Self {
        let layers = key_bits.div_ceil(layer_width).max(1);
        let first = key_bits - layer_width * (layers - 1);
        let mut shifts = Vec::with_capacity(layers);
        let mut bits = Vec::with_capacity(layers);
        let mut remaining = key_bits;
        for layer in 0..layers {
            let width = if layer == 0 { first } else { layer_width };
            remaining -= width;
            shifts.push(remaining as u32);
            bits.push(width as u32);
        }
        Self { shifts, bits }
    }

    #[inline]
    fn index(&self, key: SubsetKey, layer: usize) -> usize {
        let bits = self.bits[layer];
        if bits == 0 {
            return 0;
        }
        let mask = (1u64 << bits) - 1;
        ((key >> self.shifts[layer]) & mask) as usize
    }
}

/// Sparse map from subset keys to values, one instance per grid vertex.
pub struct SubsetStore<V> {
    root: Option<Box<Node<V>>>,
    layout: Layout,
    key_bits: usize,
    layer_width: usize,
    len: usize,
}

impl<V> SubsetStore<V> {
    /// Create an empty store for keys of `key_bits` bits.
    ///
    /// A store of zero bits holds exactly one slot (key `0`).
    ///
    /// # Panics
    /// Panics if `key_bits` exceeds the 64-bit key width.
    pub fn new(key_bits: usize, layer_width: usize) -> Result<Self> {
        assert!(
            key_bits <= SUBSET_KEY_BITS,
            "subset keys are at most {SUBSET_KEY_BITS} bits"
        );
        if !(1..=MAX_LAYER_WIDTH).contains(&layer_width) {
            return Err(SteinerError::InvalidLayerWidth {
                width: layer_width,
                max: MAX_LAYER_WIDTH,
            });
        }
        Ok(Self {
            root: None,
            layout: Layout::new(key_bits, layer_width),
            key_bits,
            layer_width,
            len: 0,
        })
    }

    pub fn key_bits(&self) -> usize {
        self.key_bits
    }

    pub fn layer_width(&self) -> usize {
        self.layer_width
    }

    /// Number of trie levels a lookup walks.
    pub fn layer_count(&self) -> usize {
        self.layout.bits.len()
    }

    /// Number of keys currently mapped.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Look up `key`, returning `None` on any missing branch.
    pub fn get(&self, key: SubsetKey) -> Option<&V> {
        debug_assert!(self.fits(key), "key {key:#x} wider than {} bits", self.key_bits);
        let mut node = self.root.as_deref()?;
        let mut layer = 0;
        loop {
            let idx = self.layout.index(key, layer);
            match node {
                Node::Leaf(values) => return values[idx].as_ref(),
                Node::Inner(children) => {
                    node = children[idx].as_deref()?;
                    layer += 1;
                }
            }
        }
    }

    pub fn get_mut(&mut self, key: SubsetKey) -> Option<&mut V> {
        debug_assert!(self.fits(key), "key {key:#x} wider than {} bits", self.key_bits);
        let mut node = self.root.as_deref_mut()?;
        let mut layer = 0;
        loop {
            let idx = self.layout.index(key, layer);
            match node {
                Node::Leaf(values) => return values[idx].as_mut(),
                Node::Inner(children) => {
                    node = children[idx].as_deref_mut()?;
                    layer += 1;
                }
            }
        }
    }

    /// Map `key` to `value`, returning the value it replaced.
    pub fn insert(&mut self, key: SubsetKey, value: V) -> Option<V> {
        let slot = self.slot_mut(key);
        let previous = slot.replace(value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Return the value mapped at `key`, inserting `value` only if the slot is
    /// empty. An existing mapping is never overwritten.
    pub fn get_or_insert(&mut self, key: SubsetKey, value: V) -> &mut V {
        let vacant = self.slot_mut(key).is_none();
        if vacant {
            self.len += 1;
        }
        self.slot_mut(key).get_or_insert(value)
    }

    fn fits(&self, key: SubsetKey) -> bool {
        self.key_bits >= SUBSET_KEY_BITS || key >> self.key_bits == 0
    }

    /// Walk to the leaf slot for `key`, allocating missing layers on the way.
    fn slot_mut(&mut self, key: SubsetKey) -> &mut Option<V> {
        debug_assert!(self.fits(key), "key {key:#x} wider than {} bits", self.key_bits);
        let layout = &self.layout;
        let mut node = self.root.get_or_insert_with(|| Node::boxed(layout, 0));
        let mut layer = 0;
        loop {
            let idx = layout.index(key, layer);
            match &mut **node {
                Node::Leaf(values) => return &mut values[idx],
                Node::Inner(children) => {
                    layer += 1;
                    node = children[idx].get_or_insert_with(|| Node::boxed(layout, layer));
                }
            }
        }
    }
}
