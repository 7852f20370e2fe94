//! # Selection Map
//!
//! A keyed boolean mask over every channel slot of a grid. Slot `i` maps to
//! pixel `i / 3` (row-major, so `row * width + column`) and channel `i % 3`.
//!
//! The draw order is the contract between embed and extract: one `bool` per
//! slot from a `ChaCha20Rng` seeded with the key, slots visited row by row,
//! column by column, then R, G, B. Changing any of this breaks every image
//! produced before the change.

use rand::Rng;

use super::grid::CHANNELS;
use super::key::StegoKey;

/// Which channel slots carry payload bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionMap {
    width: u32,
    height: u32,
    flags: Vec<bool>,
    capacity: usize,
}

impl SelectionMap {
    /// Generate the map for `key` over a `width`x`height` grid.
    pub fn generate(key: StegoKey, width: u32, height: u32) -> Self {
        let slots = width as usize * height as usize * CHANNELS;
        let mut rng = key.rng();
        let flags: Vec<bool> = (0..slots).map(|_| rng.gen::<bool>()).collect();
        let capacity = flags.iter().filter(|&&f| f).count();
        Self {
            width,
            height,
            flags,
            capacity,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of flagged slots: the most bits this map can carry.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Flags in slot order.
    pub fn flags(&self) -> &[bool] {
        &self.flags
    }

    /// Slot indices of flagged channels, in traversal order.
    pub fn selected_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.flags
            .iter()
            .enumerate()
            .filter_map(|(slot, &flag)| flag.then_some(slot))
    }
}
