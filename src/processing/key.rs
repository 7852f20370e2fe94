//! # Stego Keys
//!
//! The key is a seed for the selection-map generator, not a cipher key. It only
//! decides *where* payload bits live.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use super::error::StegoError;

/// A validated seed for the selection map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StegoKey(u32);

impl StegoKey {
    /// Validate a caller-supplied key. Accepted range is `0..=u32::MAX`.
    pub fn new(key: i64) -> Result<Self, StegoError> {
        u32::try_from(key)
            .map(Self)
            .map_err(|_| StegoError::InvalidKey { key })
    }

    /// A fresh generator for this key. Never shared between calls.
    pub(crate) fn rng(self) -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(u64::from(self.0))
    }
}

impl From<u32> for StegoKey {
    fn from(value: u32) -> Self {
        Self(value)
    }
}
