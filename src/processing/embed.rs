//! # Embedder
//!
//! Writes message bits into the LSB of every flagged channel, in slot order.
//! Once the message runs out the remaining flagged slots receive zeros, so the
//! output is fully determined by (cover, message, key).

use super::bits::BitSequence;
use super::error::StegoError;
use super::grid::PixelGrid;
use super::selection::SelectionMap;

pub(crate) fn check_dimensions(grid: &PixelGrid, map: &SelectionMap) -> Result<(), StegoError> {
    if grid.width() != map.width() || grid.height() != map.height() {
        return Err(StegoError::DimensionMismatch {
            map_width: map.width(),
            map_height: map.height(),
            grid_width: grid.width(),
            grid_height: grid.height(),
        });
    }
    Ok(())
}

/// Embed `message` into `grid` at the slots flagged by `map`.
///
/// Returns the number of slots written, message bits plus zero padding. A
/// message longer than the capacity is truncated silently.
pub fn embed(
    grid: &mut PixelGrid,
    message: &BitSequence,
    map: &SelectionMap,
) -> Result<usize, StegoError> {
    check_dimensions(grid, map)?;

    let mut cursor = 0;
    let mut written = 0;
    // Grid samples and map flags share the same row-major R,G,B layout.
    for (sample, &selected) in grid.samples_mut().iter_mut().zip(map.flags()) {
        if !selected {
            continue;
        }
        let bit = match message.get(cursor) {
            Some(bit) => {
                cursor += 1;
                bit
            }
            None => 0,
        };
        *sample = (*sample & 0xFE) | bit;
        written += 1;
    }

    Ok(written)
}
