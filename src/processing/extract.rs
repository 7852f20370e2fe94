//! # Extractor
//!
//! Reads the LSB of each flagged channel in the same slot order the embedder
//! wrote them, stopping as soon as the requested number of bits is collected.

use super::bits::BitSequence;
use super::embed::check_dimensions;
use super::error::StegoError;
use super::grid::PixelGrid;
use super::selection::SelectionMap;

/// Read up to `message_length` bits (default: the map's capacity).
pub fn extract(
    grid: &PixelGrid,
    map: &SelectionMap,
    message_length: Option<usize>,
) -> Result<BitSequence, StegoError> {
    check_dimensions(grid, map)?;

    let wanted = message_length.unwrap_or(map.capacity()).min(map.capacity());
    let mut bits = BitSequence::with_capacity(wanted);
    if wanted == 0 {
        return Ok(bits);
    }

    for (&sample, &selected) in grid.samples().iter().zip(map.flags()) {
        if !selected {
            continue;
        }
        bits.push(sample & 0x01);
        if bits.len() >= wanted {
            break;
        }
    }

    Ok(bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::bits;
    use crate::processing::embed::embed;
    use crate::processing::key::StegoKey;
    use image::{Rgb, RgbImage};

    fn cover(width: u32, height: u32) -> PixelGrid {
        PixelGrid::from_rgb(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 7) as u8, (y * 13) as u8, (x + y) as u8])
        }))
        .unwrap()
    }

    #[test]
    fn test_default_reads_full_capacity() {
        let grid = cover(10, 10);
        let map = SelectionMap::generate(StegoKey::from(5), 10, 10);
        let bits = extract(&grid, &map, None).unwrap();
        assert_eq!(bits.len(), map.capacity());
    }

    #[test]
    fn test_prefix_property() {
        let mut grid = cover(16, 16);
        let map = SelectionMap::generate(StegoKey::from(8), 16, 16);
        embed(&mut grid, &bits::encode("prefix check"), &map).unwrap();

        let full = extract(&grid, &map, None).unwrap();
        for len in [0, 1, 7, 8, 50, 96] {
            let partial = extract(&grid, &map, Some(len)).unwrap();
            assert_eq!(partial.as_slice(), &full.as_slice()[..len]);
        }
    }

    #[test]
    fn test_length_clamped_to_capacity() {
        let grid = cover(3, 3);
        let map = SelectionMap::generate(StegoKey::from(2), 3, 3);
        let bits = extract(&grid, &map, Some(10_000)).unwrap();
        assert_eq!(bits.len(), map.capacity());
    }

    #[test]
    fn test_hi_scenario() {
        let mut grid = cover(4, 4);
        let original = grid.clone();
        let map = SelectionMap::generate(StegoKey::from(1), 4, 4);
        assert!(map.capacity() >= 16);

        let written = embed(&mut grid, &bits::encode("Hi"), &map).unwrap();
        assert_eq!(written, map.capacity());

        for (slot, (&a, &b)) in original.samples().iter().zip(grid.samples()).enumerate() {
            if !map.flags()[slot] {
                assert_eq!(a, b);
            }
        }

        let recovered = extract(&grid, &map, Some(16)).unwrap();
        assert_eq!(bits::decode(&recovered), "Hi");

        let short = extract(&grid, &map, Some(5)).unwrap();
        assert_eq!(bits::decode(&short), "");
    }
}
