//! # Codec Errors
//!
//! Only a handful of conditions are fatal to the codec. A wrong key or a wrong
//! message length is never an error: extraction still succeeds and simply
//! returns whatever the selected LSBs happen to contain.

use thiserror::Error;

/// Errors raised by the embedding and extraction pipelines.
#[derive(Debug, Error)]
pub enum StegoError {
    /// The source image is missing, unreadable or corrupt.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[source] image::ImageError),

    /// The image decoded but has no pixels.
    #[error("image has zero width or height")]
    EmptyImage,

    /// The key cannot be used as a seed.
    #[error("invalid key {key}: must be between 0 and {max}", max = u32::MAX)]
    InvalidKey { key: i64 },

    /// A selection map was applied to a grid of different dimensions.
    #[error("selection map is {map_width}x{map_height} but grid is {grid_width}x{grid_height}")]
    DimensionMismatch {
        map_width: u32,
        map_height: u32,
        grid_width: u32,
        grid_height: u32,
    },

    /// The stego image could not be encoded as PNG.
    #[error("failed to encode image: {0}")]
    ImageEncode(#[source] image::ImageError),

    /// Writing the output image failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl StegoError {
    /// True for failures caused by the caller's input rather than the host.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::ImageDecode(_) | Self::EmptyImage | Self::InvalidKey { .. }
        )
    }
}
