//! # Image Processing and Steganography
//!
//! Keyed LSB steganography over RGB images. A key seeds a selection map that
//! decides which channel slots carry payload bits; the embedder and extractor
//! walk the grid in the same row-major order against that map.
//!
//! ## Modules
//!
//! - [`grid`]: decoded, RGB-normalized pixel buffer
//! - [`bits`]: text to MSB-first bits and back
//! - [`key`]: key validation and generator seeding
//! - [`selection`]: keyed selection map and capacity
//! - [`embed`] / [`extract`]: the LSB writer and reader
//! - [`pipeline`]: end-to-end embed/extract with reports

pub mod bits;
pub mod embed;
pub mod error;
pub mod extract;
pub mod grid;
pub mod key;
pub mod pipeline;
pub mod selection;

// Re-export main types for convenience
pub use bits::BitSequence;
pub use error::StegoError;
pub use grid::PixelGrid;
pub use key::StegoKey;
pub use pipeline::{
    embed_message, extract_message, Codec, CodecOptions, EmbedReport, ExtractReport, Framing,
};
pub use selection::SelectionMap;
