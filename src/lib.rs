//! Keyed LSB steganography: hide text in the least significant bits of an
//! image's RGB channels and recover it with the same numeric key.
//!
//! ```ignore
//! let cover = std::fs::read("cover.jpg")?;
//! let report = lsb_stego::embed_message(&cover, "Hi", 1)?;
//! let out = lsb_stego::extract_message(&report.image, 1, Some(report.message_length_bits))?;
//! assert_eq!(out.message, "Hi");
//! ```

pub mod common;
pub mod processing;
pub mod server;

pub use processing::{
    embed_message, extract_message, Codec, CodecOptions, EmbedReport, ExtractReport, Framing,
    StegoError,
};
