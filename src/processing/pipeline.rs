//! # Encode / Decode Pipelines
//!
//! Orchestration only: acquire a [`PixelGrid`], generate the [`SelectionMap`]
//! from the key and the grid's dimensions, run the embedder or extractor, and
//! produce the output.
//!
//! ## Encoding
//! 1. Decode the cover and normalize it to RGB
//! 2. Resize to the canonical resolution
//! 3. Encode the message (optionally behind a length header)
//! 4. Embed, zero-padding every remaining flagged slot
//! 5. Re-encode as PNG
//!
//! ## Decoding
//! The stego image is *not* resized: its own dimensions are the ones the map
//! was generated for.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::bits::{self, BitSequence};
use super::embed::embed;
use super::error::StegoError;
use super::extract::extract;
use super::grid::PixelGrid;
use super::key::StegoKey;
use super::selection::SelectionMap;

/// Default canonical resolution for embedding.
pub const CANONICAL_SIZE: u32 = 2048;

/// Width of the length header used by [`Framing::LengthPrefixed`].
pub const LENGTH_HEADER_BITS: usize = 32;

/// How the message is laid out in the embedded bit stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Framing {
    /// Message bits only. Extraction needs the bit length or reads to capacity.
    #[default]
    Raw,
    /// A 32-bit big-endian byte count precedes the message bits.
    LengthPrefixed,
}

/// Codec settings, usually loaded from the `[codec]` table of the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecOptions {
    pub canonical_width: u32,
    pub canonical_height: u32,
    pub framing: Framing,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            canonical_width: CANONICAL_SIZE,
            canonical_height: CANONICAL_SIZE,
            framing: Framing::Raw,
        }
    }
}

/// Result of an embed call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedReport {
    /// Slots written: message bits plus zero padding.
    pub bits_embedded: usize,
    /// Length of the encoded message in bits, excluding any header.
    pub message_length_bits: usize,
    pub capacity: usize,
    /// The payload (header included) did not fit and was cut short.
    pub truncated: bool,
    /// The stego image as PNG.
    #[serde(skip)]
    pub image: Vec<u8>,
}

/// Result of an extract call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractReport {
    pub message: String,
    pub bits_extracted: usize,
}

/// Embed/extract entry point.
#[derive(Debug, Clone, Copy, Default)]
pub struct Codec {
    options: CodecOptions,
}

impl Codec {
    pub fn new(options: CodecOptions) -> Self {
        Self { options }
    }

    /// Hide `message` in the image at `image_bytes`.
    pub fn embed(&self, image_bytes: &[u8], message: &str, key: i64) -> Result<EmbedReport, StegoError> {
        let key = StegoKey::new(key)?;
        let grid = PixelGrid::from_bytes(image_bytes)?;
        let (grid, mut report) = self.embed_grid(grid, message, key)?;
        report.image = grid.to_png_bytes()?;
        Ok(report)
    }

    /// File-based variant of [`Codec::embed`]; `output` is always written as PNG.
    pub fn embed_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
        message: &str,
        key: i64,
    ) -> Result<EmbedReport, StegoError> {
        let key = StegoKey::new(key)?;
        let grid = PixelGrid::open(input)?;
        let (grid, report) = self.embed_grid(grid, message, key)?;
        grid.save_png(output.as_ref())?;
        info!("Saved stego image to {}", output.as_ref().display());
        Ok(report)
    }

    /// Core embed path on an already-decoded grid. Returns the mutated grid.
    pub fn embed_grid(
        &self,
        mut grid: PixelGrid,
        message: &str,
        key: StegoKey,
    ) -> Result<(PixelGrid, EmbedReport), StegoError> {
        grid.resize(self.options.canonical_width, self.options.canonical_height)?;

        let message_bits = bits::encode(message);
        let payload = self.frame(message, &message_bits);

        let map = SelectionMap::generate(key, grid.width(), grid.height());
        debug!(
            "Generated selection map for {}x{} grid, capacity {} bits",
            grid.width(),
            grid.height(),
            map.capacity()
        );

        let bits_embedded = embed(&mut grid, &payload, &map)?;
        let truncated = payload.len() > map.capacity();
        if truncated {
            warn!(
                "Payload of {} bits exceeds capacity {}; message truncated",
                payload.len(),
                map.capacity()
            );
        }
        info!(
            "Embedded {} message bits ({} slots written, capacity {})",
            message_bits.len(),
            bits_embedded,
            map.capacity()
        );

        let report = EmbedReport {
            bits_embedded,
            message_length_bits: message_bits.len(),
            capacity: map.capacity(),
            truncated,
            image: Vec::new(),
        };
        Ok((grid, report))
    }

    fn frame(&self, message: &str, message_bits: &BitSequence) -> BitSequence {
        match self.options.framing {
            Framing::Raw => message_bits.clone(),
            Framing::LengthPrefixed => {
                let length = u32::try_from(message.len()).unwrap_or(u32::MAX);
                let mut payload = BitSequence::from_bytes(&length.to_be_bytes());
                payload.extend(message_bits);
                payload
            }
        }
    }

    /// Recover text from the stego image at `image_bytes`.
    ///
    /// Never fails because of a wrong key or length; the result is simply
    /// garbage in that case.
    pub fn extract(
        &self,
        image_bytes: &[u8],
        key: i64,
        message_length_bits: Option<usize>,
    ) -> Result<ExtractReport, StegoError> {
        let key = StegoKey::new(key)?;
        let grid = PixelGrid::from_bytes(image_bytes)?;
        self.extract_grid(&grid, key, message_length_bits)
    }

    pub fn extract_file<P: AsRef<Path>>(
        &self,
        input: P,
        key: i64,
        message_length_bits: Option<usize>,
    ) -> Result<ExtractReport, StegoError> {
        let key = StegoKey::new(key)?;
        let grid = PixelGrid::open(input)?;
        self.extract_grid(&grid, key, message_length_bits)
    }

    pub fn extract_grid(
        &self,
        grid: &PixelGrid,
        key: StegoKey,
        message_length_bits: Option<usize>,
    ) -> Result<ExtractReport, StegoError> {
        let map = SelectionMap::generate(key, grid.width(), grid.height());

        let message_bits = match self.options.framing {
            Framing::Raw => {
                info!(
                    "Using message length: {} bits",
                    message_length_bits.unwrap_or(map.capacity())
                );
                extract(grid, &map, message_length_bits)?
            }
            Framing::LengthPrefixed => {
                let available = map.capacity().saturating_sub(LENGTH_HEADER_BITS);
                let length = match message_length_bits {
                    Some(length) => length,
                    None => {
                        let header = extract(grid, &map, Some(LENGTH_HEADER_BITS))?;
                        header_length_bits(&header)
                    }
                }
                .min(available);
                info!("Using message length: {} bits", length);
                extract(grid, &map, Some(LENGTH_HEADER_BITS + length))?.tail(LENGTH_HEADER_BITS)
            }
        };

        info!("Extracted {} bits", message_bits.len());
        Ok(ExtractReport {
            message: bits::decode(&message_bits),
            bits_extracted: message_bits.len(),
        })
    }
}

fn header_length_bits(header: &BitSequence) -> usize {
    let bytes: [u8; 4] = header.to_bytes().try_into().unwrap_or([0; 4]);
    (u32::from_be_bytes(bytes) as usize).saturating_mul(8)
}

/// [`Codec::embed`] with default options.
pub fn embed_message(image_bytes: &[u8], message: &str, key: i64) -> Result<EmbedReport, StegoError> {
    Codec::default().embed(image_bytes, message, key)
}

/// [`Codec::extract`] with default options.
pub fn extract_message(
    image_bytes: &[u8],
    key: i64,
    message_length_bits: Option<usize>,
) -> Result<ExtractReport, StegoError> {
    Codec::default().extract(image_bytes, key, message_length_bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn small_codec(framing: Framing) -> Codec {
        Codec::new(CodecOptions {
            canonical_width: 32,
            canonical_height: 32,
            framing,
        })
    }

    fn cover_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 5) as u8, (y * 9) as u8, (x ^ y) as u8, 200])
        });
        let mut out = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn test_embed_resizes_to_canonical() {
        let codec = small_codec(Framing::Raw);
        let report = codec.embed(&cover_png(13, 7), "hello", 42).unwrap();

        let stego = PixelGrid::from_bytes(&report.image).unwrap();
        assert_eq!((stego.width(), stego.height()), (32, 32));
        assert_eq!(report.message_length_bits, 40);
        assert_eq!(report.bits_embedded, report.capacity);
    }

    #[test]
    fn test_zero_canonical_size_rejected() {
        let codec = Codec::new(CodecOptions {
            canonical_width: 0,
            canonical_height: 0,
            framing: Framing::Raw,
        });
        assert!(matches!(
            codec.embed(&cover_png(4, 4), "Hi", 1),
            Err(StegoError::EmptyImage)
        ));
    }

    #[test]
    fn test_truncation_counts_length_header() {
        let codec = Codec::new(CodecOptions {
            canonical_width: 4,
            canonical_height: 4,
            framing: Framing::LengthPrefixed,
        });
        // 4x4 holds at most 48 bits: an 8-bit message fits on its own but
        // not behind the 32-bit header once capacity drops under 40.
        let capacity = SelectionMap::generate(StegoKey::from(1), 4, 4).capacity();
        let report = codec.embed(&cover_png(4, 4), "x", 1).unwrap();
        assert_eq!(report.capacity, capacity);
        assert_eq!(report.message_length_bits, 8);
        assert_eq!(report.truncated, capacity < 40);

        let raw = small_codec(Framing::Raw).embed(&cover_png(4, 4), "x", 1).unwrap();
        assert!(!raw.truncated);
    }

    #[test]
    fn test_raw_roundtrip_with_length() {
        let codec = small_codec(Framing::Raw);
        let report = codec.embed(&cover_png(20, 20), "round trip ✓", 99).unwrap();

        let out = codec
            .extract(&report.image, 99, Some(report.message_length_bits))
            .unwrap();
        assert_eq!(out.message, "round trip ✓");
        assert_eq!(out.bits_extracted, report.message_length_bits);
    }

    #[test]
    fn test_raw_default_length_keeps_padding() {
        let codec = small_codec(Framing::Raw);
        let report = codec.embed(&cover_png(8, 8), "pad", 3).unwrap();

        let out = codec.extract(&report.image, 3, None).unwrap();
        assert_eq!(out.bits_extracted, report.capacity);
        assert!(out.message.starts_with("pad"));
        assert!(out.message[3..].chars().all(|c| c == '\0'));
    }

    #[test]
    fn test_length_prefixed_roundtrip_without_length() {
        let codec = small_codec(Framing::LengthPrefixed);
        let report = codec.embed(&cover_png(40, 10), "self describing", 7).unwrap();

        let out = codec.extract(&report.image, 7, None).unwrap();
        assert_eq!(out.message, "self describing");
        assert_eq!(out.bits_extracted, 15 * 8);
    }

    #[test]
    fn test_wrong_key_is_not_an_error() {
        let codec = small_codec(Framing::LengthPrefixed);
        let report = codec.embed(&cover_png(16, 16), "secret", 1).unwrap();
        assert!(codec.extract(&report.image, 2, None).is_ok());
    }

    #[test]
    fn test_extract_does_not_resize() {
        let grid = PixelGrid::from_rgb(RgbImage::from_pixel(5, 6, Rgb([9, 9, 9]))).unwrap();
        let png = grid.to_png_bytes().unwrap();
        let out = small_codec(Framing::Raw).extract(&png, 4, None).unwrap();
        let capacity = SelectionMap::generate(StegoKey::from(4), 5, 6).capacity();
        assert_eq!(out.bits_extracted, capacity);
    }

    #[test]
    fn test_invalid_key_and_image() {
        let codec = small_codec(Framing::Raw);
        assert!(matches!(
            codec.embed(&cover_png(4, 4), "x", -5),
            Err(StegoError::InvalidKey { key: -5 })
        ));
        assert!(matches!(
            codec.extract(b"garbage", 1, None),
            Err(StegoError::ImageDecode(_))
        ));
    }
}
