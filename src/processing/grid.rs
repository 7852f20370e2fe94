//! # Pixel Grid
//!
//! An owned RGB raster. Every image entering the codec is normalized to three
//! 8-bit channels in R, G, B order: alpha is dropped and greyscale is
//! replicated. The backing buffer is row-major with channels interleaved, which
//! is the same layout the selection map uses.

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, RgbImage};
use log::debug;
use std::io::Cursor;
use std::path::Path;

use super::error::StegoError;

/// Number of channels per pixel carried by a grid.
pub const CHANNELS: usize = 3;

/// Owned RGB pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    image: RgbImage,
}

impl PixelGrid {
    /// Wrap an existing RGB buffer.
    pub fn from_rgb(image: RgbImage) -> Result<Self, StegoError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(StegoError::EmptyImage);
        }
        Ok(Self { image })
    }

    /// Decode any format supported by the `image` crate.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StegoError> {
        let img = image::load_from_memory(bytes).map_err(StegoError::ImageDecode)?;
        Self::from_dynamic(img)
    }

    /// Decode an image file. A missing file is a decode error.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StegoError> {
        let img = image::open(path).map_err(StegoError::ImageDecode)?;
        Self::from_dynamic(img)
    }

    fn from_dynamic(img: DynamicImage) -> Result<Self, StegoError> {
        if !matches!(img, DynamicImage::ImageRgb8(_)) {
            debug!("Converting {:?} image to RGB8", img.color());
        }
        Self::from_rgb(img.into_rgb8())
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Channel values in row-major, R-G-B interleaved order.
    pub fn samples(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub(crate) fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.image
    }

    /// Resample to `width`x`height` with a bicubic filter. A no-op when the
    /// grid already has that size; a zero dimension is rejected.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), StegoError> {
        if width == 0 || height == 0 {
            return Err(StegoError::EmptyImage);
        }
        if self.width() == width && self.height() == height {
            return Ok(());
        }
        debug!(
            "Resizing grid {}x{} -> {}x{}",
            self.width(),
            self.height(),
            width,
            height
        );
        self.image = image::imageops::resize(&self.image, width, height, FilterType::CatmullRom);
        Ok(())
    }

    /// Encode as PNG. Lossy formats would destroy the payload.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, StegoError> {
        let mut output = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut output), ImageFormat::Png)
            .map_err(StegoError::ImageEncode)?;
        Ok(output)
    }

    /// Write the grid as a PNG file, creating parent directories.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), StegoError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_png_bytes()?)?;
        Ok(())
    }

}
