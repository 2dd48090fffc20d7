//! Core types for image decoding.

use image::{ColorType, DynamicImage, GrayImage};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes do not start with a PNG signature.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image data is corrupted or incomplete.
    #[error("Corrupted or incomplete image: {0}")]
    CorruptedFile(String),

    /// The decoder produced a pixel layout PNG cannot store again.
    #[error("Unsupported pixel layout: {0:?}")]
    UnsupportedColor(ColorType),
}

/// A decoded image: an addressable grid of pixels.
///
/// Pixels are stored row-major in the decoder's native layout, so a grid
/// round-trips through [`crate::encode::encode_png`] without any conversion.
/// 16-bit samples are kept in native endianness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Channel layout and bit depth of `pixels`.
    pub color: ColorType,
    /// Pixel bytes in row-major order.
    /// Length should be width * height * color.bytes_per_pixel().
    pub pixels: Vec<u8>,
}

impl PixelGrid {
    /// Create a new PixelGrid with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, color: ColorType, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * color.bytes_per_pixel() as usize,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            color,
            pixels,
        }
    }

    /// Create a zero-filled grid.
    pub fn blank(width: u32, height: u32, color: ColorType) -> Self {
        let len = width as usize * height as usize * color.bytes_per_pixel() as usize;
        Self::new(width, height, color, vec![0; len])
    }

    /// Take ownership of a decoded image without converting its pixels.
    pub fn from_dynamic(img: DynamicImage) -> Result<Self, DecodeError> {
        let color = img.color();
        match color {
            ColorType::L8
            | ColorType::La8
            | ColorType::Rgb8
            | ColorType::Rgba8
            | ColorType::L16
            | ColorType::La16
            | ColorType::Rgb16
            | ColorType::Rgba16 => {}
            other => return Err(DecodeError::UnsupportedColor(other)),
        }
        let (width, height) = (img.width(), img.height());
        Ok(Self::new(width, height, color, img.into_bytes()))
    }

    /// Wrap an 8-bit grayscale buffer.
    pub fn from_gray(img: GrayImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(width, height, ColorType::L8, img.into_raw())
    }

    /// Convert back into an 8-bit grayscale buffer.
    ///
    /// Returns `None` if the grid is not `L8`.
    pub fn into_gray(self) -> Option<GrayImage> {
        if self.color != ColorType::L8 {
            return None;
        }
        GrayImage::from_raw(self.width, self.height, self.pixels)
    }

    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        self.color.bytes_per_pixel() as usize
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.bytes_per_pixel()
    }

    /// Bytes of the pixel at (x, y).
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let start = self.offset(x, y);
        &self.pixels[start..start + self.bytes_per_pixel()]
    }

    /// Mutable bytes of the pixel at (x, y).
    #[inline]
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut [u8] {
        let start = self.offset(x, y);
        let bpp = self.bytes_per_pixel();
        &mut self.pixels[start..start + bpp]
    }
}
