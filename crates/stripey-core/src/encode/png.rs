//! PNG encoding for rendered and rotated labels.
//!
//! This module provides PNG encoding using the `image` crate's PNG encoder.
//! The colour type of the grid is written as-is, so encoding never changes
//! a pixel value.

use image::codecs::png::PngEncoder;
use image::ImageEncoder;
use thiserror::Error;

use crate::decode::PixelGrid;

/// Errors that can occur during PNG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode a pixel grid to PNG bytes.
///
/// # Returns
///
/// PNG-encoded bytes on success, or an error if encoding fails.
pub fn encode_png(grid: &PixelGrid) -> Result<Vec<u8>, EncodeError> {
    let PixelGrid {
        width,
        height,
        color,
        ref pixels,
    } = *grid;

    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = width as usize * height as usize * color.bytes_per_pixel() as usize;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, color.into())
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_png;
    use image::ColorType;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G'];

    #[test]
    fn test_encode_png_basic() {
        let grid = PixelGrid::new(10, 10, ColorType::L8, vec![128u8; 100]);
        let png = encode_png(&grid).unwrap();

        assert_eq!(&png[0..4], PNG_MAGIC);
    }

    #[test]
    fn test_encode_png_is_lossless() {
        let pixels: Vec<u8> = (0..(7 * 5 * 4)).map(|i| (i * 37 % 256) as u8).collect();
        let grid = PixelGrid::new(7, 5, ColorType::Rgba8, pixels);

        let decoded = decode_png(&encode_png(&grid).unwrap()).unwrap();
        assert_eq!(decoded, grid);
    }

    #[test]
    fn test_encode_png_sixteen_bit() {
        let pixels: Vec<u8> = (0..(3 * 2 * 2)).map(|i| (i * 53 % 256) as u8).collect();
        let grid = PixelGrid::new(3, 2, ColorType::L16, pixels);

        let decoded = decode_png(&encode_png(&grid).unwrap()).unwrap();
        assert_eq!(decoded.color, ColorType::L16);
        assert_eq!(decoded.pixels, grid.pixels);
    }

    #[test]
    fn test_encode_png_invalid_pixel_data_short() {
        let grid = PixelGrid {
            width: 10,
            height: 10,
            color: ColorType::Rgb8,
            pixels: vec![0u8; 9 * 10 * 3],
        };

        let result = encode_png(&grid);
        assert!(matches!(result, Err(EncodeError::InvalidPixelData { .. })));
    }

    #[test]
    fn test_encode_png_zero_width() {
        let grid = PixelGrid {
            width: 0,
            height: 10,
            color: ColorType::L8,
            pixels: vec![],
        };

        let result = encode_png(&grid);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_encode_png_deterministic() {
        let grid = PixelGrid::new(20, 3, ColorType::L8, vec![200u8; 60]);
        assert_eq!(encode_png(&grid).unwrap(), encode_png(&grid).unwrap());
    }
}
