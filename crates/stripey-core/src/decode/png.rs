//! PNG decoding for rendered labels.

use std::io::Cursor;

use image::{ImageFormat, ImageReader};

use super::{DecodeError, PixelGrid};

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Decode PNG bytes into a [`PixelGrid`], keeping the stored colour type.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a PNG.
/// Returns `DecodeError::CorruptedFile` if the PNG is corrupted.
pub fn decode_png(bytes: &[u8]) -> Result<PixelGrid, DecodeError> {
    let reader = png_reader(bytes)?;
    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    PixelGrid::from_dynamic(img)
}

/// Read only the dimensions from a PNG header.
pub fn png_dimensions(bytes: &[u8]) -> Result<(u32, u32), DecodeError> {
    png_reader(bytes)?
        .into_dimensions()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

fn png_reader(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, DecodeError> {
    if !bytes.starts_with(PNG_SIGNATURE) {
        return Err(DecodeError::InvalidFormat);
    }
    Ok(ImageReader::with_format(Cursor::new(bytes), ImageFormat::Png))
}
