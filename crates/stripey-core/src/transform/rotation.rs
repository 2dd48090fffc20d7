//! Discrete quarter-turn rotation of rendered labels.
//!
//! Only the four axis-aligned angles are supported. Rotation is a pure
//! permutation of pixels: every source pixel lands on exactly one destination
//! pixel and its bytes are copied verbatim, so there is no interpolation and
//! no colour loss.
//!
//! # Coordinate mapping
//!
//! For a source grid of `W x H`, a source pixel at `(x, y)` lands on:
//!
//! ```text
//! 90   -> (y, W-1-x)       output H x W
//! 180  -> (W-1-x, H-1-y)   output W x H
//! 270  -> (H-1-y, x)       output H x W
//! ```
//!
//! With y pointing down, `90` carries the top-left corner to the bottom-left
//! and `270` carries it to the top-right. Three `90` turns equal one `270`.

use tracing::debug;

use crate::decode::{decode_png, DecodeError, PixelGrid};
use crate::encode::{encode_png, EncodeError};

/// A rotation angle restricted to quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    /// No rotation.
    #[default]
    None,
    /// `(x, y) -> (y, W-1-x)`.
    Deg90,
    /// `(x, y) -> (W-1-x, H-1-y)`.
    Deg180,
    /// `(x, y) -> (H-1-y, x)`.
    Deg270,
}

impl Rotation {
    /// Map a configured angle to a rotation.
    ///
    /// Anything other than 90, 180 or 270 is [`Rotation::None`]; a value
    /// such as 45 or -90 renders the label unrotated instead of failing.
    pub fn from_degrees(degrees: i32) -> Self {
        match degrees {
            90 => Rotation::Deg90,
            180 => Rotation::Deg180,
            270 => Rotation::Deg270,
            _ => Rotation::None,
        }
    }

    pub fn degrees(self) -> i32 {
        match self {
            Rotation::None => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Returns true if this rotation swaps width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// Errors from the encoded-image rotation path.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("decoding PNG: {0}")]
    Decode(#[from] DecodeError),

    #[error("encoding PNG: {0}")]
    Encode(#[from] EncodeError),
}

/// Dimensions of a `width x height` grid after `rotation`.
pub fn rotated_dimensions(width: u32, height: u32, rotation: Rotation) -> (u32, u32) {
    if rotation.swaps_dimensions() {
        (height, width)
    } else {
        (width, height)
    }
}

/// Rotate a decoded grid, producing a new grid with the same colour type.
pub fn rotate_grid(grid: &PixelGrid, rotation: Rotation) -> PixelGrid {
    if rotation == Rotation::None {
        return grid.clone();
    }

    let (src_w, src_h) = (grid.width, grid.height);
    let (dst_w, dst_h) = rotated_dimensions(src_w, src_h, rotation);
    let mut output = PixelGrid::blank(dst_w, dst_h, grid.color);

    for y in 0..src_h {
        for x in 0..src_w {
            let (dst_x, dst_y) = destination(x, y, src_w, src_h, rotation);
            output.pixel_mut(dst_x, dst_y).copy_from_slice(grid.pixel(x, y));
        }
    }

    output
}

/// Rotate PNG bytes by a configured angle.
///
/// Angles outside {90, 180, 270} return `png` untouched: no decode, no
/// re-encode, byte-identical output.
pub fn rotate_png(png: Vec<u8>, degrees: i32) -> Result<Vec<u8>, TransformError> {
    let rotation = Rotation::from_degrees(degrees);
    if rotation == Rotation::None {
        debug!(degrees, "No rotation requested, passing image through");
        return Ok(png);
    }

    let grid = decode_png(&png)?;
    debug!(
        w = grid.width,
        h = grid.height,
        degrees = rotation.degrees(),
        "Rotating label image"
    );
    let rotated = rotate_grid(&grid, rotation);
    Ok(encode_png(&rotated)?)
}

#[inline]
fn destination(x: u32, y: u32, width: u32, height: u32, rotation: Rotation) -> (u32, u32) {
    match rotation {
        Rotation::None => (x, y),
        Rotation::Deg90 => (y, width - 1 - x),
        Rotation::Deg180 => (width - 1 - x, height - 1 - y),
        Rotation::Deg270 => (height - 1 - y, x),
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
