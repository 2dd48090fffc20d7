//! Image decoding for the rotation stage.
//!
//! Rendered labels arrive as PNG bytes. Decoding keeps the colour type and
//! bit depth exactly as stored, so a decoded [`PixelGrid`] can be permuted
//! and encoded again without touching a single sample value.
//!
//! # Examples
//!
//! ```ignore
//! use stripey_core::decode::decode_png;
//!
//! let grid = decode_png(&png_bytes)?;
//! println!("Decoded {}x{} label", grid.width, grid.height);
//! ```

mod png;
mod types;

pub use png::{decode_png, png_dimensions};
pub use types::{DecodeError, PixelGrid};
