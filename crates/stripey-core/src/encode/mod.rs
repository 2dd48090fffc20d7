//! Image encoding pipeline.
//!
//! This module provides functionality for:
//! - Encoding pixel grids to PNG, the format every stage exchanges
//!
//! # Examples
//!
//! ```ignore
//! use stripey_core::encode::encode_png;
//!
//! let png_bytes = encode_png(&grid)?;
//! println!("Encoded {} bytes", png_bytes.len());
//! ```

mod png;

pub use png::{encode_png, EncodeError};
