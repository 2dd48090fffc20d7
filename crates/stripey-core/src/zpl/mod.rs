//! ZPL II markup parsing.
//!
//! The parser reads a practical subset of ZPL: text, Code 128, EAN-13 and QR
//! barcodes, boxes, circles, ellipses and graphic fields, along with the
//! label and field settings that position them.

mod elements;
mod graphic_field;
mod hex_escape;
mod lexer;
mod parser;

pub use elements::{
    Anchor, BarcodeLayout, Code128Mode, ElementKind, FieldBlock, FieldOrientation, FontSpec,
    Justification, LabelElement, LabelInfo, LineColor, Origin, QrErrorCorrection,
};
pub use parser::ZplParser;

/// Largest dot value a numeric parameter may carry (ZPL's documented range).
pub const MAX_DOTS: u32 = 32_000;

use thiserror::Error;

/// Errors that can occur while parsing ZPL.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A `^FH` escape is not followed by two hex digits.
    #[error("invalid hex escape at position {position} of field data")]
    InvalidHexEscape { position: usize },

    /// Malformed `^GF` payload.
    #[error("graphic field: {0}")]
    GraphicField(String),

    /// A numeric parameter that is not a number or is out of range.
    #[error("invalid parameter '{value}' for ^{command}")]
    InvalidParameter { command: String, value: String },
}
