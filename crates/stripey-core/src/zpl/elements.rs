//! Structured label description produced by the parser.
//!
//! All coordinates and sizes are in printer dots.

use crate::transform::Rotation;

/// One `^XA ... ^XZ` block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelInfo {
    /// `^PW`, used when the configured width is zero.
    pub print_width: Option<u32>,
    /// `^LL`, used when the configured height is zero.
    pub label_length: Option<u32>,
    /// `^POI`: the finished label is turned upside down.
    pub inverted: bool,
    /// Fields in the order they are painted.
    pub elements: Vec<LabelElement>,
}

/// Field orientation from `^A`, `^FW` and the barcode commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldOrientation {
    /// `N`
    #[default]
    Normal,
    /// `R`: turned 90 degrees clockwise.
    Rotated,
    /// `I`: turned 180 degrees.
    Inverted,
    /// `B`: read from bottom up, 270 degrees clockwise.
    Bottom,
}

impl FieldOrientation {
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'N' => Some(FieldOrientation::Normal),
            'R' => Some(FieldOrientation::Rotated),
            'I' => Some(FieldOrientation::Inverted),
            'B' => Some(FieldOrientation::Bottom),
            _ => None,
        }
    }

    /// Grid rotation that turns an upright rendering into this orientation.
    pub fn rotation(self) -> Rotation {
        match self {
            FieldOrientation::Normal => Rotation::None,
            FieldOrientation::Rotated => Rotation::Deg270,
            FieldOrientation::Inverted => Rotation::Deg180,
            FieldOrientation::Bottom => Rotation::Deg90,
        }
    }
}

/// How a field origin relates to the rendered field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// `^FO`: origin is the top-left corner.
    TopLeft,
    /// `^FT`: origin is the baseline of text, the bottom-left of anything else.
    Baseline,
}

/// Field origin after `^LH` has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Origin {
    pub x: i32,
    pub y: i32,
    pub anchor: Anchor,
}

/// Font selection from `^A` or `^CF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontSpec {
    /// Font name, `0` for the scalable font. Every name renders with the
    /// loaded font; the name is kept for reference.
    pub name: char,
    pub orientation: FieldOrientation,
    /// Character height in dots.
    pub height: u32,
    /// Character width in dots; zero means proportional to the height.
    pub width: u32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            name: 'A',
            orientation: FieldOrientation::Normal,
            height: 9,
            width: 5,
        }
    }
}

/// Text alignment inside a `^FB` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justification {
    #[default]
    Left,
    Center,
    Right,
    Justified,
}

/// `^FB`: wrap text into a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldBlock {
    /// Block width in dots.
    pub width: u32,
    /// Lines kept; text beyond this is dropped.
    pub max_lines: u32,
    /// Extra space between lines in dots (may be negative).
    pub line_spacing: i32,
    pub justification: Justification,
}

/// Black or white ink for graphic commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineColor {
    #[default]
    Black,
    White,
}

impl LineColor {
    pub fn from_code(code: &str) -> Self {
        if code.trim().eq_ignore_ascii_case("W") {
            LineColor::White
        } else {
            LineColor::Black
        }
    }
}

/// Code 128 subset selection (`^BC` mode parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Code128Mode {
    /// `N`: subset B unless the data starts with an invocation code.
    #[default]
    Normal,
    /// `A`: switch subsets automatically to keep the symbol short.
    Automatic,
}

/// Layout shared by the linear barcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarcodeLayout {
    pub orientation: FieldOrientation,
    /// Narrow bar width in dots (`^BY`).
    pub module_width: u32,
    /// Bar height in dots.
    pub height: u32,
    /// Print the human readable interpretation line.
    pub interpretation: bool,
    /// Put the interpretation line above the bars.
    pub interpretation_above: bool,
}

/// QR error correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QrErrorCorrection {
    Low,
    Medium,
    #[default]
    Quartile,
    High,
}

impl QrErrorCorrection {
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'L' => Some(QrErrorCorrection::Low),
            'M' => Some(QrErrorCorrection::Medium),
            'Q' => Some(QrErrorCorrection::Quartile),
            'H' => Some(QrErrorCorrection::High),
            _ => None,
        }
    }
}

/// What a field draws.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Text {
        text: String,
        font: FontSpec,
        block: Option<FieldBlock>,
    },
    Code128 {
        data: String,
        layout: BarcodeLayout,
        mode: Code128Mode,
    },
    Ean13 {
        data: String,
        layout: BarcodeLayout,
    },
    Qr {
        data: String,
        error_correction: QrErrorCorrection,
        /// Module size in dots; `None` picks one from the print density.
        magnification: Option<u32>,
    },
    GraphicBox {
        width: u32,
        height: u32,
        thickness: u32,
        color: LineColor,
        /// Corner rounding, 0 (square) to 8.
        rounding: u32,
    },
    GraphicCircle {
        diameter: u32,
        thickness: u32,
        color: LineColor,
    },
    GraphicEllipse {
        width: u32,
        height: u32,
        thickness: u32,
        color: LineColor,
    },
    GraphicField {
        /// Bytes per row.
        row_bytes: u32,
        rows: u32,
        /// Packed rows, most significant bit first, 1 = black dot.
        data: Vec<u8>,
    },
}

/// A positioned field.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelElement {
    pub origin: Origin,
    /// `^FR` or `^LRY`: invert whatever the field covers.
    pub reverse: bool,
    pub kind: ElementKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_orientation_from_code() {
        assert_eq!(FieldOrientation::from_code('n'), Some(FieldOrientation::Normal));
        assert_eq!(FieldOrientation::from_code('R'), Some(FieldOrientation::Rotated));
        assert_eq!(FieldOrientation::from_code('I'), Some(FieldOrientation::Inverted));
        assert_eq!(FieldOrientation::from_code('B'), Some(FieldOrientation::Bottom));
        assert_eq!(FieldOrientation::from_code('X'), None);
    }

    #[test]
    fn test_field_orientation_turns_clockwise() {
        // R turns the top-left corner to the top-right: the (H-1-y, x) mapping.
        assert_eq!(FieldOrientation::Rotated.rotation(), Rotation::Deg270);
        assert_eq!(FieldOrientation::Bottom.rotation(), Rotation::Deg90);
        assert_eq!(FieldOrientation::Inverted.rotation(), Rotation::Deg180);
        assert_eq!(FieldOrientation::Normal.rotation(), Rotation::None);
    }

    #[test]
    fn test_line_color_from_code() {
        assert_eq!(LineColor::from_code("W"), LineColor::White);
        assert_eq!(LineColor::from_code("w"), LineColor::White);
        assert_eq!(LineColor::from_code("B"), LineColor::Black);
        assert_eq!(LineColor::from_code(""), LineColor::Black);
    }

    #[test]
    fn test_qr_error_correction_from_code() {
        assert_eq!(QrErrorCorrection::from_code('h'), Some(QrErrorCorrection::High));
        assert_eq!(QrErrorCorrection::from_code('?'), None);
        assert_eq!(QrErrorCorrection::default(), QrErrorCorrection::Quartile);
    }
}
