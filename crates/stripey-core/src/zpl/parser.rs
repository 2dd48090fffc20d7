//! Turns tokenized ZPL into [`LabelInfo`] values.

use tracing::{debug, trace};

use super::elements::{
    Anchor, BarcodeLayout, Code128Mode, ElementKind, FieldBlock, FieldOrientation, FontSpec,
    Justification, LabelElement, LabelInfo, LineColor, Origin, QrErrorCorrection,
};
use super::graphic_field::parse_graphic_field;
use super::hex_escape::decode_hex_escapes;
use super::lexer::{tokenize, RawCommand};
use super::{ParseError, MAX_DOTS};
use crate::pipeline::MarkupParser;

const DEFAULT_MODULE_WIDTH: u32 = 2;
const DEFAULT_BARCODE_HEIGHT: u32 = 10;

/// ZPL II parser.
///
/// Each `^XA ... ^XZ` block becomes one label. Unsupported commands are
/// skipped, so labels written for real printers parse even when they use
/// features this renderer does not draw.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZplParser;

impl ZplParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse every label in `input`.
    pub fn parse_str(&self, input: &str) -> Result<Vec<LabelInfo>, ParseError> {
        let mut labels = Vec::new();
        let mut open: Option<LabelState> = None;

        for command in tokenize(input) {
            match (command.prefix, command.code.as_str()) {
                ('^', "XA") => {
                    if let Some(state) = open.take() {
                        labels.push(state.finish());
                    }
                    open = Some(LabelState::new());
                }
                ('^', "XZ") => {
                    if let Some(state) = open.take() {
                        labels.push(state.finish());
                    }
                }
                _ => match open.as_mut() {
                    Some(state) => state.apply(&command)?,
                    None => trace!(code = %command.code, "command outside a label ignored"),
                },
            }
        }
        if let Some(state) = open.take() {
            labels.push(state.finish());
        }

        debug!(labels = labels.len(), "parsed ZPL");
        Ok(labels)
    }
}

impl MarkupParser for ZplParser {
    fn parse(&self, markup: &[u8]) -> Result<Vec<LabelInfo>, ParseError> {
        self.parse_str(&String::from_utf8_lossy(markup))
    }
}

/// Field-level state, reset by `^FS`.
#[derive(Debug, Default)]
struct Field {
    origin: Option<Origin>,
    font: Option<FontSpec>,
    data: Option<String>,
    hex_indicator: Option<char>,
    reverse: bool,
    block: Option<FieldBlock>,
    kind: Option<PendingKind>,
}

/// What the next `^FS` emits when it is not plain text.
#[derive(Debug)]
enum PendingKind {
    Code128 {
        layout: BarcodeLayout,
        mode: Code128Mode,
    },
    Ean13 {
        layout: BarcodeLayout,
    },
    Qr {
        magnification: Option<u32>,
    },
    Graphic(ElementKind),
}

/// Label-level state for one `^XA` block.
struct LabelState {
    label: LabelInfo,
    home: (i32, i32),
    reverse_all: bool,
    default_font: FontSpec,
    default_orientation: FieldOrientation,
    module_width: u32,
    barcode_height: u32,
    field: Field,
}

impl LabelState {
    fn new() -> Self {
        Self {
            label: LabelInfo::default(),
            home: (0, 0),
            reverse_all: false,
            default_font: FontSpec::default(),
            default_orientation: FieldOrientation::Normal,
            module_width: DEFAULT_MODULE_WIDTH,
            barcode_height: DEFAULT_BARCODE_HEIGHT,
            field: Field::default(),
        }
    }

    fn apply(&mut self, command: &RawCommand) -> Result<(), ParseError> {
        if command.prefix != '^' {
            trace!(code = %command.code, "control command ignored");
            return Ok(());
        }

        let code = command.code.as_str();
        let raw = command.params.as_str();
        let p = Params::new(code, raw);

        match code {
            "FX" => {}
            "LH" => self.home = (p.int(0)?.unwrap_or(0), p.int(1)?.unwrap_or(0)),
            "LR" => self.reverse_all = p.flag(0).unwrap_or(false),
            "PW" => self.label.print_width = p.uint(0)?,
            "LL" => self.label.label_length = p.uint(0)?,
            "PO" => self.label.inverted = p.char(0) == Some('I'),
            "CF" => self.default_font = self.change_default_font(&p)?,
            "A" => self.field.font = Some(self.font_command(raw)?),
            "FW" => {
                if let Some(orientation) = p.char(0).and_then(FieldOrientation::from_code) {
                    self.default_orientation = orientation;
                }
            }
            "FO" => self.field.origin = Some(self.origin(&p, Anchor::TopLeft)?),
            "FT" => self.field.origin = Some(self.origin(&p, Anchor::Baseline)?),
            "FD" | "FV" => {
                let data = match self.field.hex_indicator {
                    Some(indicator) => decode_hex_escapes(raw, indicator)?,
                    None => raw.to_string(),
                };
                self.field.data = Some(data);
            }
            "FS" => self.finish_field(),
            "FR" => self.field.reverse = true,
            "FH" => self.field.hex_indicator = Some(raw.trim().chars().next().unwrap_or('_')),
            "FB" => self.field.block = Some(field_block(&p)?),
            "BY" => {
                if let Some(width) = p.uint(0)? {
                    self.module_width = width.clamp(1, 10);
                }
                if let Some(height) = p.uint(2)? {
                    self.barcode_height = height;
                }
            }
            "BC" => {
                let layout = self.barcode_layout(&p)?;
                let mode = match p.char(5) {
                    Some('A') => Code128Mode::Automatic,
                    _ => Code128Mode::Normal,
                };
                self.field.kind = Some(PendingKind::Code128 { layout, mode });
            }
            "BE" => {
                let layout = self.barcode_layout(&p)?;
                self.field.kind = Some(PendingKind::Ean13 { layout });
            }
            "BQ" => {
                let magnification = p.uint(2)?.map(|m| m.clamp(1, 10));
                self.field.kind = Some(PendingKind::Qr { magnification });
            }
            "GB" => self.field.kind = Some(PendingKind::Graphic(graphic_box(&p)?)),
            "GC" => self.field.kind = Some(PendingKind::Graphic(graphic_circle(&p)?)),
            "GE" => self.field.kind = Some(PendingKind::Graphic(graphic_ellipse(&p)?)),
            "GF" => self.field.kind = Some(PendingKind::Graphic(parse_graphic_field(raw)?)),
            _ => trace!(code, params = raw, "unsupported command ignored"),
        }
        Ok(())
    }

    fn origin(&self, p: &Params<'_>, anchor: Anchor) -> Result<Origin, ParseError> {
        Ok(Origin {
            x: self.home.0.saturating_add(p.int(0)?.unwrap_or(0)),
            y: self.home.1.saturating_add(p.int(1)?.unwrap_or(0)),
            anchor,
        })
    }

    fn change_default_font(&self, p: &Params<'_>) -> Result<FontSpec, ParseError> {
        let current = self.default_font;
        let height = p.uint(1)?;
        let width = p.uint(2)?;
        Ok(FontSpec {
            name: p.char(0).unwrap_or(current.name),
            orientation: current.orientation,
            height: height.unwrap_or(current.height),
            width: width.unwrap_or(if height.is_some() { 0 } else { current.width }),
        })
    }

    /// `^Afo,h,w`: the font name is the first character, glued to the code.
    fn font_command(&self, raw: &str) -> Result<FontSpec, ParseError> {
        let mut chars = raw.chars();
        let name = chars
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or(self.default_font.name);
        let p = Params::new("A", chars.as_str());

        let height = p.uint(1)?;
        let width = p.uint(2)?;
        Ok(FontSpec {
            name,
            orientation: p
                .char(0)
                .and_then(FieldOrientation::from_code)
                .unwrap_or(self.default_orientation),
            height: height.unwrap_or(self.default_font.height),
            width: width.unwrap_or(if height.is_some() { 0 } else { self.default_font.width }),
        })
    }

    fn barcode_layout(&self, p: &Params<'_>) -> Result<BarcodeLayout, ParseError> {
        Ok(BarcodeLayout {
            orientation: p
                .char(0)
                .and_then(FieldOrientation::from_code)
                .unwrap_or(self.default_orientation),
            module_width: self.module_width,
            height: p.uint(1)?.unwrap_or(self.barcode_height),
            interpretation: p.flag(2).unwrap_or(true),
            interpretation_above: p.flag(3).unwrap_or(false),
        })
    }

    /// `^FS`: turn the pending field into an element.
    fn finish_field(&mut self) {
        let field = std::mem::take(&mut self.field);
        let origin = field.origin.unwrap_or(Origin {
            x: self.home.0,
            y: self.home.1,
            anchor: Anchor::TopLeft,
        });

        let kind = match (field.kind, field.data) {
            (Some(PendingKind::Graphic(kind)), _) => kind,
            (Some(PendingKind::Code128 { layout, mode }), Some(data)) => {
                ElementKind::Code128 { data, layout, mode }
            }
            (Some(PendingKind::Ean13 { layout }), Some(data)) => {
                ElementKind::Ean13 { data, layout }
            }
            (Some(PendingKind::Qr { magnification }), Some(data)) => {
                let (error_correction, data) = split_qr_data(&data);
                ElementKind::Qr {
                    data,
                    error_correction,
                    magnification,
                }
            }
            (None, Some(text)) => ElementKind::Text {
                text,
                font: field.font.unwrap_or(FontSpec {
                    orientation: self.default_orientation,
                    ..self.default_font
                }),
                block: field.block,
            },
            (_, None) => {
                trace!("field without data skipped");
                return;
            }
        };

        self.label.elements.push(LabelElement {
            origin,
            reverse: field.reverse || self.reverse_all,
            kind,
        });
    }

    fn finish(mut self) -> LabelInfo {
        if self.field.data.is_some() || self.field.kind.is_some() {
            self.finish_field();
        }
        self.label
    }
}

fn field_block(p: &Params<'_>) -> Result<FieldBlock, ParseError> {
    Ok(FieldBlock {
        width: p.uint(0)?.unwrap_or(0),
        max_lines: p.uint(1)?.unwrap_or(1).max(1),
        line_spacing: p.int(2)?.unwrap_or(0),
        justification: match p.char(3) {
            Some('C') => Justification::Center,
            Some('R') => Justification::Right,
            Some('J') => Justification::Justified,
            _ => Justification::Left,
        },
    })
}

fn graphic_box(p: &Params<'_>) -> Result<ElementKind, ParseError> {
    let thickness = p.uint(2)?.unwrap_or(1).max(1);
    Ok(ElementKind::GraphicBox {
        width: p.uint(0)?.unwrap_or(thickness).max(thickness),
        height: p.uint(1)?.unwrap_or(thickness).max(thickness),
        thickness,
        color: LineColor::from_code(p.str(3).unwrap_or("")),
        rounding: p.uint(4)?.unwrap_or(0).min(8),
    })
}

fn graphic_circle(p: &Params<'_>) -> Result<ElementKind, ParseError> {
    Ok(ElementKind::GraphicCircle {
        diameter: p.uint(0)?.unwrap_or(3).max(3),
        thickness: p.uint(1)?.unwrap_or(1).max(1),
        color: LineColor::from_code(p.str(2).unwrap_or("")),
    })
}

fn graphic_ellipse(p: &Params<'_>) -> Result<ElementKind, ParseError> {
    let thickness = p.uint(2)?.unwrap_or(1).max(1);
    Ok(ElementKind::GraphicEllipse {
        width: p.uint(0)?.unwrap_or(thickness).max(thickness),
        height: p.uint(1)?.unwrap_or(thickness).max(thickness),
        thickness,
        color: LineColor::from_code(p.str(3).unwrap_or("")),
    })
}

/// Split `^BQ` field data (`QA,payload`) into error correction and payload.
fn split_qr_data(data: &str) -> (QrErrorCorrection, String) {
    let Some((switches, payload)) = data.split_once(',').filter(|(s, _)| s.len() <= 4) else {
        return (QrErrorCorrection::default(), data.to_string());
    };

    let mut switches = switches.chars();
    let level = switches
        .next()
        .and_then(QrErrorCorrection::from_code)
        .unwrap_or_default();
    let manual = matches!(switches.next(), Some('M' | 'm'));

    let payload = if manual {
        // Manual input names the character mode first; bytes also carry a
        // four digit length.
        match payload.chars().next() {
            Some('B' | 'b') => payload.get(5..).unwrap_or(""),
            Some('N' | 'n' | 'A' | 'a' | 'K' | 'k') => &payload[1..],
            _ => payload,
        }
    } else {
        payload
    };
    (level, payload.to_string())
}

/// Comma separated command parameters.
struct Params<'a> {
    command: &'a str,
    raw: &'a str,
}

impl<'a> Params<'a> {
    fn new(command: &'a str, raw: &'a str) -> Self {
        Self { command, raw }
    }

    /// Parameter `index`, trimmed; `None` when absent or empty.
    fn str(&self, index: usize) -> Option<&'a str> {
        self.raw
            .split(',')
            .nth(index)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    fn char(&self, index: usize) -> Option<char> {
        self.str(index)
            .and_then(|value| value.chars().next())
            .map(|c| c.to_ascii_uppercase())
    }

    fn flag(&self, index: usize) -> Option<bool> {
        match self.char(index)? {
            'Y' => Some(true),
            'N' => Some(false),
            _ => None,
        }
    }

    /// Signed dot value, at most [`MAX_DOTS`] either way.
    fn int(&self, index: usize) -> Result<Option<i32>, ParseError> {
        self.dots(index, -i64::from(MAX_DOTS))
    }

    /// Unsigned dot value, at most [`MAX_DOTS`].
    fn uint(&self, index: usize) -> Result<Option<u32>, ParseError> {
        Ok(self.dots(index, 0)?.map(i32::unsigned_abs))
    }

    fn dots(&self, index: usize, min: i64) -> Result<Option<i32>, ParseError> {
        let Some(value) = self.str(index) else {
            return Ok(None);
        };
        match value.parse::<i64>() {
            Ok(n) if (min..=i64::from(MAX_DOTS)).contains(&n) => Ok(Some(n as i32)),
            _ => Err(self.invalid(value)),
        }
    }

    fn invalid(&self, value: &str) -> ParseError {
        ParseError::InvalidParameter {
            command: self.command.to_string(),
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Vec<LabelInfo> {
        ZplParser::new().parse_str(input).unwrap()
    }

    fn single(input: &str) -> LabelInfo {
        let mut labels = parse(input);
        assert_eq!(labels.len(), 1, "expected one label");
        labels.remove(0)
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("no commands here").is_empty());
    }

    #[test]
    fn test_text_field() {
        let label = single("^XA^FO50,60^A0N,30,20^FDHello^FS^XZ");
        assert_eq!(label.elements.len(), 1);

        let element = &label.elements[0];
        assert_eq!(
            element.origin,
            Origin {
                x: 50,
                y: 60,
                anchor: Anchor::TopLeft
            }
        );
        assert!(!element.reverse);
        match &element.kind {
            ElementKind::Text { text, font, block } => {
                assert_eq!(text, "Hello");
                assert_eq!(font.name, '0');
                assert_eq!(font.height, 30);
                assert_eq!(font.width, 20);
                assert_eq!(font.orientation, FieldOrientation::Normal);
                assert!(block.is_none());
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_label_home_and_typeset_origin() {
        let label = single("^XA^LH10,20^FT5,5^FDx^FS^FDy^FS^XZ");
        assert_eq!(
            label.elements[0].origin,
            Origin {
                x: 15,
                y: 25,
                anchor: Anchor::Baseline
            }
        );
        // No origin at all: the label home.
        assert_eq!(label.elements[1].origin.x, 10);
        assert_eq!(label.elements[1].origin.y, 20);
    }

    #[test]
    fn test_multiple_labels() {
        let labels = parse("^XA^FDone^FS^XZ\n^XA^FDtwo^FS^FDthree^FS^XZ");
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].elements.len(), 1);
        assert_eq!(labels[1].elements.len(), 2);
    }

    #[test]
    fn test_open_label_at_end_of_input() {
        let label = single("^XA^FO1,1^FDunterminated");
        assert_eq!(label.elements.len(), 1);
    }

    #[test]
    fn test_start_inside_open_label_closes_it() {
        let labels = parse("^XA^FDa^FS^XA^FDb^FS^XZ");
        assert_eq!(labels.len(), 2);
    }

    #[test]
    fn test_state_does_not_leak_between_labels() {
        let labels = parse("^XA^LH100,100^PW400^FDa^FS^XZ^XA^FDb^FS^XZ");
        assert_eq!(labels[0].print_width, Some(400));
        assert_eq!(labels[1].print_width, None);
        assert_eq!(labels[1].elements[0].origin.x, 0);
    }

    #[test]
    fn test_label_settings() {
        let label = single("^XA^PW406^LL203^POI^XZ");
        assert_eq!(label.print_width, Some(406));
        assert_eq!(label.label_length, Some(203));
        assert!(label.inverted);
        assert!(label.elements.is_empty());
    }

    #[test]
    fn test_reverse_fields() {
        let label = single("^XA^FR^FDa^FS^FDb^FS^LRY^FDc^FS^LRN^FDd^FS^XZ");
        let reversed: Vec<bool> = label.elements.iter().map(|e| e.reverse).collect();
        assert_eq!(reversed, [true, false, true, false]);
    }

    #[test]
    fn test_hex_escapes_apply_to_next_field_only() {
        let label = single("^XA^FH^FD_41_42^FS^FD_41^FS^FH#^FD#43^FS^XZ");
        let texts: Vec<&str> = label
            .elements
            .iter()
            .map(|e| match &e.kind {
                ElementKind::Text { text, .. } => text.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(texts, ["AB", "_41", "C"]);
    }

    #[test]
    fn test_invalid_hex_escape() {
        let err = ZplParser::new().parse_str("^XA^FH^FD_ZZ^FS^XZ").unwrap_err();
        assert!(matches!(err, ParseError::InvalidHexEscape { .. }));
    }

    #[test]
    fn test_default_font_and_orientation() {
        let label = single("^XA^CF0,40^FWR^FDa^FS^ADN,18,10^FDb^FS^XZ");
        match &label.elements[0].kind {
            ElementKind::Text { font, .. } => {
                assert_eq!(font.name, '0');
                assert_eq!(font.height, 40);
                assert_eq!(font.width, 0);
                assert_eq!(font.orientation, FieldOrientation::Rotated);
            }
            other => panic!("expected text, got {other:?}"),
        }
        match &label.elements[1].kind {
            ElementKind::Text { font, .. } => {
                assert_eq!(font.name, 'D');
                assert_eq!(font.orientation, FieldOrientation::Normal);
                assert_eq!((font.height, font.width), (18, 10));
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_field_block() {
        let label = single("^XA^FB300,3,4,C^FDwrapped text^FS^XZ");
        match &label.elements[0].kind {
            ElementKind::Text { block, .. } => assert_eq!(
                *block,
                Some(FieldBlock {
                    width: 300,
                    max_lines: 3,
                    line_spacing: 4,
                    justification: Justification::Center,
                })
            ),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_code128_uses_barcode_defaults() {
        let label = single("^XA^BY3,2,80^FO10,10^BCN,,Y,N,N,A^FD12345678^FS^XZ");
        match &label.elements[0].kind {
            ElementKind::Code128 { data, layout, mode } => {
                assert_eq!(data, "12345678");
                assert_eq!(layout.module_width, 3);
                assert_eq!(layout.height, 80);
                assert!(layout.interpretation);
                assert!(!layout.interpretation_above);
                assert_eq!(*mode, Code128Mode::Automatic);
            }
            other => panic!("expected code 128, got {other:?}"),
        }
    }

    #[test]
    fn test_ean13() {
        let label = single("^XA^BER,50,N^FD590123412345^FS^XZ");
        match &label.elements[0].kind {
            ElementKind::Ean13 { data, layout } => {
                assert_eq!(data, "590123412345");
                assert_eq!(layout.orientation, FieldOrientation::Rotated);
                assert_eq!(layout.height, 50);
                assert!(!layout.interpretation);
                assert_eq!(layout.module_width, DEFAULT_MODULE_WIDTH);
            }
            other => panic!("expected EAN-13, got {other:?}"),
        }
    }

    #[test]
    fn test_qr_code_data() {
        let label = single("^XA^BQN,2,5^FDHA,https://example.com/a,b^FS^XZ");
        match &label.elements[0].kind {
            ElementKind::Qr {
                data,
                error_correction,
                magnification,
            } => {
                assert_eq!(data, "https://example.com/a,b");
                assert_eq!(*error_correction, QrErrorCorrection::High);
                assert_eq!(*magnification, Some(5));
            }
            other => panic!("expected QR, got {other:?}"),
        }
    }

    #[test]
    fn test_split_qr_data() {
        assert_eq!(
            split_qr_data("QA,payload"),
            (QrErrorCorrection::Quartile, "payload".to_string())
        );
        assert_eq!(
            split_qr_data("LM,N0123"),
            (QrErrorCorrection::Low, "0123".to_string())
        );
        assert_eq!(
            split_qr_data("MM,B0004abcd"),
            (QrErrorCorrection::Medium, "abcd".to_string())
        );
        assert_eq!(
            split_qr_data("no switches"),
            (QrErrorCorrection::Quartile, "no switches".to_string())
        );
    }

    #[test]
    fn test_graphic_box_defaults() {
        let label = single("^XA^FO0,0^GB200,1,3^FS^FO5,5^GB^FS^XZ");
        assert_eq!(
            label.elements[0].kind,
            ElementKind::GraphicBox {
                width: 200,
                height: 3,
                thickness: 3,
                color: LineColor::Black,
                rounding: 0,
            }
        );
        assert_eq!(
            label.elements[1].kind,
            ElementKind::GraphicBox {
                width: 1,
                height: 1,
                thickness: 1,
                color: LineColor::Black,
                rounding: 0,
            }
        );
    }

    #[test]
    fn test_graphic_circle_and_ellipse() {
        let label = single("^XA^GC100,5,W^FS^GE80,40,2^FS^XZ");
        assert_eq!(
            label.elements[0].kind,
            ElementKind::GraphicCircle {
                diameter: 100,
                thickness: 5,
                color: LineColor::White,
            }
        );
        assert_eq!(
            label.elements[1].kind,
            ElementKind::GraphicEllipse {
                width: 80,
                height: 40,
                thickness: 2,
                color: LineColor::Black,
            }
        );
    }

    #[test]
    fn test_graphic_field() {
        let label = single("^XA^FO0,0^GFA,2,2,1,F0F0^FS^XZ");
        assert_eq!(
            label.elements[0].kind,
            ElementKind::GraphicField {
                row_bytes: 1,
                rows: 2,
                data: vec![0xF0, 0xF0],
            }
        );
    }

    #[test]
    fn test_invalid_numeric_parameter() {
        let err = ZplParser::new().parse_str("^XA^FOabc,10^FDx^FS^XZ").unwrap_err();
        match err {
            ParseError::InvalidParameter { command, value } => {
                assert_eq!(command, "FO");
                assert_eq!(value, "abc");
            }
            other => panic!("expected invalid parameter, got {other:?}"),
        }
    }

    #[test]
    fn test_out_of_range_parameters() {
        for (input, command, value) in [
            ("^XA^GB4000000000,4000000000,1^FS^XZ", "GB", "4000000000"),
            ("^XA^BCN,4294967295,N^FD123^FS^XZ", "BC", "4294967295"),
            ("^XA^LH2000000000,0^FO2000000000,0^FS^XZ", "LH", "2000000000"),
            ("^XA^FO0,-32001^FDx^FS^XZ", "FO", "-32001"),
            ("^XA^PW32001^XZ", "PW", "32001"),
        ] {
            match ZplParser::new().parse_str(input).unwrap_err() {
                ParseError::InvalidParameter {
                    command: c,
                    value: v,
                } => {
                    assert_eq!((c.as_str(), v.as_str()), (command, value), "{input}");
                }
                other => panic!("expected invalid parameter for {input}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_largest_offsets_add_up() {
        let label = single("^XA^LH32000,-32000^FO32000,-32000^GB1,1,1^FS^XZ");
        let origin = label.elements[0].origin;
        assert_eq!((origin.x, origin.y), (64_000, -64_000));
    }

    #[test]
    fn test_unknown_commands_are_ignored() {
        let label = single("^XA~TA000^MMT^CI28^FX comment ^FDkept^FS^JUS^XZ");
        assert_eq!(label.elements.len(), 1);
    }

    #[test]
    fn test_field_without_data_is_skipped() {
        let label = single("^XA^FO10,10^FS^BCN^FS^XZ");
        assert!(label.elements.is_empty());
    }

    #[test]
    fn test_parse_bytes_is_lossy() {
        let labels = ZplParser::new()
            .parse(b"^XA^FDab\xffc^FS^XZ")
            .unwrap();
        match &labels[0].elements[0].kind {
            ElementKind::Text { text, .. } => assert_eq!(text, "ab\u{fffd}c"),
            other => panic!("expected text, got {other:?}"),
        }
    }
}
