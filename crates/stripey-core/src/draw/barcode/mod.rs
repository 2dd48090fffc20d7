//! Linear barcodes.

mod code128;
mod ean13;

use ab_glyph::{FontVec, PxScale};

use super::canvas::{blank_mask, fill_rect, overlay_mask, FieldMask};
use super::text::render_line;
use super::DrawError;
use crate::zpl::{BarcodeLayout, Code128Mode, MAX_DOTS};

/// Space between the bars and the interpretation line, in modules.
const INTERPRETATION_GAP: u32 = 2;

pub(crate) fn code128_mask(
    data: &str,
    layout: &BarcodeLayout,
    mode: Code128Mode,
    font: Option<&FontVec>,
) -> Result<FieldMask, DrawError> {
    let symbol = code128::encode(data, mode).map_err(DrawError::Barcode)?;
    linear_mask(&symbol.modules(), layout, &symbol.text, font)
}

pub(crate) fn ean13_mask(
    data: &str,
    layout: &BarcodeLayout,
    font: Option<&FontVec>,
) -> Result<FieldMask, DrawError> {
    let code = ean13::normalize(data).map_err(DrawError::Barcode)?;
    linear_mask(&ean13::modules(&code), layout, &code, font)
}

/// Bars plus an optional interpretation line. The anchoring baseline is the
/// bottom of the bars.
fn linear_mask(
    modules: &[bool],
    layout: &BarcodeLayout,
    text: &str,
    font: Option<&FontVec>,
) -> Result<FieldMask, DrawError> {
    let module_width = layout.module_width.max(1);
    let bars_height = layout.height.max(1);
    let bars_width = modules.len() as u64 * u64::from(module_width);
    if bars_width > u64::from(MAX_DOTS) || bars_height > MAX_DOTS {
        return Err(DrawError::Barcode(format!(
            "symbol of {bars_width}x{bars_height} dots exceeds {MAX_DOTS} dots"
        )));
    }
    let bars_width = (bars_width as u32).max(1);

    let interpretation = match font {
        Some(font) if layout.interpretation && !text.is_empty() => {
            Some(render_line(font, interpretation_scale(module_width), text))
        }
        _ => None,
    };
    let gap = INTERPRETATION_GAP * module_width;
    let text_band = interpretation
        .as_ref()
        .map_or(0, |line| line.mask.height() + gap);
    let width = interpretation
        .as_ref()
        .map_or(bars_width, |line| bars_width.max(line.mask.width()));
    let bars_top = if layout.interpretation_above {
        text_band
    } else {
        0
    };

    let mut mask = blank_mask(width, bars_height + text_band);
    let bars_left = (width - bars_width) / 2;
    for (index, _) in modules.iter().enumerate().filter(|(_, bar)| **bar) {
        let x = bars_left + index as u32 * module_width;
        fill_rect(&mut mask, x, bars_top, module_width, bars_height);
    }

    if let Some(line) = interpretation {
        let x = (width - line.mask.width()) / 2;
        let y = if layout.interpretation_above {
            0
        } else {
            bars_height + gap
        };
        overlay_mask(&mut mask, &line.mask, x, y);
    }

    Ok(FieldMask {
        mask,
        baseline: bars_top + bars_height,
    })
}

fn interpretation_scale(module_width: u32) -> PxScale {
    PxScale::from((module_width * 9).clamp(10, 60) as f32)
}
