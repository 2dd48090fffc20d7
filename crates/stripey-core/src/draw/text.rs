//! Text fields: measuring, wrapping and rendering into masks.

use ab_glyph::{Font, PxScale, ScaleFont};
use image::{GrayImage, Luma};
use imageproc::drawing::draw_text_mut;

use super::canvas::{blank_mask, clamp_side, FieldMask};
use crate::zpl::{FieldBlock, FontSpec, Justification};

/// Line break inside `^FB` field data.
const BLOCK_LINE_BREAK: &str = "\\&";

/// Pixel scale for a ZPL font size. Width 0 keeps the glyphs proportional.
pub(crate) fn font_scale(selection: &FontSpec) -> PxScale {
    let height = selection.height.max(1) as f32;
    let width = if selection.width == 0 {
        height
    } else {
        selection.width as f32
    };
    PxScale {
        x: width,
        y: height,
    }
}

/// Measure the pixel width of a string at the given font and scale.
pub(crate) fn measure_text_width<F: Font>(font: &F, scale: PxScale, text: &str) -> u32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for ch in text.chars() {
        let glyph_id = scaled.glyph_id(ch);
        if let Some(prev) = prev_glyph {
            width += scaled.kern(prev, glyph_id);
        }
        width += scaled.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    width.ceil().max(0.0) as u32
}

fn line_height<F: Font>(font: &F, scale: PxScale) -> u32 {
    let scaled = font.as_scaled(scale);
    (scaled.ascent() - scaled.descent()).ceil().max(1.0) as u32
}

fn ascent<F: Font>(font: &F, scale: PxScale) -> u32 {
    font.as_scaled(scale).ascent().ceil().max(0.0) as u32
}

/// A single line of text.
pub(crate) fn render_line<F: Font>(font: &F, scale: PxScale, text: &str) -> FieldMask {
    let width = clamp_side(i64::from(measure_text_width(font, scale, text)));
    let mut mask = blank_mask(width, clamp_side(i64::from(line_height(font, scale))));
    draw_text_mut(&mut mask, Luma([255]), 0, 0, scale, font, text);
    FieldMask {
        mask,
        baseline: ascent(font, scale),
    }
}

/// A `^FB` block. The anchoring baseline is that of the last line.
pub(crate) fn render_block<F: Font>(
    font: &F,
    scale: PxScale,
    text: &str,
    block: &FieldBlock,
) -> FieldMask {
    let measure = |s: &str| measure_text_width(font, scale, s);
    let lines = block_lines(text, block.width, block.max_lines, &measure);

    let line_h = i64::from(line_height(font, scale));
    let advance = (line_h + i64::from(block.line_spacing)).max(1);
    let width = if block.width > 0 {
        clamp_side(i64::from(block.width))
    } else {
        let widest = lines.iter().map(|line| measure(line)).max().unwrap_or(0);
        clamp_side(i64::from(widest))
    };
    let last_top = advance * (lines.len() as i64 - 1).max(0);
    let height = clamp_side(last_top + line_h);
    let mut mask = blank_mask(width, height);

    for (index, line) in lines.iter().enumerate() {
        let y = advance * index as i64;
        if y >= i64::from(height) {
            break;
        }
        let y = y as i32;
        let line_width = measure(line);
        let is_last = index + 1 == lines.len();

        if block.justification == Justification::Justified && !is_last {
            draw_justified(&mut mask, font, scale, y, line, width, &measure);
            continue;
        }
        let x = match block.justification {
            Justification::Center => width.saturating_sub(line_width) / 2,
            Justification::Right => width.saturating_sub(line_width),
            _ => 0,
        };
        draw_text_mut(&mut mask, Luma([255]), x as i32, y, scale, font, line);
    }

    FieldMask {
        mask,
        baseline: clamp_side(last_top + i64::from(ascent(font, scale))),
    }
}

/// Spread the words of a line across the full block width.
fn draw_justified<F: Font>(
    mask: &mut GrayImage,
    font: &F,
    scale: PxScale,
    y: i32,
    line: &str,
    width: u32,
    measure: &impl Fn(&str) -> u32,
) {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.len() < 2 {
        draw_text_mut(mask, Luma([255]), 0, y, scale, font, line);
        return;
    }

    let used: u32 = words.iter().map(|word| measure(word)).sum();
    let gap = width.saturating_sub(used) as f32 / (words.len() - 1) as f32;
    let mut x = 0.0f32;
    for word in words {
        draw_text_mut(mask, Luma([255]), x.round() as i32, y, scale, font, word);
        x += measure(word) as f32 + gap;
    }
}

/// Split block text on `\&`, wrap each paragraph and keep `max_lines`.
pub(crate) fn block_lines(
    text: &str,
    width: u32,
    max_lines: u32,
    measure: &impl Fn(&str) -> u32,
) -> Vec<String> {
    let mut lines: Vec<String> = text
        .split(BLOCK_LINE_BREAK)
        .flat_map(|paragraph| wrap_lines(paragraph, width, measure))
        .collect();
    lines.truncate(max_lines.max(1) as usize);
    lines
}

/// Greedy `^FB` wrapping; `max_width` 0 disables it.
///
/// Lines break at spaces or after a hyphen. Runs of spaces collapse to one.
/// A word wider than the block keeps a line of its own and is clipped.
pub(crate) fn wrap_lines(
    text: &str,
    max_width: u32,
    measure: &impl Fn(&str) -> u32,
) -> Vec<String> {
    if max_width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split(' ').filter(|word| !word.is_empty()) {
        for (index, piece) in word.split_inclusive('-').enumerate() {
            let joins_word = index == 0 && !line.is_empty();
            let separator = if joins_word { " " } else { "" };
            let candidate = format!("{line}{separator}{piece}");
            if line.is_empty() || measure(&candidate) <= max_width {
                line = candidate;
            } else {
                lines.push(std::mem::replace(&mut line, piece.to_string()));
            }
        }
    }
    lines.push(line);
    lines
}
