//! Masks for `^GB`, `^GC`, `^GE` and `^GF`.

use image::{GrayImage, Luma};

use super::canvas::blank_mask;

/// Box outline `thickness` dots wide. Rounding 1..8 rounds the corners
/// with a radius of up to half the shorter side.
pub(crate) fn box_mask(width: u32, height: u32, thickness: u32, rounding: u32) -> GrayImage {
    let (w, h) = (width as f64, height as f64);
    let t = thickness as f64;
    let radius = rounding.min(8) as f64 / 8.0 * w.min(h) / 2.0;
    let inner_radius = (radius - t).max(0.0);

    let mut mask = blank_mask(width, height);
    for (x, y, pixel) in mask.enumerate_pixels_mut() {
        let (px, py) = (x as f64 + 0.5, y as f64 + 0.5);
        let outer = inside_rounded_rect(px, py, 0.0, 0.0, w, h, radius);
        let inner = inside_rounded_rect(px, py, t, t, w - t, h - t, inner_radius);
        if outer && !inner {
            *pixel = Luma([255]);
        }
    }
    mask
}

/// Ring of `thickness` dots inside an ellipse of `width x height`.
///
/// A circle is the ellipse with equal axes.
pub(crate) fn ellipse_mask(width: u32, height: u32, thickness: u32) -> GrayImage {
    let (a, b) = (width as f64 / 2.0, height as f64 / 2.0);
    let t = thickness as f64;
    let (inner_a, inner_b) = (a - t, b - t);

    let mut mask = blank_mask(width, height);
    for (x, y, pixel) in mask.enumerate_pixels_mut() {
        let dx = x as f64 + 0.5 - a;
        let dy = y as f64 + 0.5 - b;
        let outer = (dx / a).powi(2) + (dy / b).powi(2) <= 1.0;
        let inner = inner_a > 0.0
            && inner_b > 0.0
            && (dx / inner_a).powi(2) + (dy / inner_b).powi(2) < 1.0;
        if outer && !inner {
            *pixel = Luma([255]);
        }
    }
    mask
}

/// Unpack a 1-bit graphic, most significant bit first.
pub(crate) fn bitmap_mask(row_bytes: u32, rows: u32, data: &[u8]) -> GrayImage {
    let mut mask = blank_mask(row_bytes * 8, rows);
    for (y, row) in data.chunks(row_bytes as usize).take(rows as usize).enumerate() {
        for (byte_index, byte) in row.iter().enumerate() {
            for bit in 0..8 {
                if byte & (0x80 >> bit) != 0 {
                    let x = byte_index as u32 * 8 + bit;
                    mask.put_pixel(x, y as u32, Luma([255]));
                }
            }
        }
    }
    mask
}

fn inside_rounded_rect(
    px: f64,
    py: f64,
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
    radius: f64,
) -> bool {
    if px < left || px > right || py < top || py > bottom {
        return false;
    }
    if radius <= 0.0 {
        return true;
    }
    // Distance from the nearest corner circle centre, if the point is in a
    // corner square.
    let cx = px.clamp(left + radius, right - radius);
    let cy = py.clamp(top + radius, bottom - radius);
    (px - cx).powi(2) + (py - cy).powi(2) <= radius * radius
}
