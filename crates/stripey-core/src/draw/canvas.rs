//! Label canvas and coverage masks.
//!
//! Every element is first rendered upright into a mask (255 where there is
//! ink), turned to its field orientation, then painted onto the canvas.
//! Thermal printers only print whole dots, so masks are thresholded.

use image::{GrayImage, Luma};

use crate::decode::PixelGrid;
use crate::transform::{rotate_grid, Rotation};
use crate::zpl::MAX_DOTS;

pub(crate) const WHITE: u8 = 255;
pub(crate) const BLACK: u8 = 0;

/// Coverage at or above this counts as a printed dot.
const INK_THRESHOLD: u8 = 128;

/// How a mask is applied to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Paint {
    Black,
    White,
    /// Invert every covered dot.
    Reverse,
}

/// An upright rendered field.
#[derive(Debug)]
pub(crate) struct FieldMask {
    pub mask: GrayImage,
    /// Row that a `^FT` origin refers to: the text baseline, or the bottom
    /// of bars and graphics.
    pub baseline: u32,
}

impl FieldMask {
    /// A mask anchored at its bottom edge.
    pub fn bottom_anchored(mask: GrayImage) -> Self {
        let baseline = mask.height();
        Self { mask, baseline }
    }
}

/// A blank label.
pub(crate) fn blank_canvas(width: u32, height: u32) -> GrayImage {
    GrayImage::from_pixel(width, height, Luma([WHITE]))
}

/// An empty mask.
/// A field side in dots, between 1 and [`MAX_DOTS`]. Anything past the
/// limit lies outside every canvas and is clipped.
pub(crate) fn clamp_side(dots: i64) -> u32 {
    dots.clamp(1, i64::from(MAX_DOTS)) as u32
}

pub(crate) fn blank_mask(width: u32, height: u32) -> GrayImage {
    GrayImage::new(width, height)
}

/// Fill a rectangle of a mask, clipped to its bounds.
pub(crate) fn fill_rect(mask: &mut GrayImage, x: u32, y: u32, width: u32, height: u32) {
    let right = x.saturating_add(width).min(mask.width());
    let bottom = y.saturating_add(height).min(mask.height());
    for py in y..bottom {
        for px in x..right {
            mask.put_pixel(px, py, Luma([255]));
        }
    }
}

/// Merge `src` into `dst` with its top-left corner at `(x, y)`.
pub(crate) fn overlay_mask(dst: &mut GrayImage, src: &GrayImage, x: u32, y: u32) {
    for (sx, sy, coverage) in src.enumerate_pixels() {
        let (dx, dy) = (x + sx, y + sy);
        if dx < dst.width() && dy < dst.height() {
            let pixel = dst.get_pixel_mut(dx, dy);
            pixel[0] = pixel[0].max(coverage[0]);
        }
    }
}

/// Paint `mask` onto `canvas` with its top-left corner at `(x, y)`.
///
/// Parts of the mask outside the canvas are clipped.
pub(crate) fn paint_mask(canvas: &mut GrayImage, mask: &GrayImage, x: i32, y: i32, paint: Paint) {
    let (canvas_w, canvas_h) = (canvas.width() as i64, canvas.height() as i64);

    for (mx, my, coverage) in mask.enumerate_pixels() {
        if coverage[0] < INK_THRESHOLD {
            continue;
        }
        let cx = x as i64 + mx as i64;
        let cy = y as i64 + my as i64;
        if cx < 0 || cy < 0 || cx >= canvas_w || cy >= canvas_h {
            continue;
        }

        let dot = canvas.get_pixel_mut(cx as u32, cy as u32);
        dot[0] = match paint {
            Paint::Black => BLACK,
            Paint::White => WHITE,
            Paint::Reverse => WHITE - dot[0],
        };
    }
}

/// Turn a mask (or a finished canvas) by a quarter-turn rotation.
pub(crate) fn rotate_image(image: GrayImage, rotation: Rotation) -> GrayImage {
    if rotation == Rotation::None {
        return image;
    }
    let rotated = rotate_grid(&PixelGrid::from_gray(image), rotation);
    let (width, height) = (rotated.width, rotated.height);
    rotated
        .into_gray()
        .unwrap_or_else(|| GrayImage::new(width, height))
}
