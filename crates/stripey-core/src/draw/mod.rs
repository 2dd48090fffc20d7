//! Rasterizes parsed labels into monochrome images.
//!
//! The canvas is `round(width_mm * dpmm) x round(height_mm * dpmm)` dots.
//! Fields are painted in order; each is rendered upright, turned to its
//! orientation and placed at its origin.

mod barcode;
mod canvas;
mod qr;
mod shapes;
mod text;

use std::path::{Path, PathBuf};

use ab_glyph::FontVec;
use image::GrayImage;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::LabelConfig;
use crate::decode::PixelGrid;
use crate::encode::{encode_png, EncodeError};
use crate::pipeline::LabelDrawer;
use crate::transform::Rotation;
use crate::zpl::{Anchor, ElementKind, LabelElement, LabelInfo, LineColor, MAX_DOTS};
use canvas::{blank_canvas, paint_mask, rotate_image, FieldMask, Paint};

/// Errors that can occur while drawing a label.
#[derive(Debug, Error)]
pub enum DrawError {
    #[error("invalid label dimensions {width}x{height} dots")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("invalid print density {0} dots/mm")]
    InvalidDensity(i32),

    #[error("loading font {}: {reason}", .path.display())]
    Font { path: PathBuf, reason: String },

    #[error("barcode: {0}")]
    Barcode(String),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Physical parameters for one rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawerOptions {
    pub label_width_mm: f64,
    pub label_height_mm: f64,
    pub dpmm: i32,
    /// Font for text fields; system fonts are tried when unset.
    pub font_path: Option<PathBuf>,
}

impl From<&LabelConfig> for DrawerOptions {
    fn from(config: &LabelConfig) -> Self {
        Self {
            label_width_mm: config.label_width_mm,
            label_height_mm: config.label_height_mm,
            dpmm: config.dpmm,
            font_path: config.font_path.clone(),
        }
    }
}

/// Label renderer.
#[derive(Debug, Clone)]
pub struct Drawer {
    fallback_fonts: Vec<PathBuf>,
}

impl Default for Drawer {
    fn default() -> Self {
        Self {
            fallback_fonts: system_font_candidates().iter().map(PathBuf::from).collect(),
        }
    }
}

impl Drawer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A drawer that only uses a configured font.
    pub fn without_system_fonts() -> Self {
        Self {
            fallback_fonts: Vec::new(),
        }
    }

    /// Draw a label onto a white canvas.
    pub fn draw(&self, label: &LabelInfo, options: &DrawerOptions) -> Result<GrayImage, DrawError> {
        if options.dpmm <= 0 {
            return Err(DrawError::InvalidDensity(options.dpmm));
        }
        let width = dots(options.label_width_mm, options.dpmm, label.print_width);
        let height = dots(options.label_height_mm, options.dpmm, label.label_length);
        let sides = 1..=i64::from(MAX_DOTS);
        if !sides.contains(&width) || !sides.contains(&height) {
            return Err(DrawError::InvalidDimensions { width, height });
        }

        let font = self.load_font(options.font_path.as_deref())?;
        let context = Context {
            font: font.as_ref(),
            dpmm: options.dpmm,
        };

        let mut canvas = blank_canvas(width as u32, height as u32);
        for element in &label.elements {
            draw_element(&mut canvas, element, &context)?;
        }
        if label.inverted {
            canvas = rotate_image(canvas, Rotation::Deg180);
        }

        debug!(
            width,
            height,
            elements = label.elements.len(),
            inverted = label.inverted,
            "Label drawn"
        );
        Ok(canvas)
    }

    fn load_font(&self, configured: Option<&Path>) -> Result<Option<FontVec>, DrawError> {
        if let Some(path) = configured {
            return read_font(path).map(Some);
        }
        for path in &self.fallback_fonts {
            if !path.is_file() {
                continue;
            }
            match read_font(path) {
                Ok(font) => {
                    debug!(path = %path.display(), "Using system font");
                    return Ok(Some(font));
                }
                Err(e) => debug!(error = %e, "Skipping system font"),
            }
        }
        Ok(None)
    }
}

impl LabelDrawer for Drawer {
    fn draw_label_as_png(
        &self,
        label: &LabelInfo,
        options: &DrawerOptions,
    ) -> Result<Vec<u8>, DrawError> {
        let canvas = self.draw(label, options)?;
        Ok(encode_png(&PixelGrid::from_gray(canvas))?)
    }
}

/// Per-label rendering state.
struct Context<'a> {
    font: Option<&'a FontVec>,
    dpmm: i32,
}

fn draw_element(
    canvas: &mut GrayImage,
    element: &LabelElement,
    context: &Context<'_>,
) -> Result<(), DrawError> {
    let (field, rotation, color) = match &element.kind {
        ElementKind::Text {
            text: content,
            font,
            block,
        } => {
            let Some(loaded) = context.font else {
                warn!(text = %content, "No font available, text field skipped");
                return Ok(());
            };
            let scale = text::font_scale(font);
            let field = match block {
                Some(block) => text::render_block(loaded, scale, content, block),
                None => text::render_line(loaded, scale, content),
            };
            (field, font.orientation.rotation(), LineColor::Black)
        }
        ElementKind::Code128 { data, layout, mode } => (
            barcode::code128_mask(data, layout, *mode, context.font)?,
            layout.orientation.rotation(),
            LineColor::Black,
        ),
        ElementKind::Ean13 { data, layout } => (
            barcode::ean13_mask(data, layout, context.font)?,
            layout.orientation.rotation(),
            LineColor::Black,
        ),
        ElementKind::Qr {
            data,
            error_correction,
            magnification,
        } => {
            let magnification =
                magnification.unwrap_or_else(|| qr::default_magnification(context.dpmm));
            (
                qr::qr_mask(data, *error_correction, magnification)?,
                Rotation::None,
                LineColor::Black,
            )
        }
        ElementKind::GraphicBox {
            width,
            height,
            thickness,
            color,
            rounding,
        } => (
            FieldMask::bottom_anchored(shapes::box_mask(*width, *height, *thickness, *rounding)),
            Rotation::None,
            *color,
        ),
        ElementKind::GraphicCircle {
            diameter,
            thickness,
            color,
        } => (
            FieldMask::bottom_anchored(shapes::ellipse_mask(*diameter, *diameter, *thickness)),
            Rotation::None,
            *color,
        ),
        ElementKind::GraphicEllipse {
            width,
            height,
            thickness,
            color,
        } => (
            FieldMask::bottom_anchored(shapes::ellipse_mask(*width, *height, *thickness)),
            Rotation::None,
            *color,
        ),
        ElementKind::GraphicField {
            row_bytes,
            rows,
            data,
        } => (
            FieldMask::bottom_anchored(shapes::bitmap_mask(*row_bytes, *rows, data)),
            Rotation::None,
            LineColor::Black,
        ),
    };

    let paint = match (element.reverse, color) {
        (true, _) => Paint::Reverse,
        (false, LineColor::Black) => Paint::Black,
        (false, LineColor::White) => Paint::White,
    };
    let (x, y) = placement(&field, rotation, element);
    let mask = rotate_image(field.mask, rotation);
    paint_mask(canvas, &mask, x, y, paint);
    Ok(())
}

/// Top-left canvas position of a field after rotation.
///
/// `^FO` puts the rotated field's top-left corner on the origin. `^FT` puts
/// the baseline's left end there, following it through the rotation.
fn placement(field: &FieldMask, rotation: Rotation, element: &LabelElement) -> (i32, i32) {
    let origin = element.origin;
    match origin.anchor {
        Anchor::TopLeft => (origin.x, origin.y),
        Anchor::Baseline => {
            let (w, h) = (field.mask.width() as i32, field.mask.height() as i32);
            let (ax, ay) = rotate_point(0, field.baseline as i32, w, h, rotation);
            (origin.x - ax, origin.y - ay)
        }
    }
}

/// Continuous-coordinate form of the quarter-turn pixel mapping.
fn rotate_point(x: i32, y: i32, width: i32, height: i32, rotation: Rotation) -> (i32, i32) {
    match rotation {
        Rotation::None => (x, y),
        Rotation::Deg90 => (y, width - x),
        Rotation::Deg180 => (width - x, height - y),
        Rotation::Deg270 => (height - y, x),
    }
}

/// Millimetres to dots; zero millimetres falls back to the label's own size.
fn dots(mm: f64, dpmm: i32, fallback: Option<u32>) -> i64 {
    if mm == 0.0 {
        return fallback.map_or(0, i64::from);
    }
    (mm * f64::from(dpmm)).round() as i64
}

fn read_font(path: &Path) -> Result<FontVec, DrawError> {
    let font_error = |reason: String| DrawError::Font {
        path: path.to_path_buf(),
        reason,
    };
    let data = std::fs::read(path).map_err(|e| font_error(e.to_string()))?;
    FontVec::try_from_vec(data).map_err(|e| font_error(e.to_string()))
}

fn system_font_candidates() -> &'static [&'static str] {
    #[cfg(target_os = "macos")]
    {
        &[
            "/System/Library/Fonts/Supplemental/Arial.ttf",
            "/System/Library/Fonts/Supplemental/Helvetica.ttf",
            "/Library/Fonts/Arial.ttf",
        ]
    }
    #[cfg(target_os = "windows")]
    {
        &["C:\\Windows\\Fonts\\arial.ttf", "C:\\Windows\\Fonts\\segoeui.ttf"]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        &[
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
            "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
        ]
    }
}
