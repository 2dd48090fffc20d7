//! QR codes for `^BQ`.

use qrcode::{Color, EcLevel, QrCode};

use super::canvas::{blank_mask, fill_rect, FieldMask};
use super::DrawError;
use crate::zpl::QrErrorCorrection;

/// Module size in dots when `^BQ` leaves magnification unset.
pub(crate) fn default_magnification(dpmm: i32) -> u32 {
    match dpmm {
        ..=6 => 1,
        7..=8 => 2,
        9..=12 => 3,
        _ => 6,
    }
}

/// Generate a QR code mask with `magnification` dots per module.
pub(crate) fn qr_mask(
    data: &str,
    error_correction: QrErrorCorrection,
    magnification: u32,
) -> Result<FieldMask, DrawError> {
    let level = match error_correction {
        QrErrorCorrection::Low => EcLevel::L,
        QrErrorCorrection::Medium => EcLevel::M,
        QrErrorCorrection::Quartile => EcLevel::Q,
        QrErrorCorrection::High => EcLevel::H,
    };
    let code = QrCode::with_error_correction_level(data.as_bytes(), level)
        .map_err(|e| DrawError::Barcode(format!("QR encode error: {e}")))?;
    let modules = code.to_colors();
    let module_count = code.width() as u32;

    let scale = magnification.max(1);
    let size = module_count * scale;
    let mut mask = blank_mask(size, size);

    for (i, color) in modules.iter().enumerate() {
        if *color == Color::Dark {
            let x = (i as u32) % module_count;
            let y = (i as u32) / module_count;
            fill_rect(&mut mask, x * scale, y * scale, scale, scale);
        }
    }

    Ok(FieldMask::bottom_anchored(mask))
}
