//! QR code rasterisation.

use image::{GrayImage, Luma};
use qrcode::{Color, EcLevel, QrCode};

use crate::error::{AttestationError, Result};

const DARK: Luma<u8> = Luma([0u8]);
const LIGHT: Luma<u8> = Luma([255u8]);

/// Encode `content` as a `size` x `size` grayscale bitmap without quiet zone.
///
/// Every module is drawn with the same integer pixel scale. When `size` is not
/// a multiple of the symbol width the leftover pixels are split around the
/// symbol so the output keeps its exact dimensions.
pub fn encode_qr(content: &str, size: u32) -> Result<GrayImage> {
    let code = QrCode::with_error_correction_level(content.as_bytes(), EcLevel::L).map_err(|e| {
        AttestationError::EncodingOverflow(format!(
            "{} bytes of content cannot be encoded: {}",
            content.len(),
            e
        ))
    })?;

    let modules = code.width() as u32;
    let scale = size / modules;
    if scale == 0 {
        return Err(AttestationError::EncodingOverflow(format!(
            "{} modules do not fit in {} pixels",
            modules, size
        )));
    }
    let offset = (size - modules * scale) / 2;
    let colors = code.to_colors();

    let img = GrayImage::from_fn(size, size, |x, y| {
        if x < offset || y < offset {
            return LIGHT;
        }
        let (col, row) = ((x - offset) / scale, (y - offset) / scale);
        if col >= modules || row >= modules {
            return LIGHT;
        }
        match colors[(row * modules + col) as usize] {
            Color::Dark => DARK,
            Color::Light => LIGHT,
        }
    });
    Ok(img)
}
