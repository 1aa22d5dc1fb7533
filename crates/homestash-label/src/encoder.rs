//! QR label encoder.

use std::io::Cursor;

use image::{GrayImage, ImageFormat, Luma};
use qrcode::{Color, EcLevel, QrCode};
use tracing::debug;

use homestash_core::config::label::LabelConfig;
use homestash_core::error::AppError;
use homestash_core::result::AppResult;

use crate::payload::LabelPayload;

const DARK: Luma<u8> = Luma([0u8]);
const LIGHT: Luma<u8> = Luma([255u8]);

/// Renders label payloads into PNG QR rasters.
///
/// Rendering is deterministic: the same payload and configuration always
/// produce the same bytes, so a printed label can be regenerated and a
/// round trip through [`crate::LabelDecoder`] is testable.
#[derive(Debug, Clone)]
pub struct LabelEncoder {
    ec_level: EcLevel,
    module_size: u32,
    margin: u32,
}

impl LabelEncoder {
    /// Build an encoder from configuration.
    pub fn new(config: &LabelConfig) -> AppResult<Self> {
        let ec_level = match config.error_correction.as_str() {
            "L" => EcLevel::L,
            "M" => EcLevel::M,
            "Q" => EcLevel::Q,
            "H" => EcLevel::H,
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown error-correction level '{other}' (expected L, M, Q, or H)"
                )));
            }
        };
        if config.module_size == 0 {
            return Err(AppError::configuration("Module size must be at least 1"));
        }
        Ok(Self {
            ec_level,
            module_size: config.module_size,
            margin: config.margin,
        })
    }

    /// Encode a payload into PNG bytes.
    pub fn encode(&self, payload: &LabelPayload) -> AppResult<Vec<u8>> {
        let json = serde_json::to_string(payload)?;
        let png = self.encode_data(&json)?;
        debug!(
            code = %payload.code,
            category = %payload.category,
            bytes = png.len(),
            "Rendered label"
        );
        Ok(png)
    }

    /// Encode arbitrary text into a QR PNG. The payload-level `encode` is
    /// the public surface; this exists so decode failure paths can be
    /// exercised with non-payload symbols.
    pub(crate) fn encode_data(&self, data: &str) -> AppResult<Vec<u8>> {
        let code = QrCode::with_error_correction_level(data.as_bytes(), self.ec_level)
            .map_err(|e| AppError::internal(format!("QR encoding failed: {e}")))?;

        let modules = code.width() as u32;
        let colors = code.to_colors();
        let size = (modules + 2 * self.margin) * self.module_size;
        let mut img = GrayImage::from_pixel(size, size, LIGHT);

        for (idx, color) in colors.iter().enumerate() {
            if *color != Color::Dark {
                continue;
            }
            let mx = (idx as u32 % modules + self.margin) * self.module_size;
            let my = (idx as u32 / modules + self.margin) * self.module_size;
            for dy in 0..self.module_size {
                for dx in 0..self.module_size {
                    img.put_pixel(mx + dx, my + dy, DARK);
                }
            }
        }

        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .map_err(|e| AppError::internal(format!("PNG encoding failed: {e}")))?;
        Ok(out)
    }
}

impl Default for LabelEncoder {
    fn default() -> Self {
        // The default config is always valid.
        Self::new(&LabelConfig::default()).expect("default label config")
    }
}
