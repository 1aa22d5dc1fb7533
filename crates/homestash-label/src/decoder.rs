//! QR label decoder.

use tracing::debug;

use homestash_core::error::AppError;
use homestash_core::result::AppResult;

use crate::payload::LabelPayload;

/// Reads scanned label images back into payloads.
///
/// Fails with `UnreadableLabel` when the bytes are not an image or no QR
/// symbol can be located, and with `MalformedPayload` when a symbol
/// decodes but its content is not a label payload.
#[derive(Debug, Clone, Default)]
pub struct LabelDecoder;

impl LabelDecoder {
    /// Create a decoder.
    pub fn new() -> Self {
        Self
    }

    /// Decode a scanned image into a label payload.
    pub fn decode(&self, bytes: &[u8]) -> AppResult<LabelPayload> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| AppError::unreadable_label(format!("Not a decodable image: {e}")))?
            .to_luma8();

        let (width, height) = image.dimensions();
        let mut prepared =
            rqrr::PreparedImage::prepare_from_greyscale(width as usize, height as usize, |x, y| {
                image.get_pixel(x as u32, y as u32)[0]
            });

        let grids = prepared.detect_grids();
        let grid = grids
            .first()
            .ok_or_else(|| AppError::unreadable_label("No QR symbol found in image"))?;

        let (_meta, content) = grid
            .decode()
            .map_err(|e| AppError::unreadable_label(format!("QR symbol unreadable: {e}")))?;

        debug!(bytes = content.len(), "Decoded label symbol");

        serde_json::from_str(&content)
            .map_err(|e| AppError::malformed_payload(format!("Label payload did not parse: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{GrayImage, ImageFormat, Luma};

    use homestash_core::error::ErrorKind;

    use super::*;
    use crate::encoder::LabelEncoder;

    #[test]
    fn roundtrip_item_payload() {
        let encoder = LabelEncoder::default();
        let decoder = LabelDecoder::new();
        let payload = LabelPayload::item("ITEM-20240520-10086", "Winter gloves");
        let png = encoder.encode(&payload).unwrap();
        assert_eq!(decoder.decode(&png).unwrap(), payload);
    }

    #[test]
    fn roundtrip_storage_payload() {
        let encoder = LabelEncoder::default();
        let decoder = LabelDecoder::new();
        let payload = LabelPayload::storage("A3001", "Bedroom / Desk / A3001");
        let png = encoder.encode(&payload).unwrap();
        assert_eq!(decoder.decode(&png).unwrap(), payload);
    }

    #[test]
    fn roundtrip_legacy_payload_without_name() {
        let encoder = LabelEncoder::default();
        let decoder = LabelDecoder::new();
        let mut payload = LabelPayload::storage("A3001", "unused");
        payload.name = None;
        let png = encoder.encode(&payload).unwrap();
        assert_eq!(decoder.decode(&png).unwrap(), payload);
    }

    #[test]
    fn garbage_bytes_are_unreadable() {
        let decoder = LabelDecoder::new();
        let err = decoder.decode(b"definitely not a png").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnreadableLabel);
    }

    #[test]
    fn blank_image_has_no_symbol() {
        let img = GrayImage::from_pixel(200, 200, Luma([255u8]));
        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();

        let decoder = LabelDecoder::new();
        let err = decoder.decode(&png).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnreadableLabel);
    }

    #[test]
    fn non_payload_symbol_is_malformed() {
        let encoder = LabelEncoder::default();
        let png = encoder.encode_data("https://example.com/not-a-label").unwrap();

        let decoder = LabelDecoder::new();
        let err = decoder.decode(&png).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedPayload);
    }
}
