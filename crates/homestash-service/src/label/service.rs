//! Label service: payloads in, PNG rasters out, and back again.

use homestash_core::config::label::LabelConfig;
use homestash_core::result::AppResult;
use homestash_entity::item::Item;
use homestash_entity::storage_cell::StorageCell;
use homestash_label::{LabelDecoder, LabelEncoder, LabelPayload};

/// Renders entity labels and decodes scanned label images.
#[derive(Debug, Clone)]
pub struct LabelService {
    encoder: LabelEncoder,
    decoder: LabelDecoder,
}

impl LabelService {
    /// Build the service from label configuration.
    pub fn new(config: &LabelConfig) -> AppResult<Self> {
        Ok(Self {
            encoder: LabelEncoder::new(config)?,
            decoder: LabelDecoder::new(),
        })
    }

    /// Render an item's QR label as PNG bytes.
    pub fn render_item(&self, item: &Item) -> AppResult<Vec<u8>> {
        self.encoder
            .encode(&LabelPayload::item(&item.code, &item.name))
    }

    /// Render a storage cell's QR label as PNG bytes.
    pub fn render_cell(&self, cell: &StorageCell) -> AppResult<Vec<u8>> {
        self.encoder
            .encode(&LabelPayload::storage(&cell.code, &cell.display_name))
    }

    /// Decode a scanned label image into its payload.
    pub fn decode(&self, bytes: &[u8]) -> AppResult<LabelPayload> {
        self.decoder.decode(bytes)
    }
}
