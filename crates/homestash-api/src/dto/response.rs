//! Response bodies.

use serde::Serialize;

use homestash_entity::item::Item;
use homestash_entity::pairing::{PairingSnapshot, PendingTag};
use homestash_entity::storage_cell::StorageCell;
use homestash_service::pairing::ScanOutcome;

/// An item together with its rendered label.
#[derive(Debug, Clone, Serialize)]
pub struct LabeledItem {
    /// The item record.
    pub item: Item,
    /// The QR label as a base64 PNG.
    pub label_png_base64: String,
}

/// A storage cell together with its rendered label.
#[derive(Debug, Clone, Serialize)]
pub struct LabeledCell {
    /// The cell record.
    pub cell: StorageCell,
    /// The QR label as a base64 PNG.
    pub label_png_base64: String,
}

/// Outcome of a pairing scan.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScanResponse {
    /// One side recorded; waiting for the other.
    Waiting {
        /// The pending side(s).
        pending: PairingSnapshot,
    },
    /// The association has been written.
    Paired {
        /// The item side.
        item: PendingTag,
        /// The storage side.
        storage: PendingTag,
    },
}

impl From<ScanOutcome> for ScanResponse {
    fn from(outcome: ScanOutcome) -> Self {
        match outcome {
            ScanOutcome::Waiting { pending } => Self::Waiting { pending },
            ScanOutcome::Paired { item, storage } => Self::Paired { item, storage },
        }
    }
}
