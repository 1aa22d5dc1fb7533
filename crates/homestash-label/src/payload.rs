//! Label wire payload.
//!
//! The JSON object carried inside every QR symbol:
//!
//! ```json
//! { "code": "<identifier>", "name": "<display name>", "category": "item" }
//! ```
//!
//! `name` is optional on decode: label generations printed before the
//! name field existed omit it, and readers fall back to a lookup by code.

use serde::{Deserialize, Serialize};

use homestash_core::types::category::TagCategory;

/// The structured payload encoded into a QR label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelPayload {
    /// The allocated code of the labelled entity.
    pub code: String,
    /// Display name; absent on older labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Which table the code resolves against.
    pub category: TagCategory,
}

impl LabelPayload {
    /// Payload for an item label.
    pub fn item(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: Some(name.into()),
            category: TagCategory::Item,
        }
    }

    /// Payload for a storage-cell label.
    pub fn storage(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: Some(name.into()),
            category: TagCategory::Storage,
        }
    }
}
