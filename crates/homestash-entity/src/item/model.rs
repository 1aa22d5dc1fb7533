//! Item entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use homestash_core::types::id::{ItemId, UserId};

/// A tracked physical object.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Item {
    /// Unique item identifier.
    pub id: ItemId,
    /// Owning user.
    pub user_id: UserId,
    /// Allocated item code (`ITEM-YYYYMMDD-NNNNN`), globally unique and
    /// immutable once assigned.
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Denormalised copy of the associated storage cell's display name,
    /// kept so lists render without a join. Empty until paired.
    pub location_label: String,
    /// When the item was deposited.
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Whether the item has been placed somewhere yet.
    pub fn is_stored(&self) -> bool {
        !self.location_label.is_empty()
    }
}

/// Data required to create a new item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItem {
    /// Owning user.
    pub user_id: UserId,
    /// Freshly allocated item code.
    pub code: String,
    /// Human-readable name.
    pub name: String,
}
