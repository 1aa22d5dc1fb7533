//! Persistence gateway trait for code resolution and pairing commits.
//!
//! The pairing state machine and the item-code allocator consume exactly
//! this surface: existence probes, user-scoped code resolution, and the
//! single association write. The sqlx-backed implementation lives in the
//! database crate; tests substitute an in-memory fake.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::result::AppResult;
use crate::types::id::UserId;

/// A resolved tag: the row a scanned code points at, projected down to
/// what the pairing flow needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TagRef {
    /// Primary key of the underlying row.
    pub id: Uuid,
    /// The allocated code.
    pub code: String,
    /// Display name (for storage cells, the composed `room / furniture /
    /// code` label).
    pub name: String,
}

/// Read/write operations the identifier and pairing core needs from the
/// persistence layer.
///
/// Every resolving method is scoped by the owning user; cross-user
/// leakage here would let one household pair against another's shelves.
#[async_trait]
pub trait InventoryGateway: Send + Sync + 'static {
    /// Whether an item code is already taken anywhere in the installation.
    ///
    /// Item codes are globally unique, so this probe is deliberately not
    /// user-scoped.
    async fn item_code_exists(&self, code: &str) -> AppResult<bool>;

    /// Resolve an item code for the given user.
    async fn resolve_item(&self, user_id: UserId, code: &str) -> AppResult<Option<TagRef>>;

    /// Resolve a storage-cell code for the given user.
    async fn resolve_storage(&self, user_id: UserId, code: &str) -> AppResult<Option<TagRef>>;

    /// Commit an item↔storage association: insert the link (idempotent)
    /// and overwrite the item's location label with the cell's display
    /// name, both in one transaction.
    async fn bind_item_to_storage(
        &self,
        user_id: UserId,
        item_id: Uuid,
        storage_cell_id: Uuid,
        location_label: &str,
    ) -> AppResult<()>;
}
