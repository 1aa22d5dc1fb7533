//! Furniture entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use homestash_core::types::id::{FurnitureId, RoomId, UserId};

/// A furniture piece inside a room.
///
/// `furniture_no` is a small per-user integer (1, 2, 3, …) used as the
/// middle segment of storage codes; earlier scheme generations used the
/// raw row id or a dedicated furniture code, which this implementation
/// canonicalises away.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Furniture {
    /// Unique furniture identifier.
    pub id: FurnitureId,
    /// Owning user.
    pub user_id: UserId,
    /// The room this piece stands in.
    pub room_id: RoomId,
    /// Human-readable name.
    pub name: String,
    /// Per-user sequence number used in storage codes.
    pub furniture_no: i32,
    /// When the furniture was registered.
    pub created_at: DateTime<Utc>,
}
