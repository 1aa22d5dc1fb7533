//! Storage cell entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use homestash_core::types::id::{FurnitureId, RoomId, StorageCellId, UserId};

/// A physical storage location inside a (room, furniture) pair.
///
/// `cell_number` starts at 1 per pair and increments without gaps;
/// `code` is `letter + furniture_no + zero_pad(cell_number, 3)` and is
/// a pure function of those three fields. Both are assigned by the
/// allocator and never hand-edited.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StorageCell {
    /// Unique cell identifier.
    pub id: StorageCellId,
    /// Owning user.
    pub user_id: UserId,
    /// The room this cell sits in.
    pub room_id: RoomId,
    /// The furniture piece this cell belongs to.
    pub furniture_id: FurnitureId,
    /// Sequence number within the (room, furniture) pair, starting at 1.
    pub cell_number: i32,
    /// Composed storage code, e.g. `A3001`. Unique per user.
    pub code: String,
    /// Composed human label (`room / furniture / code`), denormalised at
    /// creation time.
    pub display_name: String,
    /// When the cell was allocated.
    pub created_at: DateTime<Utc>,
}

/// Compose the human-readable label copied onto paired items.
pub fn compose_display_name(room_name: &str, furniture_name: &str, code: &str) -> String {
    format!("{room_name} / {furniture_name} / {code}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_composition() {
        assert_eq!(
            compose_display_name("Bedroom", "Desk", "A3001"),
            "Bedroom / Desk / A3001"
        );
    }
}
