//! Room repository implementation.

use sqlx::PgPool;

use homestash_core::result::AppResult;
use homestash_core::types::id::{RoomId, UserId};
use homestash_entity::room::Room;

use super::map_sqlx;

/// Repository for room operations.
///
/// Letter assignment is not here: it happens inside the storage-cell
/// allocation transaction so the read-then-write stays atomic.
#[derive(Debug, Clone)]
pub struct RoomRepository {
    pool: PgPool,
}

impl RoomRepository {
    /// Create a new room repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a room. The letter stays unassigned until the first storage
    /// cell is allocated in it.
    pub async fn create(&self, user_id: UserId, name: &str) -> AppResult<Room> {
        sqlx::query_as::<_, Room>(
            "INSERT INTO rooms (user_id, name) VALUES ($1, $2) RETURNING *",
        )
        .bind(user_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx(e, "Failed to create room"))
    }

    /// Find a room by ID, scoped to its owner.
    pub async fn find_by_id(&self, user_id: UserId, id: RoomId) -> AppResult<Option<Room>> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx(e, "Failed to find room"))
    }

    /// List a user's rooms, alphabetically.
    pub async fn list(&self, user_id: UserId) -> AppResult<Vec<Room>> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE user_id = $1 ORDER BY name ASC")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx(e, "Failed to list rooms"))
    }
}
