//! Furniture repository implementation.

use sqlx::PgPool;
use tracing::info;

use homestash_core::error::{AppError, ErrorKind};
use homestash_core::result::AppResult;
use homestash_core::types::id::{FurnitureId, RoomId, UserId};
use homestash_entity::furniture::Furniture;

use super::map_sqlx;

/// How many times a furniture-number allocation is retried when two
/// requests race into the same `UNIQUE(user_id, furniture_no)` slot.
const MAX_ATTEMPTS: u32 = 3;

/// Repository for furniture operations.
#[derive(Debug, Clone)]
pub struct FurnitureRepository {
    pool: PgPool,
}

impl FurnitureRepository {
    /// Create a new furniture repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a furniture piece, assigning the next per-user
    /// `furniture_no`.
    ///
    /// The counter is owned by the database: the number is computed and
    /// inserted in a single statement, and the unique constraint turns a
    /// concurrent duplicate into a retried conflict instead of a silent
    /// double allocation.
    pub async fn create(
        &self,
        user_id: UserId,
        room_id: RoomId,
        name: &str,
    ) -> AppResult<Furniture> {
        let room_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM rooms WHERE id = $1 AND user_id = $2)")
                .bind(room_id)
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| map_sqlx(e, "Failed to check room"))?;
        if !room_exists {
            return Err(AppError::not_found(format!(
                "Room {room_id} does not exist for this user"
            )));
        }

        for _ in 0..MAX_ATTEMPTS {
            let result = sqlx::query_as::<_, Furniture>(
                "INSERT INTO furniture (user_id, room_id, name, furniture_no) \
                 VALUES ($1, $2, $3, \
                     (SELECT COALESCE(MAX(furniture_no), 0) + 1 FROM furniture WHERE user_id = $1)) \
                 RETURNING *",
            )
            .bind(user_id)
            .bind(room_id)
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx(e, "Failed to create furniture"));

            match result {
                Err(e) if e.kind == ErrorKind::Conflict => continue,
                Ok(furniture) => {
                    info!(
                        user_id = %user_id,
                        furniture_id = %furniture.id,
                        furniture_no = furniture.furniture_no,
                        "Furniture registered"
                    );
                    return Ok(furniture);
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::duplicate_code(
            "Furniture number allocation kept colliding; retry the operation",
        ))
    }

    /// Find a furniture piece by ID, scoped to its owner.
    pub async fn find_by_id(
        &self,
        user_id: UserId,
        id: FurnitureId,
    ) -> AppResult<Option<Furniture>> {
        sqlx::query_as::<_, Furniture>("SELECT * FROM furniture WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx(e, "Failed to find furniture"))
    }

    /// List the furniture in a room.
    pub async fn list_by_room(&self, user_id: UserId, room_id: RoomId) -> AppResult<Vec<Furniture>> {
        sqlx::query_as::<_, Furniture>(
            "SELECT * FROM furniture WHERE user_id = $1 AND room_id = $2 ORDER BY furniture_no ASC",
        )
        .bind(user_id)
        .bind(room_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx(e, "Failed to list furniture"))
    }
}
