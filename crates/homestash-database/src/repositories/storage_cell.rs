//! Storage cell repository: lookup plus the allocation transaction.

use sqlx::PgPool;
use tracing::info;

use homestash_core::error::{AppError, ErrorKind};
use homestash_core::result::AppResult;
use homestash_core::types::code::StorageCode;
use homestash_core::types::id::{FurnitureId, RoomId, StorageCellId, UserId};
use homestash_entity::furniture::Furniture;
use homestash_entity::room::{lowest_unused_letter, Room};
use homestash_entity::storage_cell::{compose_display_name, StorageCell};

use super::map_sqlx;

/// How many times the allocation transaction is retried when a unique
/// constraint catches a concurrent allocation (same cell number or same
/// room letter).
const MAX_ATTEMPTS: u32 = 3;

/// Repository for storage cells, including the code allocation
/// transaction.
#[derive(Debug, Clone)]
pub struct StorageCellRepository {
    pool: PgPool,
}

impl StorageCellRepository {
    /// Create a new storage cell repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Allocate the next cell in a (room, furniture) pair.
    ///
    /// One transaction covers the whole operation: the room row is locked
    /// `FOR UPDATE`, the room letter is assigned on first use (lowest
    /// unused A-Z for the user; `ExhaustedNamespace` when all 26 are
    /// taken), and the cell is inserted with
    /// `cell_number = MAX(cell_number) + 1` for the exact pair. The unique
    /// constraints on `(room, furniture, cell_number)` and
    /// `(user, letter)` backstop races the lock does not cover; those
    /// conflicts are retried from scratch.
    pub async fn allocate(
        &self,
        user_id: UserId,
        room_id: RoomId,
        furniture_id: FurnitureId,
    ) -> AppResult<StorageCell> {
        for _ in 0..MAX_ATTEMPTS {
            match self.try_allocate(user_id, room_id, furniture_id).await {
                Err(e) if e.kind == ErrorKind::Conflict => continue,
                other => return other,
            }
        }

        Err(AppError::duplicate_code(
            "Storage code allocation kept colliding; retry the operation",
        ))
    }

    async fn try_allocate(
        &self,
        user_id: UserId,
        room_id: RoomId,
        furniture_id: FurnitureId,
    ) -> AppResult<StorageCell> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx(e, "Failed to begin allocation transaction"))?;

        // The room lock serialises all allocation inside this room:
        // letter assignment and cell numbering for every furniture piece.
        let room = sqlx::query_as::<_, Room>(
            "SELECT * FROM rooms WHERE id = $1 AND user_id = $2 FOR UPDATE",
        )
        .bind(room_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_sqlx(e, "Failed to lock room"))?
        .ok_or_else(|| {
            AppError::entity_not_found(format!("Room {room_id} does not exist for this user"))
        })?;

        let furniture = sqlx::query_as::<_, Furniture>(
            "SELECT * FROM furniture WHERE id = $1 AND user_id = $2",
        )
        .bind(furniture_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_sqlx(e, "Failed to load furniture"))?
        .ok_or_else(|| {
            AppError::entity_not_found(format!(
                "Furniture {furniture_id} does not exist for this user"
            ))
        })?;

        if furniture.room_id != room.id {
            return Err(AppError::validation(format!(
                "Furniture {furniture_id} is not in room {room_id}"
            )));
        }

        let letter = match room.letter_char() {
            Some(letter) => letter,
            None => self.assign_letter(&mut tx, &room).await?,
        };

        let cell_number: i32 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(cell_number), 0) + 1 FROM storage_cells \
             WHERE room_id = $1 AND furniture_id = $2",
        )
        .bind(room_id)
        .bind(furniture_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_sqlx(e, "Failed to compute next cell number"))?;

        let code = StorageCode::compose(letter, furniture.furniture_no, cell_number)?;
        let display_name = compose_display_name(&room.name, &furniture.name, code.as_str());

        let cell = sqlx::query_as::<_, StorageCell>(
            "INSERT INTO storage_cells \
                 (user_id, room_id, furniture_id, cell_number, code, display_name) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(user_id)
        .bind(room_id)
        .bind(furniture_id)
        .bind(cell_number)
        .bind(code.as_str())
        .bind(&display_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_sqlx(e, "Failed to insert storage cell"))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx(e, "Failed to commit allocation"))?;

        info!(
            user_id = %user_id,
            cell_id = %cell.id,
            code = %cell.code,
            "Storage cell allocated"
        );
        Ok(cell)
    }

    /// Assign the lowest unused letter to a room inside the allocation
    /// transaction. A write dressed as part of a read-then-allocate
    /// operation, so it must stay on the same transaction handle.
    async fn assign_letter(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        room: &Room,
    ) -> AppResult<char> {
        let taken: Vec<String> = sqlx::query_scalar(
            "SELECT letter FROM rooms WHERE user_id = $1 AND letter IS NOT NULL",
        )
        .bind(room.user_id)
        .fetch_all(&mut **tx)
        .await
        .map_err(|e| map_sqlx(e, "Failed to load assigned letters"))?;

        let taken: Vec<char> = taken.iter().filter_map(|s| s.chars().next()).collect();
        let letter = lowest_unused_letter(&taken).ok_or_else(|| {
            AppError::exhausted_namespace(
                "All 26 room letters are already assigned for this user",
            )
        })?;

        sqlx::query("UPDATE rooms SET letter = $1 WHERE id = $2")
            .bind(letter.to_string())
            .bind(room.id)
            .execute(&mut **tx)
            .await
            .map_err(|e| map_sqlx(e, "Failed to assign room letter"))?;

        Ok(letter)
    }

    /// Find a cell by ID, scoped to its owner.
    pub async fn find_by_id(
        &self,
        user_id: UserId,
        id: StorageCellId,
    ) -> AppResult<Option<StorageCell>> {
        sqlx::query_as::<_, StorageCell>(
            "SELECT * FROM storage_cells WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx(e, "Failed to find storage cell"))
    }

    /// Find a cell by its composed code, scoped to its owner.
    pub async fn find_by_code(&self, user_id: UserId, code: &str) -> AppResult<Option<StorageCell>> {
        sqlx::query_as::<_, StorageCell>(
            "SELECT * FROM storage_cells WHERE user_id = $1 AND code = $2",
        )
        .bind(user_id)
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx(e, "Failed to find storage cell by code"))
    }

    /// List the cells of a (room, furniture) pair in allocation order.
    pub async fn list_for_pair(
        &self,
        user_id: UserId,
        room_id: RoomId,
        furniture_id: FurnitureId,
    ) -> AppResult<Vec<StorageCell>> {
        sqlx::query_as::<_, StorageCell>(
            "SELECT * FROM storage_cells \
             WHERE user_id = $1 AND room_id = $2 AND furniture_id = $3 \
             ORDER BY cell_number ASC",
        )
        .bind(user_id)
        .bind(room_id)
        .bind(furniture_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx(e, "Failed to list storage cells"))
    }
}
