//! Item repository implementation.

use sqlx::PgPool;

use homestash_core::error::{AppError, ErrorKind};
use homestash_core::result::AppResult;
use homestash_core::types::id::{ItemId, UserId};
use homestash_entity::item::{CreateItem, Item};
use homestash_entity::storage_cell::StorageCell;

use super::{is_unique_violation, map_sqlx};

/// Repository for item CRUD operations.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: PgPool,
}

impl ItemRepository {
    /// Create a new item repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a freshly deposited item.
    ///
    /// A collision on the global `UNIQUE(code)` constraint means the
    /// allocator lost a race after its retries; the whole deposit is safe
    /// to retry, so that case is surfaced as `DuplicateCode`.
    pub async fn create(&self, data: &CreateItem) -> AppResult<Item> {
        sqlx::query_as::<_, Item>(
            "INSERT INTO items (user_id, code, name) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.code)
        .bind(&data.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::with_source(
                    ErrorKind::DuplicateCode,
                    format!("Item code '{}' was allocated concurrently", data.code),
                    e,
                )
            } else {
                map_sqlx(e, "Failed to create item")
            }
        })
    }

    /// Find an item by ID, scoped to its owner.
    pub async fn find_by_id(&self, user_id: UserId, id: ItemId) -> AppResult<Option<Item>> {
        sqlx::query_as::<_, Item>("SELECT * FROM items WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx(e, "Failed to find item"))
    }

    /// Find an item by its code, scoped to its owner.
    pub async fn find_by_code(&self, user_id: UserId, code: &str) -> AppResult<Option<Item>> {
        sqlx::query_as::<_, Item>("SELECT * FROM items WHERE user_id = $1 AND code = $2")
            .bind(user_id)
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx(e, "Failed to find item by code"))
    }

    /// Whether an item code exists anywhere in the installation.
    pub async fn code_exists(&self, code: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM items WHERE code = $1)")
            .bind(code)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx(e, "Failed to probe item code"))
    }

    /// List a user's items, most recently deposited first.
    pub async fn list(&self, user_id: UserId) -> AppResult<Vec<Item>> {
        sqlx::query_as::<_, Item>(
            "SELECT * FROM items WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx(e, "Failed to list items"))
    }

    /// Overwrite an item's location label (direct user edit).
    pub async fn update_location_label(
        &self,
        user_id: UserId,
        id: ItemId,
        label: &str,
    ) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE items SET location_label = $3 WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .bind(label)
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx(e, "Failed to update location label"))?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete an item. Returns `true` if a row was removed.
    pub async fn delete(&self, user_id: UserId, id: ItemId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx(e, "Failed to delete item"))?;
        Ok(result.rows_affected() > 0)
    }

    /// The storage cells an item is currently associated with.
    pub async fn storage_cells(&self, user_id: UserId, id: ItemId) -> AppResult<Vec<StorageCell>> {
        sqlx::query_as::<_, StorageCell>(
            "SELECT sc.* FROM storage_cells sc \
             JOIN item_storage_cells l ON l.storage_cell_id = sc.id \
             WHERE l.item_id = $1 AND sc.user_id = $2 \
             ORDER BY sc.code ASC",
        )
        .bind(id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx(e, "Failed to list item storage cells"))
    }
}
