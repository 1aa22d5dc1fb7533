//! sqlx-backed implementation of the inventory gateway.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use homestash_core::error::AppError;
use homestash_core::result::AppResult;
use homestash_core::traits::gateway::{InventoryGateway, TagRef};
use homestash_core::types::id::UserId;

use crate::repositories::map_sqlx;

/// The production [`InventoryGateway`]: thin projections over the items
/// and storage_cells tables plus the single association transaction.
#[derive(Debug, Clone)]
pub struct PgInventoryGateway {
    pool: PgPool,
}

impl PgInventoryGateway {
    /// Create a gateway over a connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryGateway for PgInventoryGateway {
    async fn item_code_exists(&self, code: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM items WHERE code = $1)")
            .bind(code)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx(e, "Failed to probe item code"))
    }

    async fn resolve_item(&self, user_id: UserId, code: &str) -> AppResult<Option<TagRef>> {
        sqlx::query_as::<_, TagRef>(
            "SELECT id, code, name FROM items WHERE user_id = $1 AND code = $2",
        )
        .bind(user_id)
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx(e, "Failed to resolve item code"))
    }

    async fn resolve_storage(&self, user_id: UserId, code: &str) -> AppResult<Option<TagRef>> {
        sqlx::query_as::<_, TagRef>(
            "SELECT id, code, display_name AS name FROM storage_cells \
             WHERE user_id = $1 AND code = $2",
        )
        .bind(user_id)
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx(e, "Failed to resolve storage code"))
    }

    async fn bind_item_to_storage(
        &self,
        user_id: UserId,
        item_id: Uuid,
        storage_cell_id: Uuid,
        location_label: &str,
    ) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx(e, "Failed to begin association transaction"))?;

        // Re-pairing the same two tags is a no-op, not an error.
        sqlx::query(
            "INSERT INTO item_storage_cells (item_id, storage_cell_id) \
             VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(item_id)
        .bind(storage_cell_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx(e, "Failed to insert association"))?;

        let updated =
            sqlx::query("UPDATE items SET location_label = $3 WHERE id = $1 AND user_id = $2")
                .bind(item_id)
                .bind(user_id)
                .bind(location_label)
                .execute(&mut *tx)
                .await
                .map_err(|e| map_sqlx(e, "Failed to update location label"))?;

        if updated.rows_affected() == 0 {
            return Err(AppError::entity_not_found(
                "Item disappeared before the association could be written",
            ));
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx(e, "Failed to commit association"))?;
        Ok(())
    }
}
