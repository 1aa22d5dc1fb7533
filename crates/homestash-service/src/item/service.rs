//! Item service: deposit (with code allocation) and the CRUD the UI needs.

use std::sync::Arc;

use tracing::info;

use homestash_core::error::AppError;
use homestash_core::result::AppResult;
use homestash_core::types::id::ItemId;
use homestash_database::repositories::ItemRepository;
use homestash_entity::item::{CreateItem, Item};
use homestash_entity::storage_cell::StorageCell;

use crate::allocator::ItemCodeAllocator;
use crate::context::RequestContext;

/// Manages items: deposit, lookup, location edits, deletion.
#[derive(Clone)]
pub struct ItemService {
    items: Arc<ItemRepository>,
    allocator: Arc<ItemCodeAllocator>,
}

impl ItemService {
    /// Create an item service.
    pub fn new(items: Arc<ItemRepository>, allocator: Arc<ItemCodeAllocator>) -> Self {
        Self { items, allocator }
    }

    /// Deposit a new item: allocate a code and create the record.
    pub async fn deposit(&self, ctx: &RequestContext, name: &str) -> AppResult<Item> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Item name must not be empty"));
        }

        let code = self.allocator.allocate().await?;
        let item = self
            .items
            .create(&CreateItem {
                user_id: ctx.user_id,
                code: code.into_inner(),
                name: name.to_string(),
            })
            .await?;

        info!(user_id = %ctx.user_id, code = %item.code, "Item deposited");
        Ok(item)
    }

    /// Fetch one item.
    pub async fn get(&self, ctx: &RequestContext, id: ItemId) -> AppResult<Item> {
        self.items
            .find_by_id(ctx.user_id, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))
    }

    /// List the user's items, newest first.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Item>> {
        self.items.list(ctx.user_id).await
    }

    /// Overwrite an item's location label (direct user edit, outside the
    /// pairing flow).
    pub async fn update_location(
        &self,
        ctx: &RequestContext,
        id: ItemId,
        label: &str,
    ) -> AppResult<()> {
        if self
            .items
            .update_location_label(ctx.user_id, id, label)
            .await?
        {
            Ok(())
        } else {
            Err(AppError::not_found(format!("Item {id} not found")))
        }
    }

    /// Delete an item.
    pub async fn delete(&self, ctx: &RequestContext, id: ItemId) -> AppResult<()> {
        if self.items.delete(ctx.user_id, id).await? {
            info!(user_id = %ctx.user_id, item_id = %id, "Item deleted");
            Ok(())
        } else {
            Err(AppError::not_found(format!("Item {id} not found")))
        }
    }

    /// The storage cells the item is associated with.
    pub async fn storage_cells(
        &self,
        ctx: &RequestContext,
        id: ItemId,
    ) -> AppResult<Vec<StorageCell>> {
        self.items.storage_cells(ctx.user_id, id).await
    }
}
