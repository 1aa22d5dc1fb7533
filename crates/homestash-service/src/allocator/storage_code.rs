//! Storage code allocation.
//!
//! The numbering itself lives in the database crate: the allocation
//! transaction locks the room row, assigns the namespace letter on first
//! use, and computes the next cell number under that lock. This service
//! wraps it with request context and logging.

use std::sync::Arc;

use tracing::info;

use homestash_core::result::AppResult;
use homestash_core::types::id::{FurnitureId, RoomId};
use homestash_database::repositories::StorageCellRepository;
use homestash_entity::storage_cell::StorageCell;

use crate::context::RequestContext;

/// Allocates storage-cell codes within a (room, furniture) pair.
#[derive(Debug, Clone)]
pub struct StorageCodeAllocator {
    cells: Arc<StorageCellRepository>,
}

impl StorageCodeAllocator {
    /// Create an allocator over the storage-cell repository.
    pub fn new(cells: Arc<StorageCellRepository>) -> Self {
        Self { cells }
    }

    /// Allocate the next cell for the pair, assigning the room letter on
    /// first use.
    pub async fn allocate(
        &self,
        ctx: &RequestContext,
        room_id: RoomId,
        furniture_id: FurnitureId,
    ) -> AppResult<StorageCell> {
        let cell = self.cells.allocate(ctx.user_id, room_id, furniture_id).await?;
        info!(
            user_id = %ctx.user_id,
            code = %cell.code,
            cell_number = cell.cell_number,
            "Storage code allocated"
        );
        Ok(cell)
    }
}
