//! Storage service: the minimal room/furniture surface the allocator
//! needs, plus cell allocation and lookup.

use std::sync::Arc;

use tracing::info;

use homestash_core::error::AppError;
use homestash_core::result::AppResult;
use homestash_core::types::id::{FurnitureId, RoomId, StorageCellId};
use homestash_database::repositories::{
    FurnitureRepository, RoomRepository, StorageCellRepository,
};
use homestash_entity::furniture::Furniture;
use homestash_entity::room::Room;
use homestash_entity::storage_cell::StorageCell;

use crate::allocator::StorageCodeAllocator;
use crate::context::RequestContext;

/// Manages rooms, furniture, and storage cells.
#[derive(Clone)]
pub struct StorageService {
    rooms: Arc<RoomRepository>,
    furniture: Arc<FurnitureRepository>,
    cells: Arc<StorageCellRepository>,
    allocator: Arc<StorageCodeAllocator>,
}

impl StorageService {
    /// Create a storage service.
    pub fn new(
        rooms: Arc<RoomRepository>,
        furniture: Arc<FurnitureRepository>,
        cells: Arc<StorageCellRepository>,
        allocator: Arc<StorageCodeAllocator>,
    ) -> Self {
        Self {
            rooms,
            furniture,
            cells,
            allocator,
        }
    }

    /// Create a room. Its letter stays unassigned until the first cell.
    pub async fn create_room(&self, ctx: &RequestContext, name: &str) -> AppResult<Room> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Room name must not be empty"));
        }
        let room = self.rooms.create(ctx.user_id, name).await?;
        info!(user_id = %ctx.user_id, room_id = %room.id, "Room created");
        Ok(room)
    }

    /// List the user's rooms.
    pub async fn list_rooms(&self, ctx: &RequestContext) -> AppResult<Vec<Room>> {
        self.rooms.list(ctx.user_id).await
    }

    /// Register a furniture piece in a room.
    pub async fn create_furniture(
        &self,
        ctx: &RequestContext,
        room_id: RoomId,
        name: &str,
    ) -> AppResult<Furniture> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Furniture name must not be empty"));
        }
        self.furniture.create(ctx.user_id, room_id, name).await
    }

    /// List the furniture in a room.
    pub async fn list_furniture(
        &self,
        ctx: &RequestContext,
        room_id: RoomId,
    ) -> AppResult<Vec<Furniture>> {
        self.furniture.list_by_room(ctx.user_id, room_id).await
    }

    /// Allocate the next storage cell in a (room, furniture) pair.
    pub async fn allocate_cell(
        &self,
        ctx: &RequestContext,
        room_id: RoomId,
        furniture_id: FurnitureId,
    ) -> AppResult<StorageCell> {
        self.allocator.allocate(ctx, room_id, furniture_id).await
    }

    /// Fetch one storage cell.
    pub async fn get_cell(&self, ctx: &RequestContext, id: StorageCellId) -> AppResult<StorageCell> {
        self.cells
            .find_by_id(ctx.user_id, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Storage cell {id} not found")))
    }

    /// List the cells of a (room, furniture) pair in allocation order.
    pub async fn list_cells(
        &self,
        ctx: &RequestContext,
        room_id: RoomId,
        furniture_id: FurnitureId,
    ) -> AppResult<Vec<StorageCell>> {
        self.cells
            .list_for_pair(ctx.user_id, room_id, furniture_id)
            .await
    }
}
