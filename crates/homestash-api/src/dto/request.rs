//! Request bodies and query parameters.

use serde::Deserialize;

use homestash_core::types::id::{FurnitureId, RoomId};
use homestash_label::LabelPayload;

/// Body of `POST /api/items`.
#[derive(Debug, Clone, Deserialize)]
pub struct DepositItemRequest {
    /// Name of the item being deposited.
    pub name: String,
}

/// Body of `PUT /api/items/{id}/location`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLocationRequest {
    /// The new free-text location label.
    pub location: String,
}

/// Body of `POST /api/rooms`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoomRequest {
    /// Room name.
    pub name: String,
}

/// Body of `POST /api/furniture`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFurnitureRequest {
    /// The room the furniture stands in.
    pub room_id: RoomId,
    /// Furniture name.
    pub name: String,
}

/// Body of `POST /api/storage-cells`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCellRequest {
    /// The room to allocate in.
    pub room_id: RoomId,
    /// The furniture piece to allocate in.
    pub furniture_id: FurnitureId,
}

/// Query parameters of `GET /api/storage-cells`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListCellsQuery {
    /// Room filter.
    pub room_id: RoomId,
    /// Furniture filter.
    pub furniture_id: FurnitureId,
}

/// Body of `POST /api/pairing/scan`: either an already-decoded payload
/// (client-side scanner) or a base64 image to decode here.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanRequest {
    /// The decoded label payload.
    #[serde(default)]
    pub payload: Option<LabelPayload>,
    /// A base64-encoded scan image, decoded server-side.
    #[serde(default)]
    pub image_base64: Option<String>,
}
