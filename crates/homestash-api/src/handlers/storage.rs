//! Room, furniture, and storage cell handlers.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use homestash_core::types::id::{RoomId, StorageCellId};

use crate::dto::request::{
    CreateCellRequest, CreateFurnitureRequest, CreateRoomRequest, ListCellsQuery,
};
use crate::dto::response::LabeledCell;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::handlers::png_response;
use crate::state::AppState;

/// POST /api/rooms
pub async fn create_room(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateRoomRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let room = state.storage_service.create_room(&auth, &req.name).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": room })))
}

/// GET /api/rooms
pub async fn list_rooms(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let rooms = state.storage_service.list_rooms(&auth).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": rooms })))
}

/// POST /api/furniture
pub async fn create_furniture(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateFurnitureRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let furniture = state
        .storage_service
        .create_furniture(&auth, req.room_id, &req.name)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": furniture })))
}

/// GET /api/rooms/{id}/furniture
pub async fn list_furniture(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(room_id): Path<RoomId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let furniture = state.storage_service.list_furniture(&auth, room_id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": furniture })))
}

/// POST /api/storage-cells. Allocates the next cell in a pair and hands
/// back its printable label.
pub async fn create_cell(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateCellRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let cell = state
        .storage_service
        .allocate_cell(&auth, req.room_id, req.furniture_id)
        .await?;
    let label = state.label_service.render_cell(&cell)?;
    let data = LabeledCell {
        cell,
        label_png_base64: BASE64.encode(label),
    };
    Ok(Json(serde_json::json!({ "success": true, "data": data })))
}

/// GET /api/storage-cells?room_id=&furniture_id=
pub async fn list_cells(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListCellsQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let cells = state
        .storage_service
        .list_cells(&auth, query.room_id, query.furniture_id)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": cells })))
}

/// GET /api/storage-cells/{id}
pub async fn get_cell(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<StorageCellId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let cell = state.storage_service.get_cell(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": cell })))
}

/// GET /api/storage-cells/{id}/label. Re-renders a cell's QR label.
pub async fn cell_label(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<StorageCellId>,
) -> Result<Response, ApiError> {
    let cell = state.storage_service.get_cell(&auth, id).await?;
    let png = state.label_service.render_cell(&cell)?;
    Ok(png_response(png))
}
