//! Item deposit, lookup, and label handlers.

use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use homestash_core::types::id::ItemId;

use crate::dto::request::{DepositItemRequest, UpdateLocationRequest};
use crate::dto::response::LabeledItem;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::handlers::png_response;
use crate::state::AppState;

/// POST /api/items. Deposits an item and hands back its printable label.
pub async fn deposit_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<DepositItemRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let item = state.item_service.deposit(&auth, &req.name).await?;
    let label = state.label_service.render_item(&item)?;
    let data = LabeledItem {
        item,
        label_png_base64: BASE64.encode(label),
    };
    Ok(Json(serde_json::json!({ "success": true, "data": data })))
}

/// GET /api/items
pub async fn list_items(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let items = state.item_service.list(&auth).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": items })))
}

/// GET /api/items/{id}
pub async fn get_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ItemId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let item = state.item_service.get(&auth, id).await?;
    let storage_cells = state.item_service.storage_cells(&auth, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "data": { "item": item, "storage_cells": storage_cells }
    })))
}

/// PUT /api/items/{id}/location. Direct user edit of the location label.
pub async fn update_location(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ItemId>,
    Json(req): Json<UpdateLocationRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .item_service
        .update_location(&auth, id, &req.location)
        .await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// DELETE /api/items/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ItemId>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.item_service.delete(&auth, id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// GET /api/items/{id}/label. Re-renders the item's QR label.
pub async fn item_label(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ItemId>,
) -> Result<Response, ApiError> {
    let item = state.item_service.get(&auth, id).await?;
    let png = state.label_service.render_item(&item)?;
    Ok(png_response(png))
}
