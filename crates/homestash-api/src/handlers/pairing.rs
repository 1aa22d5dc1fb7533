//! Pairing handlers: scan, status, cancel.

use axum::extract::State;
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use homestash_core::error::AppError;
use homestash_label::LabelPayload;

use crate::dto::request::ScanRequest;
use crate::dto::response::ScanResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/pairing/scan. Feeds one scan into the session, as either a
/// decoded payload or a base64 image decoded server-side.
pub async fn scan(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ScanRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let payload = resolve_payload(&state, req)?;
    let outcome = state.pairing_service.scan(&auth, &payload).await?;
    let response = ScanResponse::from(outcome);
    Ok(Json(serde_json::json!({ "success": true, "data": response })))
}

/// GET /api/pairing. Reports the current session state.
pub async fn status(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let snapshot = state.pairing_service.status(&auth);
    Ok(Json(serde_json::json!({ "success": true, "data": snapshot })))
}

/// DELETE /api/pairing. Cancels the session. Idempotent.
pub async fn cancel(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.pairing_service.cancel(&auth);
    Ok(Json(serde_json::json!({ "success": true })))
}

fn resolve_payload(state: &AppState, req: ScanRequest) -> Result<LabelPayload, ApiError> {
    if let Some(payload) = req.payload {
        return Ok(payload);
    }
    let image = req.image_base64.ok_or_else(|| {
        AppError::validation("Scan request needs either a payload or an image")
    })?;
    let bytes = BASE64
        .decode(image.as_bytes())
        .map_err(|e| AppError::validation(format!("image_base64 is not valid base64: {e}")))?;
    Ok(state.label_service.decode(&bytes)?)
}
