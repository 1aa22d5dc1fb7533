//! Route definitions for the HomeStash HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The
//! router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(item_routes())
        .merge(storage_routes())
        .merge(pairing_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Item deposit, lookup, labels
fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/items", post(handlers::item::deposit_item))
        .route("/items", get(handlers::item::list_items))
        .route("/items/{id}", get(handlers::item::get_item))
        .route("/items/{id}", delete(handlers::item::delete_item))
        .route(
            "/items/{id}/location",
            put(handlers::item::update_location),
        )
        .route("/items/{id}/label", get(handlers::item::item_label))
}

/// Rooms, furniture, and storage cell allocation
fn storage_routes() -> Router<AppState> {
    Router::new()
        .route("/rooms", post(handlers::storage::create_room))
        .route("/rooms", get(handlers::storage::list_rooms))
        .route(
            "/rooms/{id}/furniture",
            get(handlers::storage::list_furniture),
        )
        .route("/furniture", post(handlers::storage::create_furniture))
        .route("/storage-cells", post(handlers::storage::create_cell))
        .route("/storage-cells", get(handlers::storage::list_cells))
        .route("/storage-cells/{id}", get(handlers::storage::get_cell))
        .route(
            "/storage-cells/{id}/label",
            get(handlers::storage::cell_label),
        )
}

/// Scan pairing
fn pairing_routes() -> Router<AppState> {
    Router::new()
        .route("/pairing/scan", post(handlers::pairing::scan))
        .route("/pairing", get(handlers::pairing::status))
        .route("/pairing", delete(handlers::pairing::cancel))
}

/// Health
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
