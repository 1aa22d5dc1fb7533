//! Shared application state threaded through every handler.

use std::sync::Arc;

use homestash_core::config::AppConfig;
use homestash_database::DatabasePool;
use homestash_service::item::ItemService;
use homestash_service::label::LabelService;
use homestash_service::pairing::PairingService;
use homestash_service::storage::StorageService;

/// Application state available via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration.
    pub config: Arc<AppConfig>,
    /// Database pool (for health checks).
    pub db: DatabasePool,
    /// Item deposit and CRUD.
    pub item_service: Arc<ItemService>,
    /// Rooms, furniture, and cell allocation.
    pub storage_service: Arc<StorageService>,
    /// Scan pairing.
    pub pairing_service: Arc<PairingService>,
    /// Label rendering and decoding.
    pub label_service: Arc<LabelService>,
}
