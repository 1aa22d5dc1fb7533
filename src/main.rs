//! HomeStash server: household inventory with QR labels.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

use homestash_core::config::AppConfig;
use homestash_core::error::AppError;
use homestash_core::traits::gateway::InventoryGateway;

#[tokio::main]
async fn main() {
    let env = std::env::var("HOMESTASH_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting HomeStash v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let db = homestash_database::DatabasePool::connect(&config.database).await?;
    homestash_database::migration::run_migrations(db.pool()).await?;

    // ── Repositories ─────────────────────────────────────────────
    let item_repo = Arc::new(homestash_database::repositories::ItemRepository::new(
        db.pool().clone(),
    ));
    let room_repo = Arc::new(homestash_database::repositories::RoomRepository::new(
        db.pool().clone(),
    ));
    let furniture_repo = Arc::new(homestash_database::repositories::FurnitureRepository::new(
        db.pool().clone(),
    ));
    let cell_repo = Arc::new(homestash_database::repositories::StorageCellRepository::new(
        db.pool().clone(),
    ));
    let gateway: Arc<dyn InventoryGateway> =
        Arc::new(homestash_database::PgInventoryGateway::new(db.pool().clone()));

    // ── Services ─────────────────────────────────────────────────
    let item_allocator = Arc::new(homestash_service::allocator::ItemCodeAllocator::new(
        Arc::clone(&gateway),
        &config.allocator,
    ));
    let cell_allocator = Arc::new(homestash_service::allocator::StorageCodeAllocator::new(
        Arc::clone(&cell_repo),
    ));
    let item_service = Arc::new(homestash_service::item::ItemService::new(
        Arc::clone(&item_repo),
        item_allocator,
    ));
    let storage_service = Arc::new(homestash_service::storage::StorageService::new(
        room_repo,
        furniture_repo,
        Arc::clone(&cell_repo),
        cell_allocator,
    ));
    let label_service = Arc::new(homestash_service::label::LabelService::new(&config.label)?);

    let pairing_store = Arc::new(homestash_service::pairing::PairingStore::new(
        Duration::from_secs(config.pairing.ttl_seconds),
    ));
    let pairing_service = Arc::new(homestash_service::pairing::PairingService::new(
        Arc::clone(&gateway),
        Arc::clone(&pairing_store),
    ));

    // ── Abandoned-session sweeper ────────────────────────────────
    let sweeper_store = Arc::clone(&pairing_store);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(60));
        loop {
            ticker.tick().await;
            sweeper_store.sweep();
        }
    });

    // ── HTTP server ──────────────────────────────────────────────
    let state = homestash_api::AppState {
        config: Arc::new(config.clone()),
        db: db.clone(),
        item_service,
        storage_service,
        pairing_service,
        label_service,
    };

    let app = homestash_api::router::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("HomeStash server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db.close().await;
    tracing::info!("HomeStash server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
