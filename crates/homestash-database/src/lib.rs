//! # homestash-database
//!
//! PostgreSQL pool management, embedded migrations, repository
//! implementations, and the sqlx-backed [`InventoryGateway`].
//!
//! [`InventoryGateway`]: homestash_core::traits::gateway::InventoryGateway

pub mod connection;
pub mod gateway;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use gateway::PgInventoryGateway;
