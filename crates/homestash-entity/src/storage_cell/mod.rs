//! Storage cell entity.

pub mod model;

pub use model::{compose_display_name, StorageCell};
