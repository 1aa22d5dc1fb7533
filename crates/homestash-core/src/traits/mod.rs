//! Trait seams between the business logic and its collaborators.

pub mod gateway;

pub use gateway::{InventoryGateway, TagRef};
