//! Rooms, furniture, and storage cells.

pub mod service;

pub use service::StorageService;
