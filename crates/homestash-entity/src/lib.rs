//! # homestash-entity
//!
//! Domain entity models for HomeStash: items, rooms, furniture, storage
//! cells, and the pairing-session state type. Database row types derive
//! `sqlx::FromRow`; everything serializes with `serde`.

pub mod furniture;
pub mod item;
pub mod pairing;
pub mod room;
pub mod storage_cell;

pub use furniture::Furniture;
pub use item::Item;
pub use pairing::{PairingSnapshot, PairingState, PendingTag, ScanTransition};
pub use room::Room;
pub use storage_cell::StorageCell;
