//! Room entity.

pub mod model;

pub use model::{lowest_unused_letter, Room, ROOM_LETTERS};
