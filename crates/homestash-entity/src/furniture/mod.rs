//! Furniture entity.

pub mod model;

pub use model::Furniture;
