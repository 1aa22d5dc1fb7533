//! # homestash-core
//!
//! Core crate for HomeStash. Contains the persistence gateway trait,
//! configuration schemas, typed identifiers, code formats, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other HomeStash crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
