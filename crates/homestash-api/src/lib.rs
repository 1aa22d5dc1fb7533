//! # homestash-api
//!
//! The HTTP boundary: axum router, handlers, DTOs, the identity
//! extractor, and the mapping from domain errors to HTTP responses.
//! Authentication happens upstream; this crate only trusts the identity
//! the proxy asserts.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use state::AppState;
