//! HTTP handlers, organized by domain.

pub mod health;
pub mod item;
pub mod pairing;
pub mod storage;

use axum::http::header;
use axum::response::{IntoResponse, Response};

/// Serve PNG bytes with the right content type.
pub(crate) fn png_response(bytes: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, "image/png")], bytes).into_response()
}
