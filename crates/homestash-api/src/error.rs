//! Maps domain `AppError` to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use homestash_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Newtype carrying an [`AppError`] across the axum boundary.
///
/// Handlers return `Result<_, ApiError>` and use `?` on service calls;
/// the `From` impl does the wrapping.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = match err.kind {
            ErrorKind::NotFound | ErrorKind::EntityNotFound => StatusCode::NOT_FOUND,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::UnreadableLabel | ErrorKind::MalformedPayload => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ErrorKind::Conflict
            | ErrorKind::ExhaustedNamespace
            | ErrorKind::DuplicateCode
            | ErrorKind::StaleSession => StatusCode::CONFLICT,
            ErrorKind::Database
            | ErrorKind::Configuration
            | ErrorKind::Serialization
            | ErrorKind::Internal => {
                tracing::error!(error = %err.message, kind = %err.kind, "Internal server error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ApiErrorResponse {
            error: err.kind.to_string(),
            message: err.message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_kinds_map_to_expected_statuses() {
        let cases = [
            (AppError::entity_not_found("x"), StatusCode::NOT_FOUND),
            (AppError::unreadable_label("x"), StatusCode::UNPROCESSABLE_ENTITY),
            (AppError::malformed_payload("x"), StatusCode::UNPROCESSABLE_ENTITY),
            (AppError::exhausted_namespace("x"), StatusCode::CONFLICT),
            (AppError::duplicate_code("x"), StatusCode::CONFLICT),
            (AppError::stale_session("x"), StatusCode::CONFLICT),
            (AppError::validation("x"), StatusCode::BAD_REQUEST),
        ];
        for (err, expected) in cases {
            let response = ApiError(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }
}
