//! `AuthUser` extractor: reads the identity asserted by the upstream
//! auth proxy and injects a request context.
//!
//! Authentication and session login are external collaborators; by the
//! time a request reaches this service, the proxy has already verified
//! the user and stamped `x-user-id`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use homestash_core::error::AppError;
use homestash_core::types::id::UserId;
use homestash_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted request context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing x-user-id header"))?;

        let user_id: UserId = header
            .parse()
            .map_err(|_| AppError::unauthorized("x-user-id is not a valid UUID"))?;

        Ok(AuthUser(RequestContext::new(user_id)))
    }
}
