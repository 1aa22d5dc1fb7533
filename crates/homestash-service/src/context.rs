//! Request context carrying the acting user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use homestash_core::types::id::UserId;

/// Context for the current request.
///
/// Extracted at the HTTP boundary and passed into service methods so that
/// every operation knows *who* is acting. Authentication itself happens
/// upstream; by the time a context exists, the identity is trusted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The acting user's ID.
    pub user_id: UserId,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            request_time: Utc::now(),
        }
    }
}
