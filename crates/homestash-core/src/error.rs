//! Unified application error types for HomeStash.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. The domain taxonomy (namespace
//! exhaustion, allocation collisions, scan failures, stale pairing
//! sessions) lives beside the transport categories so that no layer has
//! to invent a second error enum.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// The request carried no usable identity.
    Unauthorized,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate entry, concurrent modification, etc.).
    Conflict,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal server error occurred.
    Internal,
    /// All 26 room letters are already assigned for this user.
    ExhaustedNamespace,
    /// Code allocation collided after retries were exhausted. The whole
    /// operation is safe to retry.
    DuplicateCode,
    /// A scanned code does not resolve to a record owned by this user.
    EntityNotFound,
    /// No QR symbol could be located in the scanned image.
    UnreadableLabel,
    /// A QR symbol decoded but did not parse as a label payload.
    MalformedPayload,
    /// A concurrent pairing-session mutation was detected; the session
    /// has been reset and pairing must be restarted.
    StaleSession,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Unauthorized => write!(f, "UNAUTHORIZED"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::ExhaustedNamespace => write!(f, "EXHAUSTED_NAMESPACE"),
            Self::DuplicateCode => write!(f, "DUPLICATE_CODE"),
            Self::EntityNotFound => write!(f, "ENTITY_NOT_FOUND"),
            Self::UnreadableLabel => write!(f, "UNREADABLE_LABEL"),
            Self::MalformedPayload => write!(f, "MALFORMED_PAYLOAD"),
            Self::StaleSession => write!(f, "STALE_SESSION"),
        }
    }
}

/// The unified application error used throughout HomeStash.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary. Errors are surfaced to the caller as
/// typed values, never swallowed or substituted with defaults.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create an exhausted-namespace error (all 26 room letters taken).
    pub fn exhausted_namespace(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExhaustedNamespace, message)
    }

    /// Create a duplicate-code error (allocation collided after retries).
    pub fn duplicate_code(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateCode, message)
    }

    /// Create an entity-not-found error (scanned code unresolved for user).
    pub fn entity_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EntityNotFound, message)
    }

    /// Create an unreadable-label error (no QR symbol found).
    pub fn unreadable_label(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnreadableLabel, message)
    }

    /// Create a malformed-payload error (symbol decoded, payload did not parse).
    pub fn malformed_payload(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedPayload, message)
    }

    /// Create a stale-session error (concurrent pairing mutation detected).
    pub fn stale_session(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::StaleSession, message)
    }

    /// Whether this error is one the user can recover from by rescanning
    /// or restarting the pairing flow.
    pub fn is_recoverable_scan_failure(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::EntityNotFound
                | ErrorKind::UnreadableLabel
                | ErrorKind::MalformedPayload
                | ErrorKind::StaleSession
        )
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Internal, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        let err = AppError::exhausted_namespace("all 26 letters assigned");
        assert_eq!(err.to_string(), "EXHAUSTED_NAMESPACE: all 26 letters assigned");
    }

    #[test]
    fn recoverable_scan_failures() {
        assert!(AppError::entity_not_found("x").is_recoverable_scan_failure());
        assert!(AppError::stale_session("x").is_recoverable_scan_failure());
        assert!(!AppError::duplicate_code("x").is_recoverable_scan_failure());
    }
}
