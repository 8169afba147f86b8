//! Domain error types

use thiserror::Error;

/// Domain-level errors surfaced to callers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A record field lookup missed.
    #[error("field not found: {0}")]
    FieldNotFound(String),
}

/// A structured failure while decoding a response body segment.
///
/// Decode errors are never surfaced to callers: [`crate::Response::decode`]
/// recovers by substituting the error's own code and message as the
/// response status, alongside an empty block list.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{code} {message}")]
pub struct DecodeError {
    /// Status code reported in place of the response status.
    pub code: u16,
    /// Human-readable description of the malformed segment.
    pub message: String,
}

impl DecodeError {
    /// Creates a decode error for a malformed body segment.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            code: 500,
            message: message.into(),
        }
    }
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
