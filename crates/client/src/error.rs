//! Client error types

use thiserror::Error;

use crate::auth::AuthError;
use crate::transport::TransportError;

/// Failures surfaced by [`crate::Resource`] operations.
///
/// Decode failures are absent on purpose: malformed response bodies are
/// normalized into a well-formed [`rtrest_domain::Response`] with an error
/// status, so callers branch on `status_int` for both transport-delivered
/// errors and parse failures.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The base URL or request path is invalid.
    #[error("invalid URL: {0}")]
    Url(String),

    /// The request payload could not be encoded.
    #[error("invalid payload: {0}")]
    Payload(String),

    /// The login handshake failed at the transport level.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The request failed at the transport level.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
