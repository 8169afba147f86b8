//! Transport port and wire-level types
//!
//! The [`Transport`] trait abstracts the HTTP library behind a blocking
//! request/response seam, so authenticators and tests stay independent of
//! reqwest. The protocol is strictly request/response; nothing here is
//! async.

use std::collections::HashMap;

use thiserror::Error;
use url::Url;

/// HTTP methods the protocol consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Read a resource.
    Get,
    /// Submit an encoded payload.
    Post,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// One outgoing request, fully built before it reaches the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// Absolute request URL.
    pub url: Url,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Encoded request body, for POSTs.
    pub body: Option<String>,
}

impl Request {
    /// Creates a bodyless request with no headers.
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HashMap::new(),
            body: None,
        }
    }
}

/// Transport-level result of one exchange, read-only once received.
///
/// HTTP error statuses (4xx/5xx) are carried here like any other status:
/// the service's 409 and 500 bodies are structured payloads in their own
/// right and flow into decoding unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// HTTP reason phrase.
    pub reason: String,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body text.
    pub body: String,
}

/// Port for performing one blocking HTTP exchange.
pub trait Transport: Send + Sync {
    /// Executes a request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Fails only on transport-level problems (connection, timeout, TLS);
    /// an HTTP error status is a successful exchange.
    fn execute(&self, request: &Request) -> Result<RawResponse, TransportError>;
}

/// Network-level failure; never recovered locally, always surfaced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request timed out.
    #[error("request timed out")]
    Timeout,

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The request could not be built or sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Any other transport failure.
    #[error("transport error: {0}")]
    Other(String),
}
