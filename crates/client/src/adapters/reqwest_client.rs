//! Transport implementation using reqwest's blocking client.
//!
//! This adapter implements the [`Transport`] port over
//! `reqwest::blocking::Client`. Connection handling, TLS, redirects, and
//! timeouts are reqwest's concern; cookie persistence is opt-in for the
//! session authenticator.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::cookie::Jar;

use crate::transport::{Method, RawResponse, Request, Transport, TransportError};

const USER_AGENT: &str = concat!("rtrest/", env!("CARGO_PKG_VERSION"));

/// Blocking transport over reqwest.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with default settings.
    ///
    /// Default configuration:
    /// - Connect timeout: 30 seconds
    /// - Follow redirects: up to 10
    /// - No cookie store
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be created.
    pub fn new() -> Result<Self, TransportError> {
        Self::builder()
            .build()
            .map(|client| Self { client })
            .map_err(|e| TransportError::Other(e.to_string()))
    }

    /// Creates a transport with an in-memory cookie jar.
    ///
    /// Cookies set by the service (the session cookie in particular) are
    /// stored and replayed on every subsequent request automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be created.
    pub fn with_cookies() -> Result<Self, TransportError> {
        Self::builder()
            .cookie_provider(Arc::new(Jar::default()))
            .build()
            .map(|client| Self { client })
            .map_err(|e| TransportError::Other(e.to_string()))
    }

    /// Creates a transport over a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn builder() -> reqwest::blocking::ClientBuilder {
        Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(30))
            .redirect(reqwest::redirect::Policy::limited(10))
    }

    const fn to_reqwest_method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }

    /// Maps reqwest errors to [`TransportError`].
    fn map_error(error: &reqwest::Error) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout;
        }
        if error.is_connect() {
            return TransportError::Connection(error.to_string());
        }
        if error.is_request() || error.is_builder() {
            return TransportError::InvalidRequest(error.to_string());
        }
        TransportError::Other(error.to_string())
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: &Request) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), request.url.clone());

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        // An HTTP error status is a successful exchange here; the body of
        // a 4xx/5xx is a structured payload and must reach the decoder.
        let response = builder.send().map_err(|e| Self::map_error(&e))?;

        let status = response.status().as_u16();
        let reason = response
            .status()
            .canonical_reason()
            .unwrap_or("Unknown")
            .to_string();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
            .collect();
        let body = response
            .text()
            .map_err(|e| TransportError::Other(format!("failed to read body: {e}")))?;

        Ok(RawResponse {
            status,
            reason,
            headers,
            body,
        })
    }
}
