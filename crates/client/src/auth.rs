//! Authenticator strategies
//!
//! RT deployments expose three ways in: no authentication at all, HTTP
//! basic credentials on every request, and a cookie session established by
//! a one-time form login. All three share the same capability set of
//! [`Authenticator::login`] and [`Authenticator::open`], so the
//! [`crate::Resource`] layer never cares which one it holds.

use std::sync::{Mutex, PoisonError};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use thiserror::Error;
use url::Url;

use crate::adapters::ReqwestTransport;
use crate::transport::{Method, RawResponse, Request, Transport, TransportError};

/// Login handshake failure at the transport level.
///
/// There are no authenticator-specific failure kinds beyond "transport
/// failed during login"; an unsuccessful HTTP status is not a login error
/// (see [`CookieAuthenticator::login`]).
#[derive(Debug, Error)]
#[error("login handshake failed: {0}")]
pub struct AuthError(#[from] pub TransportError);

/// Capability set shared by all authenticator variants.
pub trait Authenticator: Send + Sync {
    /// Establishes session state against `session_uri` if the variant
    /// needs any. Idempotent: per authenticator instance the handshake
    /// happens at most once.
    ///
    /// # Errors
    ///
    /// Fails only when the transport fails during the handshake.
    fn login(&self, session_uri: &Url) -> Result<(), AuthError>;

    /// Submits a request over the transport, applying the variant's
    /// credentials.
    ///
    /// # Errors
    ///
    /// Propagates transport failures unchanged.
    fn open(&self, request: Request) -> Result<RawResponse, TransportError>;
}

/// No authentication; requests are forwarded untouched.
pub struct AnonymousAuthenticator<T = ReqwestTransport> {
    transport: T,
}

impl AnonymousAuthenticator<ReqwestTransport> {
    /// Creates an anonymous authenticator over a default transport.
    ///
    /// # Errors
    ///
    /// Fails if the transport cannot be created.
    pub fn new() -> Result<Self, TransportError> {
        Ok(Self {
            transport: ReqwestTransport::new()?,
        })
    }
}

impl<T: Transport> AnonymousAuthenticator<T> {
    /// Creates an anonymous authenticator over a custom transport.
    #[must_use]
    pub const fn with_transport(transport: T) -> Self {
        Self { transport }
    }
}

impl<T: Transport> Authenticator for AnonymousAuthenticator<T> {
    fn login(&self, _session_uri: &Url) -> Result<(), AuthError> {
        Ok(())
    }

    fn open(&self, request: Request) -> Result<RawResponse, TransportError> {
        self.transport.execute(&request)
    }
}

/// HTTP basic authentication.
///
/// The `Authorization` header is computed once at construction and
/// injected on every call; there is no session state.
pub struct BasicAuthenticator<T = ReqwestTransport> {
    transport: T,
    auth_header: String,
}

impl BasicAuthenticator<ReqwestTransport> {
    /// Creates a basic authenticator over a default transport.
    ///
    /// # Errors
    ///
    /// Fails if the transport cannot be created.
    pub fn new(username: &str, password: &str) -> Result<Self, TransportError> {
        Ok(Self::with_transport(
            ReqwestTransport::new()?,
            username,
            password,
        ))
    }
}

impl<T: Transport> BasicAuthenticator<T> {
    /// Creates a basic authenticator over a custom transport.
    #[must_use]
    pub fn with_transport(transport: T, username: &str, password: &str) -> Self {
        let credentials = BASE64.encode(format!("{username}:{password}"));
        Self {
            transport,
            auth_header: format!("Basic {credentials}"),
        }
    }
}

impl<T: Transport> Authenticator for BasicAuthenticator<T> {
    fn login(&self, _session_uri: &Url) -> Result<(), AuthError> {
        Ok(())
    }

    fn open(&self, mut request: Request) -> Result<RawResponse, TransportError> {
        request
            .headers
            .insert("Authorization".to_string(), self.auth_header.clone());
        self.transport.execute(&request)
    }
}

/// Cookie-session authentication.
///
/// The first [`login`](Authenticator::login) POSTs form-encoded `user`/
/// `pass` credentials to the session URI; the service answers with a
/// session cookie that the transport's cookie jar replays on every
/// subsequent call. Use a cookie-capable transport
/// ([`ReqwestTransport::with_cookies`]) or the session will not stick.
pub struct CookieAuthenticator<T = ReqwestTransport> {
    transport: T,
    username: String,
    password: String,
    logged_in: Mutex<bool>,
}

impl CookieAuthenticator<ReqwestTransport> {
    /// Creates a cookie-session authenticator over a cookie-jar transport.
    ///
    /// # Errors
    ///
    /// Fails if the transport cannot be created.
    pub fn new(username: &str, password: &str) -> Result<Self, TransportError> {
        Ok(Self::with_transport(
            ReqwestTransport::with_cookies()?,
            username,
            password,
        ))
    }
}

impl<T: Transport> CookieAuthenticator<T> {
    /// Creates a cookie-session authenticator over a custom transport.
    ///
    /// The transport must persist cookies across calls for the session to
    /// survive past the handshake.
    #[must_use]
    pub fn with_transport(transport: T, username: &str, password: &str) -> Self {
        Self {
            transport,
            username: username.to_string(),
            password: password.to_string(),
            logged_in: Mutex::new(false),
        }
    }
}

impl<T: Transport> Authenticator for CookieAuthenticator<T> {
    /// Performs the one-time login handshake.
    ///
    /// The HTTP status of the handshake is deliberately not checked: the
    /// upstream service's login semantics are optimistic, and a rejected
    /// login surfaces on the first authenticated call instead. Only a
    /// transport-level failure keeps the authenticator unlogged.
    fn login(&self, session_uri: &Url) -> Result<(), AuthError> {
        let mut logged_in = self
            .logged_in
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if *logged_in {
            return Ok(());
        }

        let body =
            serde_urlencoded::to_string([("user", &self.username), ("pass", &self.password)])
                .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        let mut request = Request::new(Method::Post, session_uri.clone());
        request.headers.insert(
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        );
        request.body = Some(body);

        // Straight through the transport, not through open(): the
        // handshake must not carry whatever open() would inject.
        self.transport.execute(&request)?;
        *logged_in = true;
        Ok(())
    }

    fn open(&self, request: Request) -> Result<RawResponse, TransportError> {
        // The session cookie rides in the transport's cookie jar.
        self.transport.execute(&request)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    /// Transport double that records every request and answers 200.
    struct RecordingTransport {
        requests: Mutex<Vec<Request>>,
    }

    impl RecordingTransport {
        fn new() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<Request> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Transport for RecordingTransport {
        fn execute(&self, request: &Request) -> Result<RawResponse, TransportError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(RawResponse {
                status: 200,
                reason: "OK".to_string(),
                headers: HashMap::new(),
                body: "RT/4.0.0 200 Ok\n".to_string(),
            })
        }
    }

    /// Transport double that always fails.
    struct FailingTransport;

    impl Transport for FailingTransport {
        fn execute(&self, _request: &Request) -> Result<RawResponse, TransportError> {
            Err(TransportError::Connection("refused".to_string()))
        }
    }

    fn rt_url() -> Url {
        Url::parse("http://rt.example.com/REST/1.0/").unwrap()
    }

    #[test]
    fn anonymous_forwards_requests_untouched() {
        let auth = AnonymousAuthenticator::with_transport(RecordingTransport::new());
        auth.login(&rt_url()).unwrap();
        auth.open(Request::new(Method::Get, rt_url())).unwrap();

        let requests = auth.transport.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.is_empty());
    }

    #[test]
    fn basic_injects_precomputed_authorization_header() {
        let auth =
            BasicAuthenticator::with_transport(RecordingTransport::new(), "user", "pass");
        auth.open(Request::new(Method::Get, rt_url())).unwrap();

        let requests = auth.transport.requests();
        // "user:pass" base64 encoded is "dXNlcjpwYXNz"
        assert_eq!(
            requests[0].headers.get("Authorization").map(String::as_str),
            Some("Basic dXNlcjpwYXNz")
        );
    }

    #[test]
    fn cookie_login_posts_credentials_once() {
        let auth = CookieAuthenticator::with_transport(
            RecordingTransport::new(),
            "webmaster",
            "secret",
        );
        auth.login(&rt_url()).unwrap();
        auth.login(&rt_url()).unwrap();

        let requests = auth.transport.requests();
        assert_eq!(requests.len(), 1, "login must handshake exactly once");
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(
            requests[0].body.as_deref(),
            Some("user=webmaster&pass=secret")
        );
        assert_eq!(
            requests[0].headers.get("Content-Type").map(String::as_str),
            Some("application/x-www-form-urlencoded")
        );
    }

    #[test]
    fn failed_handshake_leaves_the_flag_unset() {
        let auth = CookieAuthenticator::with_transport(FailingTransport, "u", "p");
        assert!(auth.login(&rt_url()).is_err());
        assert!(!*auth.logged_in.lock().unwrap());
    }

    #[test]
    fn credentials_are_form_escaped() {
        let auth = CookieAuthenticator::with_transport(
            RecordingTransport::new(),
            "web master",
            "p&ss=word",
        );
        auth.login(&rt_url()).unwrap();

        let requests = auth.transport.requests();
        assert_eq!(
            requests[0].body.as_deref(),
            Some("user=web+master&pass=p%26ss%3Dword")
        );
    }
}
