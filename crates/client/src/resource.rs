//! REST resource entry point
//!
//! [`Resource`] orchestrates one request end to end: default headers,
//! payload encoding, the authenticator's login/open pair, and decoding of
//! whatever comes back. It never inspects the parsed content itself.

use std::collections::HashMap;

use rtrest_domain::{Block, Response};
use url::Url;

use crate::auth::Authenticator;
use crate::error::ClientError;
use crate::forms;
use crate::transport::{Method, Request};

/// One REST endpoint plus the authenticator used against it.
///
/// The authenticator is injected once at construction, not created per
/// call, so its session state spans every request made through this
/// resource.
pub struct Resource<A> {
    base_url: Url,
    auth: A,
}

impl<A: Authenticator> Resource<A> {
    /// Creates a resource rooted at `url`.
    ///
    /// The URL should end with a trailing slash so request paths resolve
    /// underneath it, e.g. `http://rt.example.com/REST/1.0/`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Url`] if `url` does not parse.
    pub fn new(url: &str, auth: A) -> Result<Self, ClientError> {
        let base_url = Url::parse(url).map_err(|e| ClientError::Url(format!("{e}: {url}")))?;
        Ok(Self { base_url, auth })
    }

    /// Base URL this resource is rooted at.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GETs `path` relative to the base URL.
    ///
    /// # Errors
    ///
    /// Propagates URL, login, and transport failures; see
    /// [`request`](Self::request).
    pub fn get(
        &self,
        path: &str,
        headers: Option<HashMap<String, String>>,
    ) -> Result<Response, ClientError> {
        self.request(Method::Get, path, None, headers)
    }

    /// POSTs an encoded `payload` to `path` relative to the base URL.
    ///
    /// # Errors
    ///
    /// Propagates URL, payload-encoding, login, and transport failures;
    /// see [`request`](Self::request).
    pub fn post(
        &self,
        path: &str,
        payload: Option<&Block>,
        headers: Option<HashMap<String, String>>,
    ) -> Result<Response, ClientError> {
        self.request(Method::Post, path, payload, headers)
    }

    /// Performs one request and decodes the result.
    ///
    /// `Accept: text/plain` is applied unless the caller supplies their
    /// own. Login is requested on every call; idempotency is the
    /// authenticator's contract, not tracked here. An HTTP error status is
    /// not a failure at this layer: the service's 409 and 500 bodies are
    /// structured payloads and decode exactly like a 200.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Url`] for an unresolvable path,
    /// [`ClientError::Payload`] if encoding fails, and
    /// [`ClientError::Auth`]/[`ClientError::Transport`] for network-level
    /// failures. Malformed response bodies are not errors; they decode to
    /// a response with a synthetic error status.
    pub fn request(
        &self,
        method: Method,
        path: &str,
        payload: Option<&Block>,
        headers: Option<HashMap<String, String>>,
    ) -> Result<Response, ClientError> {
        let mut headers = headers.unwrap_or_default();
        headers
            .entry("Accept".to_string())
            .or_insert_with(|| "text/plain".to_string());

        let body = match payload {
            Some(payload) => Some(forms::encode(payload, &mut headers)?),
            None => None,
        };

        let url = self
            .base_url
            .join(path)
            .map_err(|e| ClientError::Url(format!("{e}: {path}")))?;

        log::debug!("{method} {path}");
        log::debug!("{headers:?}");
        log::debug!("{body:?}");

        self.auth.login(&self.base_url)?;

        let mut request = Request::new(method, url);
        request.headers = headers;
        request.body = body;
        let raw = self.auth.open(request)?;

        Ok(Response::decode(raw.status, &raw.reason, &raw.body))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::auth::AnonymousAuthenticator;
    use crate::transport::{RawResponse, Transport, TransportError};

    type Sent = Arc<Mutex<Vec<Request>>>;

    /// Transport double answering a canned body and recording requests.
    struct ScriptedTransport {
        status: u16,
        body: &'static str,
        requests: Sent,
    }

    impl Transport for ScriptedTransport {
        fn execute(&self, request: &Request) -> Result<RawResponse, TransportError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(RawResponse {
                status: self.status,
                reason: "scripted".to_string(),
                headers: HashMap::new(),
                body: self.body.to_string(),
            })
        }
    }

    fn resource(
        status: u16,
        body: &'static str,
    ) -> (Resource<AnonymousAuthenticator<ScriptedTransport>>, Sent) {
        let requests = Sent::default();
        let transport = ScriptedTransport {
            status,
            body,
            requests: Arc::clone(&requests),
        };
        let auth = AnonymousAuthenticator::with_transport(transport);
        (
            Resource::new("http://rt.example.com/REST/1.0/", auth).unwrap(),
            requests,
        )
    }

    #[test]
    fn get_applies_default_accept_header() {
        let (resource, sent) = resource(200, "RT/4.0.0 200 Ok\n");
        resource.get("ticket/28", None).unwrap();

        let requests = sent.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Get);
        assert_eq!(
            requests[0].url.as_str(),
            "http://rt.example.com/REST/1.0/ticket/28"
        );
        assert_eq!(
            requests[0].headers.get("Accept").map(String::as_str),
            Some("text/plain")
        );
    }

    #[test]
    fn caller_headers_override_the_default_accept() {
        let (resource, sent) = resource(200, "RT/4.0.0 200 Ok\n");
        let headers = HashMap::from([("Accept".to_string(), "application/json".to_string())]);
        resource.get("ticket/28", Some(headers)).unwrap();

        let requests = sent.lock().unwrap();
        assert_eq!(
            requests[0].headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn post_encodes_payload_and_sets_content_type() {
        let (resource, sent) = resource(200, "RT/4.0.0 200 Ok\n\n# Ticket 29 created.\n");
        let payload = Block::from_iter([("Queue", "General"), ("Subject", "new ticket")]);
        resource.post("ticket/new", Some(&payload), None).unwrap();

        let requests = sent.lock().unwrap();
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(
            requests[0].headers.get("Content-Type").map(String::as_str),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(
            requests[0].body.as_deref(),
            Some("content=Queue%3A+General%0ASubject%3A+new+ticket%0A")
        );
    }

    #[test]
    fn http_error_statuses_still_decode() {
        // Transport-level 500 whose body carries the service's own status.
        let (resource, _sent) = resource(500, "RT/4.0.0 401 Credentials required\n");
        let response = resource.get("ticket/28", None).unwrap();
        assert_eq!(response.status_int(), 401);
        assert_eq!(response.status.text, "Credentials required");
    }

    #[test]
    fn unresolvable_path_is_a_url_error() {
        let (base, _sent) = resource(200, "");
        let Resource { auth, .. } = base;
        let resource = Resource::new("mailto:someone@example.com", auth).unwrap();
        let err = resource.get("ticket/28", None).unwrap_err();
        assert!(matches!(err, ClientError::Url(_)));
    }

    #[test]
    fn bad_base_url_is_rejected_at_construction() {
        let (base, _sent) = resource(200, "");
        let Resource { auth, .. } = base;
        assert!(matches!(
            Resource::new("not a url", auth),
            Err(ClientError::Url(_))
        ));
    }
}
