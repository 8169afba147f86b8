//! rtrest Client - blocking HTTP layer for the RT REST 1.0 protocol
//!
//! Builds on [`rtrest_domain`] with the I/O side: a blocking transport
//! port with a reqwest adapter, the three authenticator strategies RT
//! supports (anonymous, HTTP basic, cookie session), form-encoded payload
//! building, and the [`Resource`] entry point that ties one request
//! together.
//!
//! ```no_run
//! use rtrest_client::{CookieAuthenticator, Resource};
//!
//! # fn main() -> Result<(), rtrest_client::ClientError> {
//! let auth = CookieAuthenticator::new("webmaster", "secret")?;
//! let resource = Resource::new("http://rt.example.com/REST/1.0/", auth)?;
//! let response = resource.get("ticket/28", None)?;
//! if response.status_int() == 200 {
//!     let ticket = response.record(0);
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod auth;
pub mod error;
pub mod forms;
pub mod resource;
pub mod transport;

pub use adapters::ReqwestTransport;
pub use auth::{
    AnonymousAuthenticator, AuthError, Authenticator, BasicAuthenticator, CookieAuthenticator,
};
pub use error::ClientError;
pub use resource::Resource;
pub use transport::{Method, RawResponse, Request, Transport, TransportError};

// Re-export the domain types callers handle directly.
pub use rtrest_domain::{Block, DomainError, RecordView, Response, StatusLine};
