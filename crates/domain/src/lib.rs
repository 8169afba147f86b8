//! rtrest Domain - RT REST 1.0 data model
//!
//! This crate defines the data model and response decoding pipeline for
//! RT's plain-text REST interface. All types here are pure Rust with no
//! I/O dependencies; the HTTP side lives in `rtrest-client`.

pub mod decode;
pub mod error;
pub mod record;
pub mod response;
pub mod status;

pub use decode::{DecodeStrategy, decode_blocks};
pub use error::{DecodeError, DomainError, DomainResult};
pub use record::{Block, RecordView};
pub use response::Response;
pub use status::StatusLine;
