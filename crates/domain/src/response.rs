//! Decoded response container

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::decode::{DecodeStrategy, decode_blocks};
use crate::record::{Block, RecordView};
use crate::status::StatusLine;

/// One decoded service response: status, blocks, and the raw body.
///
/// Immutable after construction. Decoding never fails: malformed input is
/// normalized into a well-formed response with an error status and zero
/// blocks, so callers branch on [`Response::status_int`] instead of a
/// second error channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Resolved status, embedded-service view when available.
    pub status: StatusLine,
    /// Decoded blocks in wire order; block 0 is the primary record.
    pub blocks: Vec<Block>,
    /// Raw response body as received.
    pub body: String,
}

impl Response {
    /// Decodes a raw body into a response.
    ///
    /// The embedded status line is authoritative when present: RT reports
    /// its own status in the body and that may differ from the transport's
    /// HTTP status (`http_status`/`http_reason`, kept for logging only).
    /// A body with no recognizable status line decodes as status 500 with
    /// the whole body as status text.
    #[must_use]
    pub fn decode(http_status: u16, http_reason: &str, body: &str) -> Self {
        log::debug!("HTTP_STATUS: {http_status} {http_reason}");
        let (status, remainder) = match body.lines().next().and_then(StatusLine::parse) {
            Some(status) => {
                let remainder = body.split_once('\n').map_or("", |(_, rest)| rest);
                (status, remainder)
            }
            None => {
                log::error!("{body:?} is not valid");
                (StatusLine::new(500, body), body)
            }
        };

        let (status, blocks) = match decode_blocks(remainder, DecodeStrategy::for_status(status.code))
        {
            Ok(blocks) => (status, blocks),
            Err(e) => (StatusLine::new(e.code, e.message), Vec::new()),
        };
        log::debug!("RESOURCE_STATUS: {status}");

        Self {
            status,
            blocks,
            body: body.to_string(),
        }
    }

    /// Resolved status code, for uniform branching on success/failure.
    #[must_use]
    pub const fn status_int(&self) -> u16 {
        self.status.code
    }

    /// Returns block 0 as a map, or an empty map when nothing decoded.
    #[must_use]
    pub fn as_dict(&self) -> HashMap<String, String> {
        self.blocks.first().map(Block::to_map).unwrap_or_default()
    }

    /// Returns a read-only view over the block at `index`.
    #[must_use]
    pub fn record(&self, index: usize) -> Option<RecordView<'_>> {
        self.blocks.get(index).map(RecordView::new)
    }
}
