//! Payload encoding for the service's request body format
//!
//! Outgoing payloads are a [`Block`] rendered as `Key: value` text, with
//! multiline values indented onto continuation lines (the inverse of the
//! decoder's unfolding), wrapped into a single form field named `content`.
//! Attachments and MIME multipart payloads are out of scope.

use std::collections::HashMap;

use rtrest_domain::Block;

use crate::error::ClientError;

/// Encodes a payload into a request body and sets the content headers.
///
/// # Errors
///
/// Returns [`ClientError::Payload`] if the form encoding fails.
pub fn encode(payload: &Block, headers: &mut HashMap<String, String>) -> Result<String, ClientError> {
    let body = serde_urlencoded::to_string([("content", content_text(payload))])
        .map_err(|e| ClientError::Payload(e.to_string()))?;
    headers.insert(
        "Content-Type".to_string(),
        "application/x-www-form-urlencoded".to_string(),
    );
    Ok(body)
}

/// Renders a block as the service's `Key: value` text format.
///
/// Value lines after the first are indented so the decoder folds them back
/// into one multiline value.
fn content_text(payload: &Block) -> String {
    let mut text = String::new();
    for (key, value) in payload.iter() {
        let mut lines = value.lines();
        text.push_str(key);
        text.push_str(": ");
        text.push_str(lines.next().unwrap_or(""));
        text.push('\n');
        for line in lines {
            text.push_str("  ");
            text.push_str(line);
            text.push('\n');
        }
    }
    text
}
