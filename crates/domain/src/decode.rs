//! Block decoding strategies for RT response bodies
//!
//! After the embedded status line, a body is a sequence of sections
//! separated by the service's `--` marker line. How a section decodes
//! depends on the resolved status code: conflict responses (409) carry
//! candidate-match comments instead of object fields, everything else
//! carries `Key: Value` records.

use crate::error::DecodeError;
use crate::record::Block;

/// How the body sections of one response are decoded into blocks.
///
/// The status code → strategy mapping is the single decision table for
/// status-dependent decoding; extend it here when the service grows
/// another status-specific format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStrategy {
    /// `Key: Value` records with whitespace-led continuation lines.
    Standard,
    /// Candidate-match entries, one per line (409 conflict bodies).
    Comment,
}

impl DecodeStrategy {
    /// Selects the strategy for a resolved status code.
    #[must_use]
    pub const fn for_status(code: u16) -> Self {
        match code {
            409 => Self::Comment,
            _ => Self::Standard,
        }
    }
}

/// Splits a body into sections and decodes each into a [`Block`].
///
/// Sections producing no pairs are dropped, so a body of free text (or an
/// empty remainder) decodes to zero blocks. Block order follows section
/// order.
///
/// # Errors
///
/// Returns a [`DecodeError`] for a structurally malformed section, which
/// under the standard strategy means a continuation line with no field
/// before it.
pub fn decode_blocks(body: &str, strategy: DecodeStrategy) -> Result<Vec<Block>, DecodeError> {
    let mut blocks = Vec::new();
    for section in sections(body) {
        let block = match strategy {
            DecodeStrategy::Standard => decode_standard(&section)?,
            DecodeStrategy::Comment => decode_comment(&section),
        };
        if !block.is_empty() {
            blocks.push(block);
        }
    }
    Ok(blocks)
}

/// Groups body lines into sections on the `--` separator line.
fn sections(body: &str) -> Vec<Vec<&str>> {
    let mut sections = vec![Vec::new()];
    for line in body.lines() {
        if line.starts_with("--") {
            sections.push(Vec::new());
        } else if let Some(current) = sections.last_mut() {
            current.push(line);
        }
    }
    sections
}

/// Decodes one section of `Key: Value` lines.
///
/// A line with leading whitespace continues the previous value (soft line
/// wrap, joined back with `\n`). Comment lines and lines without a colon
/// are skipped; RT intersperses `# Ticket 28 updated.`-style comments
/// with record data.
fn decode_standard(lines: &[&str]) -> Result<Block, DecodeError> {
    let mut block = Block::new();
    for &line in lines {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with(' ') || line.starts_with('\t') {
            match block.last_value_mut() {
                Some(value) => {
                    value.push('\n');
                    value.push_str(line.trim_start());
                }
                None => {
                    return Err(DecodeError::malformed(format!(
                        "continuation line with no preceding field: {line:?}"
                    )));
                }
            }
            continue;
        }
        if let Some((key, value)) = line.split_once(':') {
            block.push(key.to_string(), value.trim_start().to_string());
        }
    }
    Ok(block)
}

/// Decodes one section of conflict candidates.
///
/// Every non-blank line is one entry. A leading `# ` marker is stripped;
/// `key: value`-shaped lines split on the first `": "`, anything else
/// becomes a key with an empty value.
fn decode_comment(lines: &[&str]) -> Block {
    let mut block = Block::new();
    for &line in lines {
        let line = line.strip_prefix("# ").unwrap_or(line).trim_end();
        if line.is_empty() {
            continue;
        }
        match line.split_once(": ") {
            Some((key, value)) => block.push(key.to_string(), value.to_string()),
            None => block.push(line.to_string(), String::new()),
        }
    }
    block
}
