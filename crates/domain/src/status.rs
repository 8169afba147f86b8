//! Status line embedded in RT response bodies
//!
//! RT answers every request with an HTTP-like status line of its own as
//! the first body line, e.g. `RT/4.0.0 200 Ok`. That embedded status is
//! authoritative over the transport's HTTP status, which RT keeps at 200
//! even for application-level failures.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static STATUS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<proto>[A-Za-z]+/[0-9][0-9.]*)\s+(?P<code>\d{3})\s+(?P<text>.+?)\s*$")
        .expect("valid regex")
});

/// Decoded status code and text of one response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLine {
    /// Numeric status code (3-digit for well-formed responses).
    pub code: u16,
    /// Status text, or the whole raw body for unparseable responses.
    pub text: String,
}

impl StatusLine {
    /// Creates a status line from parts.
    #[must_use]
    pub fn new(code: u16, text: impl Into<String>) -> Self {
        Self {
            code,
            text: text.into(),
        }
    }

    /// Parses the service's embedded status line, e.g. `RT/4.0.0 200 Ok`.
    ///
    /// Returns `None` when the line does not match the
    /// `<token>/<version> <code> <text>` shape; the caller decides how to
    /// fall back.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let caps = STATUS_LINE.captures(line)?;
        let code = caps.name("code")?.as_str().parse().ok()?;
        Some(Self {
            code,
            text: caps.name("text")?.as_str().to_string(),
        })
    }
}

impl std::fmt::Display for StatusLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code, self.text)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_embedded_status_line() {
        let status = StatusLine::parse("RT/4.0.0 200 Ok").unwrap();
        assert_eq!(status.code, 200);
        assert_eq!(status.text, "Ok");
    }

    #[test]
    fn parses_multi_word_status_text() {
        let status = StatusLine::parse("RT/3.8.10 401 Credentials required").unwrap();
        assert_eq!(status.code, 401);
        assert_eq!(status.text, "Credentials required");
    }

    #[test]
    fn trailing_whitespace_is_stripped() {
        let status = StatusLine::parse("RT/4.0.0 200 Ok\r").unwrap();
        assert_eq!(status.text, "Ok");
    }

    #[test]
    fn rejects_lines_without_protocol_token() {
        assert_eq!(StatusLine::parse("not a valid response"), None);
        assert_eq!(StatusLine::parse("200 Ok"), None);
        assert_eq!(StatusLine::parse(""), None);
    }

    #[test]
    fn rejects_non_numeric_code() {
        assert_eq!(StatusLine::parse("RT/4.0.0 abc Ok"), None);
    }

    #[test]
    fn displays_as_code_and_text() {
        assert_eq!(StatusLine::new(409, "Conflict").to_string(), "409 Conflict");
    }
}
