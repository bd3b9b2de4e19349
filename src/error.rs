//! Errors from talking to the analysis endpoint.
//!
//! Every variant ends up on the same user-facing path (a generic error banner);
//! the distinction only matters for logs and tests.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The configured server URL could not be turned into a request URL.
    #[error("invalid server URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Connection refused, DNS failure, timeout, body read error.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP error! Status: {status}")]
    HttpStatus { status: u16 },

    /// The body was not the JSON envelope we expect.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl AnalysisError {
    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
