//! Client Error Types
//!
//! Failures surfaced by dashboard requests. Nothing here is fatal: every
//! variant ends up as a notice or a log line and the client keeps polling.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from talking to the analytics backend
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure (connection refused, timeout, DNS, ...)
    #[error("{0}")]
    Network(String),

    /// Body was not the JSON shape we expected
    #[error("invalid response: {0}")]
    Decode(String),

    /// Non-2xx reply without a parsable body
    #[error("HTTP {status}")]
    HttpStatus { status: u16 },

    /// Backend answered but reported a failure
    #[error("{0}")]
    Rejected(String),

    /// Local file could not be read for upload
    #[error("cannot read {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    /// Upload refused before sending
    #[error("{0}")]
    InvalidUpload(String),
}

impl ClientError {
    /// True for transport and parse failures, as opposed to backend rejections
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::Network(_) | ClientError::Decode(_) | ClientError::HttpStatus { .. }
        )
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}

#[cfg(feature = "native")]
impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else if e.is_timeout() {
            ClientError::Network("request timed out".to_string())
        } else {
            ClientError::Network(e.to_string())
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
