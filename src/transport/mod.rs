//! 传输层：HTTP 客户端与原始提供者错误。
//!
//! Transport layer: the reqwest-backed HTTP client used by concrete providers
//! and the raw [`ProviderError`] every provider operation reports.

mod http;

pub use http::HttpTransport;

use thiserror::Error;

/// Raw failure of a single provider operation, before classification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("response decode error: {0}")]
    Decode(String),

    /// The provider answered, but has nothing for this title.
    #[error("no match: {0}")]
    NoMatch(String),
}

impl ProviderError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    pub fn no_match(message: impl Into<String>) -> Self {
        Self::NoMatch(message.into())
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout
        } else if e.is_decode() {
            ProviderError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            ProviderError::status(status.as_u16(), e.to_string())
        } else {
            ProviderError::Transport(e.to_string())
        }
    }
}
