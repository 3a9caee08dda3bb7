//! Error classification logic

use crate::error_code::ErrorKind;
use crate::transport::ProviderError;

/// Kind plus retry eligibility of a raw provider failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub kind: ErrorKind,
    pub retryable: bool,
}

impl Classification {
    pub fn from_kind(kind: ErrorKind) -> Self {
        Self {
            kind,
            retryable: kind.retryable(),
        }
    }
}

/// Classify a raw provider failure. Pure and deterministic.
pub fn classify(error: &ProviderError) -> Classification {
    let kind = match error {
        ProviderError::Status { status, .. } => ErrorKind::from_http_status(*status),
        ProviderError::Timeout => ErrorKind::Timeout,
        ProviderError::NoMatch(_) => ErrorKind::NotFound,
        ProviderError::Transport(_) | ProviderError::Decode(_) => ErrorKind::Network,
    };
    Classification::from_kind(kind)
}
