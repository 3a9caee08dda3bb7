//! Provider outcomes and caller-facing resolution results.

use super::trailer::{Source, TrailerReference};
use crate::error_code::ErrorKind;
use serde::Serialize;

/// Error text reported when every configured provider failed.
pub const ALL_SOURCES_FAILED: &str = "All trailer sources failed";

/// Classified failure of one provider lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderFailure {
    pub kind: ErrorKind,
    pub message: String,
    pub retryable: bool,
}

impl ProviderFailure {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            retryable: kind.retryable(),
        }
    }
}

/// Transient result of asking a single provider. Never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome {
    Found(TrailerReference),
    Failed(ProviderFailure),
}

impl ProviderOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn failure(&self) -> Option<&ProviderFailure> {
        match self {
            Self::Failed(f) => Some(f),
            Self::Found(_) => None,
        }
    }
}

/// What one provider did during a resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderAttemptLog {
    pub source: Source,
    /// Network attempts made, retries included.
    pub attempts: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<ErrorKind>,
}

/// Uniform result returned for every resolution.
///
/// `reference` is meaningful when `success` is true, `error` otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<TrailerReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    pub cached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Per-provider diagnostics in attempt order; empty on a cache hit.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attempts: Vec<ProviderAttemptLog>,
}

impl ResolutionResult {
    pub(crate) fn cache_hit(reference: TrailerReference) -> Self {
        let reference = reference.into_cached();
        Self {
            success: true,
            source: Some(reference.source().clone()),
            reference: Some(reference),
            cached: true,
            error: None,
            attempts: Vec::new(),
        }
    }

    pub(crate) fn resolved(reference: TrailerReference, attempts: Vec<ProviderAttemptLog>) -> Self {
        Self {
            success: true,
            source: Some(reference.source().clone()),
            reference: Some(reference),
            cached: false,
            error: None,
            attempts,
        }
    }

    pub(crate) fn failed(error: impl Into<String>, attempts: Vec<ProviderAttemptLog>) -> Self {
        Self {
            success: false,
            reference: None,
            source: None,
            cached: false,
            error: Some(error.into()),
            attempts,
        }
    }

    pub fn locator(&self) -> Option<&str> {
        self.reference.as_ref().map(|r| r.locator())
    }
}
