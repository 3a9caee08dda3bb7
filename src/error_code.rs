//! 提供者错误分类：定义六类错误及其重试语义。
//!
//! Provider failure taxonomy.
//!
//! Every failure observed while talking to an upstream provider is reduced to
//! one of six kinds. The kind alone decides whether the Provider Client may
//! retry; it never decides whether the resolver moves on to the next
//! provider (it always does).
//!
//! | Kind        | Retryable | Typical signal                 |
//! |-------------|-----------|--------------------------------|
//! | `Auth`      | no        | 401/403, rejected credential   |
//! | `NotFound`  | no        | 404, empty search, no trailers |
//! | `RateLimit` | yes       | 429                            |
//! | `Timeout`   | yes       | 408/504, step timeout elapsed  |
//! | `Upstream`  | yes       | other 5xx                      |
//! | `Network`   | yes       | transport failure, anything else |
//!
//! ## Example
//!
//! ```rust
//! use trailer_resolver::error_code::ErrorKind;
//!
//! let kind = ErrorKind::from_http_status(429);
//! assert_eq!(kind, ErrorKind::RateLimit);
//! assert!(kind.retryable());
//! assert!(!ErrorKind::from_http_status(401).retryable());
//! ```

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Invalid or expired credential.
    Auth,
    /// The provider has no matching record or no trailer for it.
    NotFound,
    /// The provider asked us to slow down.
    RateLimit,
    /// A network step did not complete within its budget.
    Timeout,
    /// Server-side failure at the provider.
    Upstream,
    /// Transport-level failure, or anything unclassified.
    Network,
}

impl ErrorKind {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::NotFound => "not_found",
            Self::RateLimit => "rate_limit",
            Self::Timeout => "timeout",
            Self::Upstream => "upstream",
            Self::Network => "network",
        }
    }

    #[inline]
    pub fn retryable(&self) -> bool {
        !matches!(self, Self::Auth | Self::NotFound)
    }

    pub fn from_http_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::Auth,
            404 => Self::NotFound,
            408 | 504 => Self::Timeout,
            429 => Self::RateLimit,
            500..=599 => Self::Upstream,
            _ => Self::Network,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
