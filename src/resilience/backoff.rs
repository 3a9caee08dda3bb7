//! Bounded exponential backoff.

use crate::client::error_classification::Classification;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffConfig {
    /// Total attempts per network step, the initial one included.
    pub max_attempts: u32,
    /// One time unit; attempt `n` waits `base_delay * 2^n`.
    pub base_delay: Duration,
    /// Upper bound for any single delay (the per-request timeout budget).
    pub max_delay: Duration,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
        }
    }
}

/// Decides whether a failed attempt may be retried and how long to wait.
///
/// `attempt` is 0-based: the first failure is attempt 0.
#[derive(Debug, Clone, Copy)]
pub struct BackoffPolicy {
    config: BackoffConfig,
}

impl BackoffPolicy {
    pub fn new(config: BackoffConfig) -> Self {
        Self { config }
    }

    pub fn max_attempts(&self) -> u32 {
        self.config.max_attempts
    }

    pub fn should_retry(&self, attempt: u32, classification: Classification) -> bool {
        if !classification.retryable {
            return false;
        }
        attempt.saturating_add(1) < self.config.max_attempts
    }

    pub fn delay_for(&self, attempt: u32) -> Duration {
        let base = self.config.base_delay.as_millis() as u64;
        let cap = self.config.max_delay.as_millis() as u64;
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        Duration::from_millis(base.saturating_mul(factor).min(cap))
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::new(BackoffConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_code::ErrorKind;

    fn class(kind: ErrorKind) -> Classification {
        Classification::from_kind(kind)
    }

    #[test]
    fn test_delay_doubles_from_base() {
        let policy = BackoffPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for(2), Duration::from_secs(4));
    }

    #[test]
    fn test_delay_is_capped_by_timeout_budget() {
        let policy = BackoffPolicy::new(BackoffConfig {
            max_attempts: 10,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_millis(3_000),
        });
        assert_eq!(policy.delay_for(2), Duration::from_millis(2_000));
        assert_eq!(policy.delay_for(3), Duration::from_millis(3_000));
        assert_eq!(policy.delay_for(80), Duration::from_millis(3_000));
    }

    #[test]
    fn test_retries_are_bounded_absolutely() {
        let policy = BackoffPolicy::default();
        let timeout = class(ErrorKind::Timeout);
        assert!(policy.should_retry(0, timeout));
        assert!(policy.should_retry(1, timeout));
        assert!(!policy.should_retry(2, timeout));
        assert!(!policy.should_retry(7, timeout));
    }

    #[test]
    fn test_fatal_is_never_retried() {
        let policy = BackoffPolicy::default();
        assert!(!policy.should_retry(0, class(ErrorKind::Auth)));
        assert!(!policy.should_retry(0, class(ErrorKind::NotFound)));
    }

    #[test]
    fn test_single_attempt_budget_never_retries() {
        let policy = BackoffPolicy::new(BackoffConfig {
            max_attempts: 1,
            ..Default::default()
        });
        assert!(!policy.should_retry(0, class(ErrorKind::Upstream)));
    }
}
