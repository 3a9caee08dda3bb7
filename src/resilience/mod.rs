//! 弹性模块：提供有界指数退避策略。
//!
//! # Resilience Module
//!
//! Retry eligibility and delay computation for provider network steps.
//!
//! ```rust
//! use trailer_resolver::client::error_classification::Classification;
//! use trailer_resolver::error_code::ErrorKind;
//! use trailer_resolver::resilience::{BackoffConfig, BackoffPolicy};
//! use std::time::Duration;
//!
//! let policy = BackoffPolicy::new(BackoffConfig {
//!     max_attempts: 3,
//!     base_delay: Duration::from_millis(100),
//!     max_delay: Duration::from_secs(5),
//! });
//! let timeout = Classification::from_kind(ErrorKind::Timeout);
//! assert!(policy.should_retry(0, timeout));
//! assert_eq!(policy.delay_for(1), Duration::from_millis(200));
//! assert!(!policy.should_retry(2, timeout));
//! ```

pub mod backoff;

pub use backoff::{BackoffConfig, BackoffPolicy};
