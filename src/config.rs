//! 配置：解析引擎的可调参数（默认值、YAML、环境变量）。
//!
//! Resolver configuration.
//!
//! Precedence, lowest first: [`Default`], a YAML document, `TRAILER_*`
//! environment overrides, then explicit builder calls on
//! [`crate::TrailerResolverBuilder`].
//!
//! ```rust
//! use trailer_resolver::ResolverConfig;
//! use std::time::Duration;
//!
//! let cfg = ResolverConfig::from_yaml_str("max_cache_size: 250\ncache_ttl_secs: 600\n").unwrap();
//! assert_eq!(cfg.max_cache_size, 250);
//! assert_eq!(cfg.cache_ttl(), Duration::from_secs(600));
//! assert_eq!(cfg.max_attempts_per_provider, 3);
//! ```

use crate::cache::CacheConfig;
use crate::resilience::BackoffConfig;
use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub max_cache_size: usize,
    pub cache_ttl_secs: u64,
    pub max_attempts_per_provider: u32,
    pub base_delay_ms: u64,
    pub request_timeout_ms: u64,
    pub cleanup_interval_secs: u64,
    /// Diagnostic only: gates the engine's own tracing events.
    pub enable_logging: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_cache_size: 100,
            cache_ttl_secs: 24 * 60 * 60,
            max_attempts_per_provider: 3,
            base_delay_ms: 1_000,
            request_timeout_ms: 10_000,
            cleanup_interval_secs: 60 * 60,
            enable_logging: true,
        }
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(name).and_then(|s| s.trim().parse::<T>().ok())
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }

    /// Apply `TRAILER_*` environment overrides. Unparseable values are ignored.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Apply `TRAILER_*` overrides read through `lookup`.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = &lookup;
        if let Some(v) = parse_var(lookup, "TRAILER_MAX_CACHE_SIZE") {
            self.max_cache_size = v;
        }
        if let Some(v) = parse_var(lookup, "TRAILER_CACHE_TTL_SECS") {
            self.cache_ttl_secs = v;
        }
        if let Some(v) = parse_var(lookup, "TRAILER_MAX_ATTEMPTS") {
            self.max_attempts_per_provider = v;
        }
        if let Some(v) = parse_var(lookup, "TRAILER_BASE_DELAY_MS") {
            self.base_delay_ms = v;
        }
        if let Some(v) = parse_var(lookup, "TRAILER_REQUEST_TIMEOUT_MS") {
            self.request_timeout_ms = v;
        }
        if let Some(v) = parse_var(lookup, "TRAILER_CLEANUP_INTERVAL_SECS") {
            self.cleanup_interval_secs = v;
        }
        if let Some(v) = parse_var(lookup, "TRAILER_ENABLE_LOGGING") {
            self.enable_logging = v;
        }
        self
    }

    pub fn with_max_cache_size(mut self, n: usize) -> Self {
        self.max_cache_size = n;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl_secs = ttl.as_secs();
        self
    }

    pub fn with_max_attempts(mut self, n: u32) -> Self {
        self.max_attempts_per_provider = n;
        self
    }

    pub fn with_base_delay(mut self, d: Duration) -> Self {
        self.base_delay_ms = d.as_millis() as u64;
        self
    }

    pub fn with_request_timeout(mut self, d: Duration) -> Self {
        self.request_timeout_ms = d.as_millis() as u64;
        self
    }

    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.enable_logging = enabled;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let positive: [(&str, u64); 4] = [
            ("max_cache_size", self.max_cache_size as u64),
            ("max_attempts_per_provider", self.max_attempts_per_provider as u64),
            ("request_timeout_ms", self.request_timeout_ms),
            ("cleanup_interval_secs", self.cleanup_interval_secs),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(Error::validation_with_context(
                    "must be at least 1",
                    ErrorContext::new()
                        .with_field_path(field)
                        .with_source("config"),
                ));
            }
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            max_size: self.max_cache_size,
            ttl: self.cache_ttl(),
        }
    }

    /// Backoff delays never exceed the per-request timeout budget.
    pub fn backoff_config(&self) -> BackoffConfig {
        BackoffConfig {
            max_attempts: self.max_attempts_per_provider,
            base_delay: Duration::from_millis(self.base_delay_ms),
            max_delay: self.request_timeout(),
        }
    }
}
