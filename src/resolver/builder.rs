use super::core::TrailerResolver;
use crate::cache::TrailerCache;
use crate::client::ProviderClient;
use crate::config::ResolverConfig;
use crate::provider::TrailerProvider;
use crate::resilience::BackoffPolicy;
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;
use std::time::Duration;

/// Builder for [`TrailerResolver`].
///
/// Providers are tried in the order they are added.
pub struct TrailerResolverBuilder {
    config: ResolverConfig,
    providers: Vec<Arc<dyn TrailerProvider>>,
}

impl TrailerResolverBuilder {
    pub fn new() -> Self {
        Self {
            config: ResolverConfig::default(),
            providers: Vec::new(),
        }
    }

    /// Start from defaults plus `TRAILER_*` environment overrides.
    pub fn from_env() -> Self {
        Self::new().config(ResolverConfig::default().with_env_overrides())
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_provider(self, provider: impl TrailerProvider + 'static) -> Self {
        self.with_shared_provider(Arc::new(provider))
    }

    pub fn with_shared_provider(mut self, provider: Arc<dyn TrailerProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn max_cache_size(mut self, n: usize) -> Self {
        self.config.max_cache_size = n;
        self
    }

    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.config = self.config.with_cache_ttl(ttl);
        self
    }

    pub fn max_attempts_per_provider(mut self, n: u32) -> Self {
        self.config.max_attempts_per_provider = n;
        self
    }

    pub fn base_delay(mut self, d: Duration) -> Self {
        self.config = self.config.with_base_delay(d);
        self
    }

    pub fn request_timeout(mut self, d: Duration) -> Self {
        self.config = self.config.with_request_timeout(d);
        self
    }

    pub fn enable_logging(mut self, enabled: bool) -> Self {
        self.config.enable_logging = enabled;
        self
    }

    pub fn build(self) -> Result<TrailerResolver> {
        self.config.validate()?;
        if self.providers.is_empty() {
            return Err(Error::configuration_with_context(
                "at least one trailer provider is required",
                ErrorContext::new()
                    .with_field_path("providers")
                    .with_source("resolver_builder"),
            ));
        }

        let policy = BackoffPolicy::new(self.config.backoff_config());
        let step_timeout = self.config.request_timeout();
        let providers = self
            .providers
            .into_iter()
            .map(|p| {
                ProviderClient::new(p, policy, step_timeout)
                    .with_logging(self.config.enable_logging)
            })
            .collect();

        Ok(TrailerResolver {
            providers,
            cache: TrailerCache::new(self.config.cache_config()),
            config: self.config,
        })
    }
}

impl Default for TrailerResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}
