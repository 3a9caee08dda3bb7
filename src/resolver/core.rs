use super::builder::TrailerResolverBuilder;
use crate::cache::{normalize_title, CacheKey, CacheStats, TrailerCache};
use crate::client::ProviderClient;
use crate::config::ResolverConfig;
use crate::types::outcome::ALL_SOURCES_FAILED;
use crate::types::{MediaRef, ProviderAttemptLog, ProviderOutcome, ResolutionResult, Source};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, info_span, warn, Instrument, Span};
use uuid::Uuid;

/// Error text for a title that normalizes to nothing.
pub(crate) const INVALID_TITLE: &str = "Media title is empty";

/// Cache-first, priority-ordered trailer resolver.
///
/// Created once and shared (typically behind an `Arc`) for the life of the
/// process. It holds no external resources beyond its in-memory cache.
pub struct TrailerResolver {
    pub(crate) providers: Vec<ProviderClient>,
    pub(crate) cache: TrailerCache,
    pub(crate) config: ResolverConfig,
}

impl TrailerResolver {
    pub fn builder() -> TrailerResolverBuilder {
        TrailerResolverBuilder::new()
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Provider tags in attempt order.
    pub fn sources(&self) -> Vec<Source> {
        self.providers.iter().map(|p| p.source()).collect()
    }

    /// Resolve `media` to a trailer reference.
    ///
    /// A live cache entry short-circuits without any network I/O. Otherwise
    /// every provider is tried once, strictly in order, until one succeeds.
    /// Concurrent misses on the same key are not coalesced; the last write wins.
    pub async fn resolve(&self, media: &MediaRef) -> ResolutionResult {
        let key = CacheKey::for_media(media);
        let span = if self.config.enable_logging {
            info_span!(
                "resolve_trailer",
                resolution_id = %Uuid::new_v4(),
                cache_key = key.as_str()
            )
        } else {
            Span::none()
        };
        self.resolve_keyed(media, key).instrument(span).await
    }

    async fn resolve_keyed(&self, media: &MediaRef, key: CacheKey) -> ResolutionResult {
        let logging = self.config.enable_logging;

        if normalize_title(&media.title).is_empty() {
            if logging {
                warn!(title = media.title.as_str(), "refusing to resolve empty title");
            }
            return ResolutionResult::failed(INVALID_TITLE, Vec::new());
        }

        if let Some(entry) = self.cache.get(&key) {
            if logging {
                debug!(source = %entry.reference.source(), "trailer cache hit");
            }
            return ResolutionResult::cache_hit(entry.reference);
        }

        let started = Instant::now();
        let mut attempts = Vec::with_capacity(self.providers.len());

        for client in &self.providers {
            let source = client.source();
            let (outcome, tries) = client.lookup_with_stats(media).await;
            match outcome {
                ProviderOutcome::Found(reference) => {
                    attempts.push(ProviderAttemptLog {
                        source: source.clone(),
                        attempts: tries,
                        failure: None,
                    });
                    let evicted = self.cache.insert(key.clone(), reference.clone(), media);
                    if logging {
                        info!(
                            source = %source,
                            attempts = tries,
                            evicted = evicted.as_ref().map(|k| k.as_str()),
                            duration_ms = started.elapsed().as_millis() as u64,
                            "trailer resolved"
                        );
                    }
                    return ResolutionResult::resolved(reference, attempts);
                }
                ProviderOutcome::Failed(failure) => {
                    if logging {
                        debug!(
                            source = %source,
                            attempts = tries,
                            error_kind = failure.kind.name(),
                            message = failure.message.as_str(),
                            "provider failed, trying next"
                        );
                    }
                    attempts.push(ProviderAttemptLog {
                        source,
                        attempts: tries,
                        failure: Some(failure.kind),
                    });
                }
            }
        }

        if logging {
            warn!(
                providers = attempts.len(),
                duration_ms = started.elapsed().as_millis() as u64,
                "all trailer sources failed"
            );
        }
        ResolutionResult::failed(ALL_SOURCES_FAILED, attempts)
    }

    pub fn cache(&self) -> &TrailerCache {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Forget the cached trailer for `media`, if any.
    pub fn invalidate(&self, media: &MediaRef) -> bool {
        self.cache.remove(&CacheKey::for_media(media))
    }

    pub fn cleanup_expired(&self) -> usize {
        self.cache.cleanup_expired()
    }

    /// Sweep expired entries every `cleanup_interval` in the background.
    ///
    /// The task holds only a weak reference and ends once the resolver is dropped.
    pub fn spawn_cleanup(self: &Arc<Self>) -> JoinHandle<()> {
        let weak = Arc::downgrade(self);
        let period = self.config.cleanup_interval();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(resolver) = weak.upgrade() else {
                    break;
                };
                let removed = resolver.cleanup_expired();
                if resolver.config.enable_logging && removed > 0 {
                    debug!(
                        removed,
                        remaining = resolver.cache_len(),
                        "expired trailer entries swept"
                    );
                }
            }
        })
    }
}
