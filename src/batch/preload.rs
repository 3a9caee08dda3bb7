//! Cache warming for lists of titles.

use crate::resolver::TrailerResolver;
use crate::types::MediaRef;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Tally of a preload batch. Informational only; callers may ignore it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreloadSummary {
    pub requested: usize,
    /// Resolved through a provider during this batch.
    pub resolved: usize,
    /// Already cached.
    pub cached: usize,
    pub failed: usize,
    pub execution_time: Duration,
}

impl PreloadSummary {
    pub fn succeeded(&self) -> usize {
        self.resolved + self.cached
    }
}

impl TrailerResolver {
    /// Resolve every item concurrently and wait for all of them to settle.
    ///
    /// Individual failures are logged and counted, never propagated; one
    /// item's failure has no effect on its siblings.
    pub async fn preload(&self, items: Vec<MediaRef>) -> PreloadSummary {
        let start = Instant::now();
        let requested = items.len();

        let results = join_all(items.iter().map(|item| self.resolve(item))).await;

        let mut summary = PreloadSummary {
            requested,
            ..Default::default()
        };
        for (item, result) in items.iter().zip(results) {
            if !result.success {
                summary.failed += 1;
                if self.config.enable_logging {
                    warn!(
                        title = item.title.as_str(),
                        year = item.year,
                        error = result.error.as_deref().unwrap_or_default(),
                        "trailer preload failed"
                    );
                }
            } else if result.cached {
                summary.cached += 1;
            } else {
                summary.resolved += 1;
            }
        }
        summary.execution_time = start.elapsed();

        if self.config.enable_logging {
            debug!(
                requested = summary.requested,
                resolved = summary.resolved,
                cached = summary.cached,
                failed = summary.failed,
                duration_ms = summary.execution_time.as_millis() as u64,
                "trailer preload settled"
            );
        }
        summary
    }

    /// Fire-and-forget variant of [`TrailerResolver::preload`].
    ///
    /// Dropping the handle does not cancel the batch.
    pub fn spawn_preload(self: &Arc<Self>, items: Vec<MediaRef>) -> JoinHandle<PreloadSummary> {
        let resolver = Arc::clone(self);
        tokio::spawn(async move { resolver.preload(items).await })
    }
}
