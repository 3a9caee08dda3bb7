//! 提供者客户端：对单个上游来源执行 搜索→详情→预告片列表 查询，带退避重试。
//!
//! # Provider Client
//!
//! A [`ProviderClient`] wraps one [`TrailerProvider`] and runs its
//! search → record → trailer-list sequence. Each network step is guarded by a
//! per-step timeout and retried under the [`BackoffPolicy`]; the lookup
//! always ends in a [`ProviderOutcome`] value, never an error.

pub mod error_classification;
pub mod execution;
pub mod selection;

use crate::error_code::ErrorKind;
use crate::provider::TrailerProvider;
use crate::resilience::BackoffPolicy;
use crate::types::{MediaRef, ProviderFailure, ProviderOutcome, Source, TrailerReference};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use execution::Step;
use selection::{match_candidate, select_trailer};

pub use error_classification::{classify, Classification};

pub struct ProviderClient {
    provider: Arc<dyn TrailerProvider>,
    policy: BackoffPolicy,
    step_timeout: Duration,
    logging: bool,
}

impl ProviderClient {
    pub fn new(
        provider: Arc<dyn TrailerProvider>,
        policy: BackoffPolicy,
        step_timeout: Duration,
    ) -> Self {
        Self {
            provider,
            policy,
            step_timeout,
            logging: true,
        }
    }

    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.logging = enabled;
        self
    }

    pub fn source(&self) -> Source {
        self.provider.source()
    }

    pub async fn lookup(&self, media: &MediaRef) -> ProviderOutcome {
        self.lookup_with_stats(media).await.0
    }

    /// Run the lookup and also report how many network attempts it took.
    pub async fn lookup_with_stats(&self, media: &MediaRef) -> (ProviderOutcome, u32) {
        let mut attempts = 0;
        let outcome = match self.resolve_steps(media, &mut attempts).await {
            Ok(reference) => ProviderOutcome::Found(reference),
            Err(failure) => ProviderOutcome::Failed(failure),
        };
        (outcome, attempts)
    }

    async fn resolve_steps(
        &self,
        media: &MediaRef,
        attempts: &mut u32,
    ) -> Result<TrailerReference, ProviderFailure> {
        let provider = self.provider.as_ref();
        let title = media.title.as_str();
        let year = media.year;

        let candidates = self
            .run_step(Step::Search, attempts, || provider.search(title, year))
            .await?;
        let candidate = match_candidate(&candidates, year).ok_or_else(|| {
            self.not_found(format!("no search results for '{}'", title))
        })?;
        if self.logging {
            debug!(
                provider = %self.source(),
                candidate_id = candidate.id.as_str(),
                candidate_year = candidate.year,
                "matched candidate"
            );
        }

        let record = self
            .run_step(Step::Record, attempts, || provider.fetch_record(&candidate.id))
            .await?;
        let listings = self
            .run_step(Step::Trailers, attempts, || provider.list_trailers(&record.id))
            .await?;
        let listing = select_trailer(&listings).ok_or_else(|| {
            self.not_found(format!("no trailers listed for record {}", record.id))
        })?;

        Ok(TrailerReference::from_listing(listing, self.source()))
    }

    fn not_found(&self, message: String) -> ProviderFailure {
        ProviderFailure::new(ErrorKind::NotFound, format!("{}: {}", self.source(), message))
    }
}
