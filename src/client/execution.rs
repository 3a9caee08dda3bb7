//! 单步执行逻辑：超时保护与有界重试。
//!
//! Single network step execution (timeout + bounded retry).

use super::error_classification::classify;
use super::ProviderClient;
use crate::transport::ProviderError;
use crate::types::ProviderFailure;
use std::fmt;
use std::future::Future;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Search,
    Record,
    Trailers,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Step::Search => "search",
            Step::Record => "record",
            Step::Trailers => "trailers",
        })
    }
}

impl ProviderClient {
    /// Execute one step until it succeeds, fails fatally, or the retry budget
    /// is spent. `attempts` accumulates every try, retries included.
    pub(crate) async fn run_step<T, F, Fut>(
        &self,
        step: Step,
        attempts: &mut u32,
        mut op: F,
    ) -> Result<T, ProviderFailure>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let mut attempt: u32 = 0;
        loop {
            *attempts = attempts.saturating_add(1);
            let started = tokio::time::Instant::now();
            let result = match tokio::time::timeout(self.step_timeout, op()).await {
                Ok(r) => r,
                Err(_) => Err(ProviderError::Timeout),
            };

            let err = match result {
                Ok(value) => return Ok(value),
                Err(e) => e,
            };

            let class = classify(&err);
            if self.policy.should_retry(attempt, class) {
                let delay = self.policy.delay_for(attempt);
                if self.logging {
                    debug!(
                        provider = %self.source(),
                        step = %step,
                        attempt,
                        error_kind = class.kind.name(),
                        delay_ms = delay.as_millis() as u64,
                        "retrying provider step"
                    );
                }
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            if self.logging {
                warn!(
                    provider = %self.source(),
                    step = %step,
                    attempt,
                    error_kind = class.kind.name(),
                    duration_ms = started.elapsed().as_millis() as u64,
                    error = %err,
                    "provider step failed"
                );
            }
            return Err(ProviderFailure {
                kind: class.kind,
                message: format!("{} {}: {}", self.source(), step, err),
                retryable: class.retryable,
            });
        }
    }
}
