//! Scripted in-memory providers for resolver tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use trailer_resolver::provider::{Candidate, CanonicalRecord, ProviderError, TrailerProvider};
use trailer_resolver::types::{Source, TrailerKind, TrailerListing};
use trailer_resolver::{ResolverConfig, TrailerResolver, TrailerResolverBuilder};

/// Shared, ordered record of every provider call ("a:search", "b:record", ...).
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, entry: String) {
        self.0.lock().unwrap().push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    /// Index of the first call made by `source`.
    pub fn first_call_of(&self, source: &str) -> Option<usize> {
        let prefix = format!("{}:", source);
        self.entries().iter().position(|e| e.starts_with(&prefix))
    }
}

pub struct ScriptedProvider {
    source: &'static str,
    calls: CallLog,
    /// Consumed front to back; once empty, `search_default` answers.
    search_script: Mutex<VecDeque<Result<Vec<Candidate>, ProviderError>>>,
    search_default: Option<ProviderError>,
    candidates: Option<Vec<Candidate>>,
    missing_titles: Vec<String>,
    search_delay: Option<Duration>,
    listings: Option<Vec<TrailerListing>>,
    search_calls: AtomicU32,
    record_calls: AtomicU32,
}

impl ScriptedProvider {
    /// Always finds a record and lists a teaser plus a trailer for it.
    pub fn found(source: &'static str, calls: &CallLog) -> Self {
        Self {
            source,
            calls: calls.clone(),
            search_script: Mutex::new(VecDeque::new()),
            search_default: None,
            candidates: None,
            missing_titles: Vec::new(),
            search_delay: None,
            listings: None,
            search_calls: AtomicU32::new(0),
            record_calls: AtomicU32::new(0),
        }
    }

    /// Search fails with `error` on every attempt.
    pub fn failing(source: &'static str, error: ProviderError, calls: &CallLog) -> Self {
        let mut p = Self::found(source, calls);
        p.search_default = Some(error);
        p
    }

    pub fn with_search_script(self, script: Vec<Result<Vec<Candidate>, ProviderError>>) -> Self {
        *self.search_script.lock().unwrap() = script.into();
        self
    }

    pub fn with_candidates(mut self, candidates: Vec<Candidate>) -> Self {
        self.candidates = Some(candidates);
        self
    }

    /// Titles this provider has never heard of (search returns nothing).
    pub fn with_missing_title(mut self, title: &str) -> Self {
        self.missing_titles.push(title.to_string());
        self
    }

    pub fn with_search_delay(mut self, delay: Duration) -> Self {
        self.search_delay = Some(delay);
        self
    }

    pub fn with_listings(mut self, listings: Vec<TrailerListing>) -> Self {
        self.listings = Some(listings);
        self
    }

    pub fn search_calls(&self) -> u32 {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn record_calls(&self) -> u32 {
        self.record_calls.load(Ordering::SeqCst)
    }

    /// Locator the default listings select for `record_id`.
    pub fn trailer_locator(record_id: &str) -> String {
        format!("{}-trailer", record_id)
    }
}

#[async_trait]
impl TrailerProvider for ScriptedProvider {
    fn source(&self) -> Source {
        Source::new(self.source)
    }

    async fn search(
        &self,
        title: &str,
        year: Option<u16>,
    ) -> Result<Vec<Candidate>, ProviderError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.calls.push(format!("{}:search", self.source));
        if let Some(d) = self.search_delay {
            tokio::time::sleep(d).await;
        }

        let scripted = self.search_script.lock().unwrap().pop_front();
        if let Some(result) = scripted {
            return result;
        }
        if let Some(err) = &self.search_default {
            return Err(err.clone());
        }
        if self.missing_titles.iter().any(|t| t == title) {
            return Ok(Vec::new());
        }
        Ok(self.candidates.clone().unwrap_or_else(|| {
            vec![Candidate {
                id: format!("{}-{}", self.source, title.to_lowercase().replace(' ', "-")),
                title: title.to_string(),
                year,
            }]
        }))
    }

    async fn fetch_record(&self, id: &str) -> Result<CanonicalRecord, ProviderError> {
        self.record_calls.fetch_add(1, Ordering::SeqCst);
        self.calls.push(format!("{}:record", self.source));
        Ok(CanonicalRecord {
            id: id.to_string(),
            title: id.to_string(),
            year: None,
        })
    }

    async fn list_trailers(&self, record_id: &str) -> Result<Vec<TrailerListing>, ProviderError> {
        self.calls.push(format!("{}:trailers", self.source));
        Ok(self.listings.clone().unwrap_or_else(|| {
            vec![
                TrailerListing::new(format!("{}-teaser", record_id), TrailerKind::Teaser),
                TrailerListing::new(Self::trailer_locator(record_id), TrailerKind::Trailer)
                    .with_site("YouTube"),
            ]
        }))
    }
}

/// Quiet config with a 1 s backoff unit and 10 s step timeout.
pub fn test_config() -> ResolverConfig {
    ResolverConfig::default()
        .with_base_delay(Duration::from_secs(1))
        .with_request_timeout(Duration::from_secs(10))
        .with_logging(false)
}

pub fn resolver_with(
    providers: Vec<Arc<ScriptedProvider>>,
    config: ResolverConfig,
) -> TrailerResolver {
    providers
        .into_iter()
        .fold(TrailerResolverBuilder::new().config(config), |b, p| {
            b.with_shared_provider(p)
        })
        .build()
        .expect("resolver builds")
}

pub fn candidate(id: &str, year: Option<u16>) -> Candidate {
    Candidate {
        id: id.to_string(),
        title: id.to_string(),
        year,
    }
}

pub fn arc<T>(v: T) -> Arc<T> {
    Arc::new(v)
}
