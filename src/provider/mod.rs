//! 提供者抽象：上游预告片来源的统一接口。
//!
//! # Provider Module
//!
//! The outbound contract every upstream trailer source implements: three
//! idempotent, read-only operations. Providers return provider-native data
//! normalized into [`Candidate`], [`CanonicalRecord`] and
//! [`TrailerListing`]; failures are raw [`ProviderError`] values that the
//! [`crate::client::ProviderClient`] classifies and retries.
//!
//! | Provider | Description |
//! |----------|-------------|
//! | [`tmdb::TmdbProvider`] | TMDB v3 API (movie or TV catalog) over [`crate::transport::HttpTransport`] |
//!
//! Custom sources (a local fixture table, another HTTP API) only need to
//! implement [`TrailerProvider`].

pub mod tmdb;

use crate::types::{Source, TrailerListing};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use crate::transport::ProviderError;
pub use tmdb::{TmdbCatalog, TmdbProvider};

/// A search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub title: String,
    pub year: Option<u16>,
}

/// The provider's canonical record for a matched candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub id: String,
    pub title: String,
    pub year: Option<u16>,
}

/// An upstream trailer source.
#[async_trait]
pub trait TrailerProvider: Send + Sync {
    /// Tag reported on references this provider produces.
    fn source(&self) -> Source;

    /// Search by title, optionally narrowed by release year.
    async fn search(&self, title: &str, year: Option<u16>) -> Result<Vec<Candidate>, ProviderError>;

    /// Fetch the canonical record for a candidate id.
    async fn fetch_record(&self, id: &str) -> Result<CanonicalRecord, ProviderError>;

    /// List the videos attached to a canonical record.
    async fn list_trailers(&self, record_id: &str) -> Result<Vec<TrailerListing>, ProviderError>;
}

/// Parse the leading four-digit year of an ISO-8601 date (`"1999-03-30"`).
pub(crate) fn year_from_date(date: Option<&str>) -> Option<u16> {
    let date = date?;
    let year = date.get(..4)?;
    if year.bytes().all(|b| b.is_ascii_digit()) {
        year.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_from_date() {
        assert_eq!(year_from_date(Some("1999-03-30")), Some(1999));
        assert_eq!(year_from_date(Some("2021")), Some(2021));
        assert_eq!(year_from_date(Some("")), None);
        assert_eq!(year_from_date(Some("n/a")), None);
        assert_eq!(year_from_date(None), None);
    }
}
