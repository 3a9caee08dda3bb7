//! TMDB v3 provider: `search/{movie,tv}` → `{movie,tv}/{id}` → `{movie,tv}/{id}/videos`.

use super::{year_from_date, Candidate, CanonicalRecord, ProviderError, TrailerProvider};
use crate::transport::HttpTransport;
use crate::types::{Source, TrailerKind, TrailerListing};
use crate::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Which TMDB catalog to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TmdbCatalog {
    #[default]
    Movie,
    Tv,
}

impl TmdbCatalog {
    fn segment(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }

    fn year_param(&self) -> &'static str {
        match self {
            Self::Movie => "year",
            Self::Tv => "first_air_date_year",
        }
    }
}

pub struct TmdbProvider {
    transport: HttpTransport,
    catalog: TmdbCatalog,
    language: Option<String>,
}

impl TmdbProvider {
    /// Provider against the public TMDB API using a v4 read access token.
    pub fn new(token: impl Into<String>, timeout: Duration) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, token, timeout)
    }

    pub fn with_base_url(
        base_url: &str,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            transport: HttpTransport::new(base_url, Some(token.into()), timeout)?,
            catalog: TmdbCatalog::Movie,
            language: None,
        })
    }

    pub fn with_catalog(mut self, catalog: TmdbCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// ISO-639-1 language (optionally with region, `"en-US"`) for titles.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    fn base_query(&self) -> Vec<(&'static str, String)> {
        let mut q = Vec::new();
        if let Some(lang) = &self.language {
            q.push(("language", lang.clone()));
        }
        q
    }
}

#[derive(Debug, Deserialize)]
struct Paged<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

/// Shared shape of search hits and detail records; TV uses `name` and
/// `first_air_date` where movies use `title` and `release_date`.
#[derive(Debug, Deserialize)]
struct TmdbItem {
    id: u64,
    #[serde(default, alias = "name")]
    title: String,
    #[serde(default, alias = "first_air_date")]
    release_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbVideo {
    #[serde(default)]
    key: String,
    #[serde(default)]
    site: Option<String>,
    #[serde(default, rename = "type")]
    video_type: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

#[async_trait]
impl TrailerProvider for TmdbProvider {
    fn source(&self) -> Source {
        match self.catalog {
            TmdbCatalog::Movie => Source::TMDB,
            TmdbCatalog::Tv => Source::TMDB_TV,
        }
    }

    async fn search(
        &self,
        title: &str,
        year: Option<u16>,
    ) -> std::result::Result<Vec<Candidate>, ProviderError> {
        let mut query = self.base_query();
        query.push(("query", title.to_string()));
        query.push(("include_adult", "false".to_string()));
        if let Some(y) = year {
            query.push((self.catalog.year_param(), y.to_string()));
        }

        let path = format!("search/{}", self.catalog.segment());
        let page: Paged<TmdbItem> = self.transport.get_json(&path, &query).await?;
        Ok(page
            .results
            .into_iter()
            .map(|item| Candidate {
                id: item.id.to_string(),
                year: year_from_date(item.release_date.as_deref()),
                title: item.title,
            })
            .collect())
    }

    async fn fetch_record(&self, id: &str) -> std::result::Result<CanonicalRecord, ProviderError> {
        let path = format!("{}/{}", self.catalog.segment(), id);
        let item: TmdbItem = self.transport.get_json(&path, &self.base_query()).await?;
        Ok(CanonicalRecord {
            id: item.id.to_string(),
            year: year_from_date(item.release_date.as_deref()),
            title: item.title,
        })
    }

    async fn list_trailers(
        &self,
        record_id: &str,
    ) -> std::result::Result<Vec<TrailerListing>, ProviderError> {
        let path = format!("{}/{}/videos", self.catalog.segment(), record_id);
        let page: Paged<TmdbVideo> = self.transport.get_json(&path, &self.base_query()).await?;
        Ok(page
            .results
            .into_iter()
            .filter(|v| !v.key.trim().is_empty())
            .map(|v| {
                let kind = v
                    .video_type
                    .as_deref()
                    .map(TrailerKind::from_label)
                    .unwrap_or_else(|| TrailerKind::Other(String::new()));
                TrailerListing {
                    locator: v.key,
                    kind,
                    site: v.site,
                    name: v.name,
                }
            })
            .collect())
    }
}
