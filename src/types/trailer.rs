//! Trailer references, provider tags and listing metadata.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Tag naming the upstream provider that produced a reference.
///
/// Well-known providers have associated constants; custom providers pick
/// their own lowercase name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Source(Cow<'static, str>);

impl Source {
    pub const TMDB: Source = Source(Cow::Borrowed("tmdb"));
    pub const TMDB_TV: Source = Source(Cow::Borrowed("tmdb_tv"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Source {
    fn from(s: &'static str) -> Self {
        Self(Cow::Borrowed(s))
    }
}

/// The resolved artifact: an opaque video locator plus where it came from.
///
/// Immutable once constructed; [`TrailerReference::into_cached`] produces a
/// new value flagged as served from cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailerReference {
    locator: String,
    source: Source,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    site: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kind: Option<TrailerKind>,
    cached: bool,
}

impl TrailerReference {
    pub fn new(locator: impl Into<String>, source: Source) -> Self {
        Self {
            locator: locator.into(),
            source,
            site: None,
            kind: None,
            cached: false,
        }
    }

    pub(crate) fn from_listing(listing: &TrailerListing, source: Source) -> Self {
        Self {
            locator: listing.locator.clone(),
            source,
            site: listing.site.clone(),
            kind: Some(listing.kind.clone()),
            cached: false,
        }
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Hosting site reported by the provider (e.g. `"YouTube"`), if any.
    pub fn site(&self) -> Option<&str> {
        self.site.as_deref()
    }

    pub fn kind(&self) -> Option<&TrailerKind> {
        self.kind.as_ref()
    }

    pub fn is_cached(&self) -> bool {
        self.cached
    }

    pub fn into_cached(mut self) -> Self {
        self.cached = true;
        self
    }
}

/// Category of a listed video, ordered by preference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailerKind {
    Trailer,
    Teaser,
    Clip,
    Featurette,
    Other(String),
}

impl TrailerKind {
    /// Case-insensitive mapping from a provider's type label.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "trailer" => Self::Trailer,
            "teaser" => Self::Teaser,
            "clip" => Self::Clip,
            "featurette" => Self::Featurette,
            _ => Self::Other(label.to_string()),
        }
    }

    /// Selection rank; lower wins. `None` for untyped entries.
    pub fn rank(&self) -> Option<u8> {
        match self {
            Self::Trailer => Some(0),
            Self::Teaser => Some(1),
            Self::Clip => Some(2),
            Self::Featurette => Some(3),
            Self::Other(_) => None,
        }
    }
}

/// One video entry attached to a provider's canonical record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailerListing {
    pub locator: String,
    pub kind: TrailerKind,
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl TrailerListing {
    pub fn new(locator: impl Into<String>, kind: TrailerKind) -> Self {
        Self {
            locator: locator.into(),
            kind,
            site: None,
            name: None,
        }
    }

    pub fn with_site(mut self, site: impl Into<String>) -> Self {
        self.site = Some(site.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
