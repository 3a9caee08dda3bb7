//! Inbound media descriptor.

use serde::{Deserialize, Serialize};

/// A title to resolve, as supplied by the catalog layer.
///
/// `media_id` is bookkeeping only: it is stored alongside cache entries but
/// never participates in cache keying or provider lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaRef {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_id: Option<u64>,
}

impl MediaRef {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: None,
            media_id: None,
        }
    }

    pub fn with_year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_media_id(mut self, id: u64) -> Self {
        self.media_id = Some(id);
        self
    }

    /// Parse the `Title[:year]` shorthand used by the diagnostic binary.
    ///
    /// A trailing `:NNNN` is only taken as the year when it is four ASCII
    /// digits; otherwise the whole string is the title.
    pub fn parse_shorthand(input: &str) -> Self {
        if let Some((title, year)) = input.rsplit_once(':') {
            if year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()) {
                if let Ok(y) = year.parse::<u16>() {
                    return Self::new(title.trim()).with_year(y);
                }
            }
        }
        Self::new(input.trim())
    }
}

impl From<&str> for MediaRef {
    fn from(title: &str) -> Self {
        Self::new(title)
    }
}

impl From<String> for MediaRef {
    fn from(title: String) -> Self {
        Self::new(title)
    }
}
