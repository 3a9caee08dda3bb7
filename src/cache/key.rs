//! Cache key derivation.

use crate::types::MediaRef;
use serde::{Deserialize, Serialize};

/// Normalized `(title, year)` identity of a resolution.
///
/// Titles are lower-cased and stripped of everything outside `[a-z0-9]`, so
/// `"The Matrix"` and `"the   matrix!!"` collide. A missing year renders as
/// `unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn derive(title: &str, year: Option<u16>) -> Self {
        let year = year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        Self(format!("{}_{}", normalize_title(title), year))
    }

    pub fn for_media(media: &MediaRef) -> Self {
        Self::derive(&media.title, media.year)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&MediaRef> for CacheKey {
    fn from(media: &MediaRef) -> Self {
        Self::for_media(media)
    }
}

pub fn derive_key(title: &str, year: Option<u16>) -> CacheKey {
    CacheKey::derive(title, year)
}

pub fn normalize_title(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_and_punctuation_collide() {
        assert_eq!(
            derive_key("The Matrix", Some(1999)),
            derive_key("the   matrix!!", Some(1999))
        );
        assert_eq!(derive_key("The Matrix", Some(1999)).as_str(), "thematrix_1999");
    }

    #[test]
    fn test_year_distinguishes_keys() {
        assert_ne!(derive_key("Dune", Some(1984)), derive_key("Dune", Some(2021)));
        assert_eq!(derive_key("Dune", None).as_str(), "dune_unknown");
    }

    #[test]
    fn test_non_ascii_is_stripped() {
        assert_eq!(normalize_title("Amélie (2001)"), "amlie2001");
        assert_eq!(normalize_title("  "), "");
    }

    #[test]
    fn test_media_ref_key_ignores_media_id() {
        let a = MediaRef::new("Alien").with_year(1979).with_media_id(1);
        let b = MediaRef::new("ALIEN").with_year(1979).with_media_id(2);
        assert_eq!(CacheKey::from(&a), CacheKey::from(&b));
    }
}
