//! 预告片缓存模块：有界、带 TTL 的进程内缓存。
//!
//! # Trailer Cache Module
//!
//! In-process, non-persistent storage of resolved trailers keyed by a
//! normalized `(title, year)` identity.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`CacheKey`] | Normalized key derived from title and year |
//! | [`TrailerCache`] | Bounded store with lazy expiry and oldest-insert eviction |
//! | [`CacheEntry`] | One stored resolution with insertion and expiry instants |
//! | [`CacheConfig`] | Capacity and TTL |
//! | [`CacheStats`] | Hit/miss/eviction counters |
//!
//! ## Example
//!
//! ```rust
//! use trailer_resolver::cache::{CacheConfig, CacheKey, TrailerCache};
//! use trailer_resolver::types::{MediaRef, Source, TrailerReference};
//! use std::time::Duration;
//!
//! let cache = TrailerCache::new(CacheConfig {
//!     max_size: 2,
//!     ttl: Duration::from_secs(3600),
//! });
//! let media = MediaRef::new("The Matrix").with_year(1999);
//! let key = CacheKey::for_media(&media);
//! cache.insert(key.clone(), TrailerReference::new("m8e-FF8MsqU", Source::TMDB), &media);
//!
//! let hit = cache.get(&CacheKey::derive("the matrix!!", Some(1999))).unwrap();
//! assert_eq!(hit.reference.locator(), "m8e-FF8MsqU");
//! assert_eq!(hit.key, key);
//! ```

mod key;
mod store;

pub use key::{derive_key, normalize_title, CacheKey};
pub use store::{CacheConfig, CacheEntry, CacheStats, TrailerCache};
