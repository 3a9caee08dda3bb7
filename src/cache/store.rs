//! Bounded in-process trailer cache.

use super::key::CacheKey;
use crate::types::{MediaRef, TrailerReference};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;

/// Horizon used when `inserted_at + ttl` does not fit in an `Instant`.
const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub max_size: usize,
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: 100,
            ttl: Duration::from_secs(24 * 60 * 60),
        }
    }
}

/// One cached resolution. `expires_at = inserted_at + ttl` at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub key: CacheKey,
    pub reference: TrailerReference,
    pub inserted_at: Instant,
    pub expires_at: Instant,
    pub media_id: Option<u64>,
    pub title: String,
    seq: u64,
}

impl CacheEntry {
    pub fn new(
        key: CacheKey,
        reference: TrailerReference,
        media: &MediaRef,
        ttl: Duration,
    ) -> Self {
        let now = Instant::now();
        let expires_at = now.checked_add(ttl).unwrap_or_else(|| now + MAX_TTL);
        Self {
            key,
            reference,
            inserted_at: now,
            expires_at,
            media_id: media.media_id,
            title: media.title.clone(),
            seq: 0,
        }
    }

    /// Logically absent once `now` is past `expires_at`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now > self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    fn age_rank(&self) -> (Instant, u64) {
        (self.inserted_at, self.seq)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub evictions: u64,
    pub expirations: u64,
}

impl CacheStats {
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Default)]
struct AtomicStats {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    evictions: AtomicU64,
    expirations: AtomicU64,
}

impl AtomicStats {
    fn bump(counter: &AtomicU64, n: u64) {
        counter.fetch_add(n, Ordering::Relaxed);
    }

    fn to_stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            expirations: self.expirations.load(Ordering::Relaxed),
        }
    }
}

#[derive(Default)]
struct State {
    entries: HashMap<CacheKey, CacheEntry>,
    next_seq: u64,
}

/// Key/value store of resolved trailers, bounded by entry count.
///
/// - `get` expires lazily: a stale entry is removed and reported absent.
/// - When full, inserting a new key evicts the entry inserted earliest.
///   Reads do not affect eviction order and never extend an entry's TTL.
///
/// Every operation is synchronous and holds the lock only for its own
/// duration, so it is atomic with respect to interleaved resolutions.
pub struct TrailerCache {
    config: CacheConfig,
    state: Mutex<State>,
    stats: AtomicStats,
}

impl TrailerCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config: CacheConfig {
                max_size: config.max_size.max(1),
                ..config
            },
            state: Mutex::new(State::default()),
            stats: AtomicStats::default(),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        let mut state = self.lock();
        let expired = match state.entries.get(key) {
            None => {
                AtomicStats::bump(&self.stats.misses, 1);
                return None;
            }
            Some(entry) => entry.is_expired(),
        };
        if expired {
            state.entries.remove(key);
            AtomicStats::bump(&self.stats.expirations, 1);
            AtomicStats::bump(&self.stats.misses, 1);
            return None;
        }
        AtomicStats::bump(&self.stats.hits, 1);
        state.entries.get(key).cloned()
    }

    /// Insert or replace `entry`. Returns the key evicted to make room, if any.
    pub fn set(&self, mut entry: CacheEntry) -> Option<CacheKey> {
        let mut state = self.lock();
        let mut evicted = None;

        if !state.entries.contains_key(&entry.key) && state.entries.len() >= self.config.max_size {
            let oldest = state
                .entries
                .values()
                .min_by_key(|e| e.age_rank())
                .map(|e| e.key.clone());
            if let Some(k) = oldest {
                state.entries.remove(&k);
                AtomicStats::bump(&self.stats.evictions, 1);
                evicted = Some(k);
            }
        }

        entry.seq = state.next_seq;
        state.next_seq += 1;
        state.entries.insert(entry.key.clone(), entry);
        AtomicStats::bump(&self.stats.inserts, 1);
        evicted
    }

    /// Build an entry with the configured TTL and store it.
    pub fn insert(
        &self,
        key: CacheKey,
        reference: TrailerReference,
        media: &MediaRef,
    ) -> Option<CacheKey> {
        self.set(CacheEntry::new(key, reference, media, self.config.ttl))
    }

    pub fn remove(&self, key: &CacheKey) -> bool {
        self.lock().entries.remove(key).is_some()
    }

    /// Drop every entry whose TTL has passed. Returns how many were removed.
    pub fn cleanup_expired(&self) -> usize {
        let now = Instant::now();
        let mut state = self.lock();
        let before = state.entries.len();
        state.entries.retain(|_, e| !e.is_expired_at(now));
        let removed = before - state.entries.len();
        AtomicStats::bump(&self.stats.expirations, removed as u64);
        removed
    }

    /// Physical entry count, stale-but-unswept entries included.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.lock()
            .entries
            .get(key)
            .map(|e| !e.is_expired())
            .unwrap_or(false)
    }

    pub fn clear(&self) {
        self.lock().entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.to_stats()
    }
}

impl Default for TrailerCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
