//! LRU cache for single-token resolutions.
//!
//! Keyed by the normalized token only. Both hits and "no match" results are
//! stored, so repeated unresolved words skip the strategy chain too.

use crate::core::types::Candidate;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub const DEFAULT_CACHE_CAPACITY: usize = 500;

/// Bounded token → candidate cache with strict LRU eviction.
pub struct CandidateCache {
    cache: Mutex<LruCache<String, Option<Candidate>>>,
    stats: CacheStats,
}

impl CandidateCache {
    /// Create new cache with capacity. A zero capacity falls back to one entry.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
            stats: CacheStats::default(),
        }
    }

    /// Looks up a token and promotes it to most recently used.
    ///
    /// The outer `Option` is hit/miss; the inner one is the cached resolution.
    /// A poisoned lock is reported as a miss.
    pub fn get(&self, token: &str) -> Option<Option<Candidate>> {
        let hit = match self.cache.lock() {
            Ok(mut cache) => cache.get(token).cloned(),
            Err(_) => None,
        };
        match hit {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        hit
    }

    pub fn insert(&self, token: String, candidate: Option<Candidate>) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(token, candidate);
        }
    }

    /// Checks membership without touching recency or statistics.
    pub fn contains(&self, token: &str) -> bool {
        self.cache
            .lock()
            .map(|cache| cache.contains(token))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.cache.lock().map(|cache| cache.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.cache
            .lock()
            .map(|cache| cache.cap().get())
            .unwrap_or(0)
    }

    pub fn clear(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.clear();
        }
        tracing::info!("candidate cache cleared");
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.clone()
    }
}

/// Cache statistics. Every miss corresponds to one run of the strategy chain.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl Clone for CacheStats {
    fn clone(&self) -> Self {
        Self {
            hits: AtomicUsize::new(self.hits()),
            misses: AtomicUsize::new(self.misses()),
        }
    }
}

impl CacheStats {
    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn hit_rate(&self) -> f64 {
        let total = self.hits() + self.misses();
        if total == 0 {
            0.0
        } else {
            self.hits() as f64 / total as f64
        }
    }
}
