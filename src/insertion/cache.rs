//! Memoized similarity scores
//!
//! Scores are keyed by `lowercase(candidate):lowercase(keyword)`. Tokens
//! never contain a colon, so the key is unambiguous. A score is a pure
//! function of its key, which makes every policy (including `Disabled`)
//! observationally identical apart from speed.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use lru::LruCache;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// How the similarity cache bounds its memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CachePolicy {
    /// Keep at most `capacity` entries, evicting the least recently used
    #[default]
    Lru,
    /// Never evict
    Unbounded,
    /// Always recompute
    Disabled,
}

enum Store {
    Lru(Mutex<LruCache<String, f64>>),
    Unbounded(DashMap<String, f64>),
    Disabled,
}

/// Cache statistics tracked atomically
#[derive(Debug, Default)]
struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

/// Snapshot of cache statistics
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatsSnapshot {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that had to compute a score
    pub misses: u64,
    /// Entries dropped to respect the capacity
    pub evictions: u64,
    /// Current number of entries
    pub size: usize,
    /// Hit rate (0.0-1.0)
    pub hit_rate: f64,
}

/// Thread-safe (candidate, keyword) → score cache
pub struct SimilarityCache {
    store: Store,
    stats: CacheStats,
}

impl SimilarityCache {
    /// Create a cache for `policy`; an LRU with zero capacity is disabled
    #[must_use]
    pub fn new(policy: CachePolicy, capacity: usize) -> Self {
        match policy {
            CachePolicy::Lru => NonZeroUsize::new(capacity).map_or_else(Self::disabled, Self::lru),
            CachePolicy::Unbounded => Self::unbounded(),
            CachePolicy::Disabled => Self::disabled(),
        }
    }

    /// Bounded least-recently-used cache
    #[must_use]
    pub fn lru(capacity: NonZeroUsize) -> Self {
        Self::with_store(Store::Lru(Mutex::new(LruCache::new(capacity))))
    }

    /// Cache that grows without bound
    #[must_use]
    pub fn unbounded() -> Self {
        Self::with_store(Store::Unbounded(DashMap::new()))
    }

    /// Cache that stores nothing
    #[must_use]
    pub fn disabled() -> Self {
        Self::with_store(Store::Disabled)
    }

    fn with_store(store: Store) -> Self {
        Self {
            store,
            stats: CacheStats::default(),
        }
    }

    /// Build the cache key for a candidate/keyword pair
    #[must_use]
    pub fn key(candidate: &str, keyword: &str) -> String {
        format!("{}:{}", candidate.to_lowercase(), keyword.to_lowercase())
    }

    /// Cached score, if present
    pub fn get(&self, candidate: &str, keyword: &str) -> Option<f64> {
        let key = Self::key(candidate, keyword);
        let found = match &self.store {
            Store::Lru(lru) => lru.lock().get(&key).copied(),
            Store::Unbounded(map) => map.get(&key).map(|v| *v),
            Store::Disabled => None,
        };
        let counter = if found.is_some() {
            &self.stats.hits
        } else {
            &self.stats.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    /// Store a score
    pub fn put(&self, candidate: &str, keyword: &str, score: f64) {
        let key = Self::key(candidate, keyword);
        match &self.store {
            Store::Lru(lru) => {
                if let Some((evicted, _)) = lru.lock().push(key.clone(), score) {
                    if evicted != key {
                        self.stats.evictions.fetch_add(1, Ordering::Relaxed);
                    }
                }
            }
            Store::Unbounded(map) => {
                map.insert(key, score);
            }
            Store::Disabled => {}
        }
    }

    /// Cached score, or compute, store and return it
    pub fn get_or_insert_with(
        &self,
        candidate: &str,
        keyword: &str,
        compute: impl FnOnce() -> f64,
    ) -> f64 {
        if let Some(score) = self.get(candidate, keyword) {
            return score;
        }
        let score = compute();
        self.put(candidate, keyword, score);
        score
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        match &self.store {
            Store::Lru(lru) => lru.lock().len(),
            Store::Unbounded(map) => map.len(),
            Store::Disabled => 0,
        }
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry (statistics are kept)
    pub fn clear(&self) {
        match &self.store {
            Store::Lru(lru) => lru.lock().clear(),
            Store::Unbounded(map) => map.clear(),
            Store::Disabled => {}
        }
    }

    /// Current statistics
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> CacheStatsSnapshot {
        let hits = self.stats.hits.load(Ordering::Relaxed);
        let misses = self.stats.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        CacheStatsSnapshot {
            hits,
            misses,
            evictions: self.stats.evictions.load(Ordering::Relaxed),
            size: self.len(),
            hit_rate: if total == 0 {
                0.0
            } else {
                hits as f64 / total as f64
            },
        }
    }
}

impl Default for SimilarityCache {
    fn default() -> Self {
        Self::new(CachePolicy::Lru, 10_000)
    }
}

impl std::fmt::Debug for SimilarityCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let policy = match self.store {
            Store::Lru(_) => CachePolicy::Lru,
            Store::Unbounded(_) => CachePolicy::Unbounded,
            Store::Disabled => CachePolicy::Disabled,
        };
        f.debug_struct("SimilarityCache")
            .field("policy", &policy)
            .field("size", &self.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_case_insensitive() {
        assert_eq!(SimilarityCache::key("Fox", "DOG"), "fox:dog");
    }

    #[test]
    fn hit_after_put() {
        let cache = SimilarityCache::default();
        assert_eq!(cache.get("fox", "dog"), None);
        cache.put("Fox", "dog", 0.55);
        assert_eq!(cache.get("fox", "Dog"), Some(0.55));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
        assert!((stats.hit_rate - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn get_or_insert_skips_compute_on_hit() {
        let cache = SimilarityCache::unbounded();
        let mut calls = 0;
        let first = cache.get_or_insert_with("word", "kw", || {
            calls += 1;
            0.7
        });
        let second = cache.get_or_insert_with("word", "kw", || {
            calls += 1;
            0.1
        });
        assert!((first - 0.7).abs() < f64::EPSILON);
        assert!((second - 0.7).abs() < f64::EPSILON);
        assert_eq!(calls, 1);
    }

    #[test]
    fn lru_evicts_least_recently_used() {
        let cache = SimilarityCache::new(CachePolicy::Lru, 2);
        cache.put("a", "k", 0.1);
        cache.put("b", "k", 0.2);
        // touch "a" so "b" becomes the eviction victim
        assert!(cache.get("a", "k").is_some());
        cache.put("c", "k", 0.3);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("b", "k"), None);
        assert_eq!(cache.get("a", "k"), Some(0.1));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn overwriting_a_key_is_not_an_eviction() {
        let cache = SimilarityCache::new(CachePolicy::Lru, 1);
        cache.put("a", "k", 0.1);
        cache.put("a", "k", 0.1);
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn disabled_never_stores() {
        for cache in [
            SimilarityCache::disabled(),
            SimilarityCache::new(CachePolicy::Lru, 0),
        ] {
            cache.put("a", "k", 0.5);
            assert!(cache.is_empty());
            assert_eq!(cache.get("a", "k"), None);
        }
    }

    #[test]
    fn clear_empties_cache() {
        let cache = SimilarityCache::unbounded();
        cache.put("a", "k", 0.5);
        cache.clear();
        assert!(cache.is_empty());
    }
}
