//! On-demand cache of full problem records.
//!
//! Entries never expire. By default the cache is also unbounded, so every
//! problem ever requested stays resident for the life of the process. Set
//! [`DetailCacheConfig::max_entries`] to cap it; moka then evicts by its
//! frequency-aware LRU policy.

use moka::future::Cache;

use crate::telemetry;
use crate::types::DetailRecord;

/// Configuration for the detail cache.
///
/// ```rust
/// # use mimir::DetailCacheConfig;
/// let unbounded = DetailCacheConfig::default();
/// assert_eq!(unbounded.max_entries, None);
///
/// let bounded = DetailCacheConfig::new().max_entries(5_000);
/// assert_eq!(bounded.max_entries, Some(5_000));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailCacheConfig {
    /// Maximum cached records. `None` (default) means unbounded.
    pub max_entries: Option<u64>,
}

impl DetailCacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of cached records.
    pub fn max_entries(mut self, n: u64) -> Self {
        self.max_entries = Some(n);
        self
    }
}

/// Memoized detail records keyed by problem id.
///
/// Thread-safe; moka handles concurrent access. Concurrent puts for the
/// same id resolve last-write-wins.
pub struct DetailCache {
    entries: Cache<String, DetailRecord>,
}

impl DetailCache {
    pub fn new(config: &DetailCacheConfig) -> Self {
        let mut builder = Cache::builder();
        if let Some(max) = config.max_entries {
            builder = builder.max_capacity(max);
        }
        Self {
            entries: builder.build(),
        }
    }

    /// Look up a record. Emits hit/miss metrics.
    pub async fn get(&self, id: &str) -> Option<DetailRecord> {
        match self.entries.get(id).await {
            Some(record) => {
                metrics::counter!(telemetry::DETAIL_CACHE_HITS_TOTAL).increment(1);
                Some(record)
            }
            None => {
                metrics::counter!(telemetry::DETAIL_CACHE_MISSES_TOTAL).increment(1);
                None
            }
        }
    }

    /// Insert or overwrite the record for `id`.
    pub async fn put(&self, id: impl Into<String>, record: DetailRecord) {
        self.entries.insert(id.into(), record).await;
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Approximate number of cached records.
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached record.
    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }
}

impl Default for DetailCache {
    fn default() -> Self {
        Self::new(&DetailCacheConfig::default())
    }
}
