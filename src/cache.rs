use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

const NEVER_INVALIDATED: i64 = i64::MIN;

/// Statistics for cache operations
#[derive(Debug)]
pub struct CacheStatistics {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    invalidations: AtomicU64,
    /// Milliseconds since the epoch of the last invalidation
    last_invalidated_ms: AtomicI64,
}

impl Default for CacheStatistics {
    fn default() -> Self {
        Self {
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
            invalidations: AtomicU64::new(0),
            last_invalidated_ms: AtomicI64::new(NEVER_INVALIDATED),
        }
    }
}

impl CacheStatistics {
    /// Get the number of cache hits
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Get the number of cache misses
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Get the number of entries dropped for capacity or idleness
    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    /// Get the number of explicit removals and clears
    pub fn invalidations(&self) -> u64 {
        self.invalidations.load(Ordering::Relaxed)
    }

    /// Wall-clock time of the last explicit removal or clear
    pub fn last_invalidated(&self) -> Option<DateTime<Utc>> {
        match self.last_invalidated_ms.load(Ordering::Relaxed) {
            NEVER_INVALIDATED => None,
            millis => DateTime::from_timestamp_millis(millis),
        }
    }

    /// Calculate the cache hit rate (hits / (hits + misses))
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }

    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    fn record_invalidation(&self) {
        self.invalidations.fetch_add(1, Ordering::Relaxed);
        self.last_invalidated_ms.store(Utc::now().timestamp_millis(), Ordering::Relaxed);
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    last_accessed: Instant,
}

impl<V> CacheEntry<V> {
    fn new(value: V, now: Instant) -> Self {
        Self {
            value,
            last_accessed: now,
        }
    }

    fn is_idle(&self, expire_after_access: Option<Duration>, now: Instant) -> bool {
        expire_after_access
            .is_some_and(|idle| now.saturating_duration_since(self.last_accessed) > idle)
    }
}

/// Configuration for a single cache namespace
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries; least recently used entries go first. `None` is unbounded.
    pub max_entries: Option<usize>,
    /// Entries not read or written for this long are dropped. `None` never expires.
    pub expire_after_access: Option<Duration>,
}

impl CacheConfig {
    /// An unbounded configuration whose entries never expire
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the idle window after which an entry expires
    pub fn with_expire_after_access(mut self, idle: Duration) -> Self {
        self.expire_after_access = Some(idle);
        self
    }

    /// Bound the number of entries
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries);
        self
    }
}

/// A keyed memo table with idle expiry and LRU capacity eviction.
///
/// Idle entries are dropped when read, and by a sweep on insert that runs at most
/// once per idle window, so an entry outlives its window by at most one window
/// even if its key is never seen again.
pub struct ExpiringCache<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    /// Least recently used at the front. Only maintained when `max_entries` is set.
    access_order: VecDeque<K>,
    config: CacheConfig,
    statistics: CacheStatistics,
    last_sweep: Instant,
}

impl<K, V> ExpiringCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    /// Creates a new empty cache with the given configuration
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: HashMap::new(),
            access_order: VecDeque::new(),
            config,
            statistics: CacheStatistics::default(),
            last_sweep: Instant::now(),
        }
    }

    /// Gets a value and refreshes its idle timer.
    /// Returns None if the key is absent or its entry has gone idle.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let now = Instant::now();
        let idle = match self.entries.get(key) {
            Some(entry) => entry.is_idle(self.config.expire_after_access, now),
            None => {
                self.statistics.record_miss();
                return None;
            }
        };

        if idle {
            self.remove_internal(key);
            self.statistics.record_eviction();
            self.statistics.record_miss();
            return None;
        }

        let entry = self.entries.get_mut(key)?;
        entry.last_accessed = now;
        let value = entry.value.clone();
        self.touch(key);
        self.statistics.record_hit();
        Some(value)
    }

    /// Inserts or replaces a value, evicting the least recently used entry when full
    pub fn insert(&mut self, key: K, value: V) {
        let now = Instant::now();
        self.sweep_if_due(now);

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.value = value;
            entry.last_accessed = now;
            self.touch(&key);
            return;
        }

        if let Some(max_entries) = self.config.max_entries {
            while self.entries.len() >= max_entries && !self.access_order.is_empty() {
                self.evict_one();
            }
            self.access_order.push_back(key.clone());
        }

        self.entries.insert(key, CacheEntry::new(value, now));
    }

    /// Removes an entry, returning its value if present
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.statistics.record_invalidation();
        self.remove_internal(key)
    }

    /// Checks for a key without refreshing it or checking idleness
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of entries currently held, idle or not
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clears all entries
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.statistics.record_invalidation();
        }
        self.entries.clear();
        self.access_order.clear();
    }

    pub fn statistics(&self) -> &CacheStatistics {
        &self.statistics
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Drops every idle entry and returns how many were removed
    pub fn evict_expired(&mut self) -> usize {
        let now = Instant::now();
        self.last_sweep = now;
        let Some(idle) = self.config.expire_after_access else {
            return 0;
        };

        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_idle(Some(idle), now));
        let removed = before - self.entries.len();

        if removed > 0 {
            if self.config.max_entries.is_some() {
                let entries = &self.entries;
                self.access_order.retain(|k| entries.contains_key(k));
            }
            for _ in 0..removed {
                self.statistics.record_eviction();
            }
            tracing::debug!("Evicted {} idle cache entries", removed);
        }
        removed
    }

    fn sweep_if_due(&mut self, now: Instant) {
        if let Some(idle) = self.config.expire_after_access {
            if now.saturating_duration_since(self.last_sweep) >= idle {
                self.evict_expired();
            }
        }
    }

    fn touch(&mut self, key: &K) {
        if self.config.max_entries.is_some() {
            self.access_order.retain(|k| k != key);
            self.access_order.push_back(key.clone());
        }
    }

    fn remove_internal(&mut self, key: &K) -> Option<V> {
        if self.config.max_entries.is_some() {
            self.access_order.retain(|k| k != key);
        }
        self.entries.remove(key).map(|entry| entry.value)
    }

    fn evict_one(&mut self) {
        if let Some(key) = self.access_order.pop_front() {
            tracing::debug!("Evicting least recently used cache entry {:?}", key);
            self.entries.remove(&key);
            self.statistics.record_eviction();
        }
    }
}
