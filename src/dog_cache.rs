use std::fmt;
use std::hash::Hash;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::debug;

use crate::cache::{CacheConfig, ExpiringCache};
use crate::model::{Dog, SearchRequest, SearchResult, SortSpec};

/// Default idle window of the id-lookup namespace
pub const DEFAULT_LIST_IDLE: Duration = Duration::from_secs(60);

/// Default idle window of the search namespace
pub const DEFAULT_SEARCH_IDLE: Duration = Duration::from_secs(10 * 60);

/// The independent memo tables held by [`DogCaches`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheNamespace {
    Breeds,
    Lists,
    Searches,
}

impl CacheNamespace {
    pub const ALL: [CacheNamespace; 3] = [Self::Breeds, Self::Lists, Self::Searches];

    pub fn name(&self) -> &'static str {
        match self {
            CacheNamespace::Breeds => "breeds",
            CacheNamespace::Lists => "lists",
            CacheNamespace::Searches => "searches",
        }
    }
}

/// Key of the search namespace.
///
/// Built from every parameter that affects a search result. List parameters are
/// kept positionally, so the same breeds in another order form a different key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchCacheKey {
    age_max: Option<u32>,
    age_min: Option<u32>,
    breeds: Option<Vec<String>>,
    from: u32,
    size: u32,
    sort: SortSpec,
    zip_codes: Option<Vec<String>>,
}

impl From<&SearchRequest> for SearchCacheKey {
    fn from(request: &SearchRequest) -> Self {
        Self {
            age_max: request.age_max,
            age_min: request.age_min,
            breeds: request.breeds.clone(),
            from: request.from,
            size: request.size,
            sort: request.sort,
            zip_codes: request.zip_codes.clone(),
        }
    }
}

fn write_opt<T: fmt::Display>(f: &mut fmt::Formatter<'_>, value: &Option<T>) -> fmt::Result {
    match value {
        Some(value) => write!(f, "{value}"),
        None => f.write_str("null"),
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, values: &Option<Vec<String>>) -> fmt::Result {
    match values {
        Some(values) => write!(f, "[{}]", values.join(", ")),
        None => f.write_str("null"),
    }
}

impl fmt::Display for SearchCacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_opt(f, &self.age_max)?;
        f.write_str("_")?;
        write_opt(f, &self.age_min)?;
        f.write_str("_")?;
        write_list(f, &self.breeds)?;
        write!(f, "_{}_{}_{}_", self.from, self.size, self.sort)?;
        write_list(f, &self.zip_codes)
    }
}

/// Per-namespace cache policies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DogCacheConfig {
    pub breeds: CacheConfig,
    pub lists: CacheConfig,
    pub searches: CacheConfig,
}

impl Default for DogCacheConfig {
    fn default() -> Self {
        Self {
            breeds: CacheConfig::new(),
            lists: CacheConfig::new().with_expire_after_access(DEFAULT_LIST_IDLE),
            searches: CacheConfig::new().with_expire_after_access(DEFAULT_SEARCH_IDLE),
        }
    }
}

/// Point-in-time counters of one namespace
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NamespaceStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub invalidations: u64,
    pub hit_rate: f64,
    pub generation: u64,
    pub last_invalidated: Option<DateTime<Utc>>,
}

/// A cache plus the number of times it has been cleared.
///
/// A value computed before a clear carries the old generation and is refused.
struct Namespace<K, V> {
    cache: ExpiringCache<K, V>,
    generation: u64,
}

impl<K, V> Namespace<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone,
{
    fn new(config: CacheConfig) -> Self {
        Self {
            cache: ExpiringCache::new(config),
            generation: 0,
        }
    }

    fn insert_if_current(&mut self, generation: u64, key: K, value: V) -> bool {
        if generation != self.generation {
            debug!(
                "Dropping value computed in generation {} after a clear (now {})",
                generation, self.generation
            );
            return false;
        }
        self.cache.insert(key, value);
        true
    }

    fn clear(&mut self) {
        self.cache.clear();
        self.generation += 1;
    }

    fn snapshot(&self) -> NamespaceStats {
        let statistics = self.cache.statistics();
        NamespaceStats {
            entries: self.cache.len(),
            hits: statistics.hits(),
            misses: statistics.misses(),
            evictions: statistics.evictions(),
            invalidations: statistics.invalidations(),
            hit_rate: statistics.hit_rate(),
            generation: self.generation,
            last_invalidated: statistics.last_invalidated(),
        }
    }
}

/// The shared result caches of the search service.
///
/// Every namespace is guarded by its own lock. Lookups and stores are separate
/// critical sections, so two callers missing on the same key both compute it.
/// Callers read [`DogCaches::generation`] before computing a value and pass it
/// to the matching `put_*`; a clear in between makes the store a no-op.
pub struct DogCaches {
    breeds: RwLock<Namespace<(), Vec<String>>>,
    lists: RwLock<Namespace<Vec<String>, Vec<Dog>>>,
    searches: RwLock<Namespace<SearchCacheKey, SearchResult>>,
}

impl DogCaches {
    pub fn new(config: DogCacheConfig) -> Self {
        Self {
            breeds: RwLock::new(Namespace::new(config.breeds)),
            lists: RwLock::new(Namespace::new(config.lists)),
            searches: RwLock::new(Namespace::new(config.searches)),
        }
    }

    /// Current clear count of a namespace
    pub fn generation(&self, namespace: CacheNamespace) -> u64 {
        match namespace {
            CacheNamespace::Breeds => self.breeds.read().generation,
            CacheNamespace::Lists => self.lists.read().generation,
            CacheNamespace::Searches => self.searches.read().generation,
        }
    }

    pub fn get_breeds(&self) -> Option<Vec<String>> {
        self.breeds.write().cache.get(&())
    }

    /// Stores the breed listing unless the namespace was cleared since `generation`
    pub fn put_breeds(&self, generation: u64, breeds: Vec<String>) -> bool {
        self.breeds.write().insert_if_current(generation, (), breeds)
    }

    pub fn get_list(&self, ids: &[String]) -> Option<Vec<Dog>> {
        self.lists.write().cache.get(&ids.to_vec())
    }

    /// Stores a lookup result unless it is empty or stale. Returns whether it was retained.
    pub fn put_list(&self, generation: u64, ids: &[String], dogs: Vec<Dog>) -> bool {
        if dogs.is_empty() {
            debug!("Not caching empty lookup for {} ids", ids.len());
            return false;
        }
        self.lists.write().insert_if_current(generation, ids.to_vec(), dogs)
    }

    pub fn get_search(&self, key: &SearchCacheKey) -> Option<SearchResult> {
        self.searches.write().cache.get(key)
    }

    /// Stores a search result unless it matched nothing or is stale. Returns whether it was retained.
    pub fn put_search(&self, generation: u64, key: SearchCacheKey, result: SearchResult) -> bool {
        if result.total == 0 {
            debug!("Not caching search with no matches: {}", key);
            return false;
        }
        self.searches.write().insert_if_current(generation, key, result)
    }

    /// Number of entries held by a namespace
    pub fn len(&self, namespace: CacheNamespace) -> usize {
        match namespace {
            CacheNamespace::Breeds => self.breeds.read().cache.len(),
            CacheNamespace::Lists => self.lists.read().cache.len(),
            CacheNamespace::Searches => self.searches.read().cache.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        CacheNamespace::ALL.iter().all(|ns| self.len(*ns) == 0)
    }

    pub fn clear(&self, namespace: CacheNamespace) {
        debug!("Clearing '{}' cache", namespace.name());
        match namespace {
            CacheNamespace::Breeds => self.breeds.write().clear(),
            CacheNamespace::Lists => self.lists.write().clear(),
            CacheNamespace::Searches => self.searches.write().clear(),
        }
    }

    pub fn clear_all(&self) {
        for namespace in CacheNamespace::ALL {
            self.clear(namespace);
        }
    }

    /// Drops idle entries from every namespace and returns how many were removed
    pub fn evict_expired(&self) -> usize {
        self.breeds.write().cache.evict_expired()
            + self.lists.write().cache.evict_expired()
            + self.searches.write().cache.evict_expired()
    }

    pub fn stats(&self, namespace: CacheNamespace) -> NamespaceStats {
        match namespace {
            CacheNamespace::Breeds => self.breeds.read().snapshot(),
            CacheNamespace::Lists => self.lists.read().snapshot(),
            CacheNamespace::Searches => self.searches.read().snapshot(),
        }
    }
}

impl Default for DogCaches {
    fn default() -> Self {
        Self::new(DogCacheConfig::default())
    }
}
