//! # Dog Search
//!
//! This crate provides the search-and-navigation core of a paginated dog lookup
//! service: filter composition, single-page offset pagination, memoized search
//! results, and previous/next links that patch the caller's original query string.
//!
//! ## Key Components
//!
//! - `DogFilter`: Conjunctive predicate over breed, zip code and age range
//! - `DogSearchPagination`: Offset + limit + sort descriptor for exactly one page
//! - `DogService`: Search, breed listing and id lookup over a `DogStorage`, cached through `DogCaches`
//! - `DogCaches`: Breed, lookup and search caches with per-namespace expiry
//! - `build_navigation`: Minimal rewrite of a raw query string into a page link
//! - `CacheInvalidationListener`: Clears the caches when the record store changes

mod cache;
mod dog_cache;
mod error;
mod filter;
mod listener;
mod model;
mod navigation;
mod pagination;
mod search;
mod service;
mod storage;
mod traits;

#[cfg(feature = "postgres-storage")]
mod db_init;
#[cfg(feature = "postgres-storage")]
mod postgres;

pub use cache::{CacheConfig, CacheStatistics, ExpiringCache};
pub use dog_cache::{
    CacheNamespace, DogCacheConfig, DogCaches, NamespaceStats, SearchCacheKey, DEFAULT_LIST_IDLE,
    DEFAULT_SEARCH_IDLE,
};
pub use error::{CoreResult, SearchError, StorageError, StorageResult};
pub use filter::{DogFilter, Predicate};
pub use model::{
    Dog, ParseSortError, SearchRequest, SearchResult, SortDirection, SortField, SortSpec,
    DEFAULT_PAGE_SIZE,
};
pub use navigation::{build_navigation, SearchResponse, SEARCH_PATH};
pub use pagination::DogSearchPagination;
pub use search::search_dogs;
pub use service::DogService;
pub use storage::{DogStorage, InMemoryDogStorage};
pub use traits::HasPrimaryKey;

// Re-export listener components
pub use listener::{CacheInvalidationListener, IngestionNotification, DEFAULT_INGESTION_CHANNEL, DOG_TABLE};

#[cfg(feature = "postgres-storage")]
pub use db_init::{cleanup_dog_schema, init_dog_schema};
#[cfg(feature = "postgres-storage")]
pub use postgres::PgDogStorage;
