use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::dog_cache::{CacheNamespace, DogCaches, SearchCacheKey};
use crate::error::CoreResult;
use crate::model::{Dog, SearchRequest, SearchResult};
use crate::navigation::SearchResponse;
use crate::search::search_dogs;
use crate::storage::DogStorage;
use crate::traits::HasPrimaryKey;

/// Dog operations over a record store, memoized through [`DogCaches`].
///
/// Without caches every call goes to the store.
#[derive(Clone)]
pub struct DogService {
    storage: Arc<dyn DogStorage>,
    caches: Option<Arc<DogCaches>>,
}

impl DogService {
    pub fn new(storage: Arc<dyn DogStorage>, caches: Arc<DogCaches>) -> Self {
        Self {
            storage,
            caches: Some(caches),
        }
    }

    /// A service that always recomputes
    pub fn without_cache(storage: Arc<dyn DogStorage>) -> Self {
        Self {
            storage,
            caches: None,
        }
    }

    pub fn caches(&self) -> Option<&Arc<DogCaches>> {
        self.caches.as_ref()
    }

    fn generation(&self, namespace: CacheNamespace) -> Option<(&DogCaches, u64)> {
        self.caches
            .as_deref()
            .map(|caches| (caches, caches.generation(namespace)))
    }

    /// All breeds in alphabetical order. Cached until explicitly cleared.
    pub async fn breeds(&self) -> CoreResult<Vec<String>> {
        if let Some(breeds) = self.caches.as_ref().and_then(|c| c.get_breeds()) {
            debug!("Breed listing served from cache");
            return Ok(breeds);
        }

        let ticket = self.generation(CacheNamespace::Breeds);
        let breeds = self.storage.distinct_breeds().await?;
        if let Some((caches, generation)) = ticket {
            caches.put_breeds(generation, breeds.clone());
        }
        Ok(breeds)
    }

    /// Records for the given ids in input order. Unknown ids are skipped and a
    /// repeated id appears once, at its first position. Empty results are not cached.
    pub async fn list_dogs(&self, ids: &[String]) -> CoreResult<Vec<Dog>> {
        if let Some(dogs) = self.caches.as_ref().and_then(|c| c.get_list(ids)) {
            debug!("Lookup of {} ids served from cache", ids.len());
            return Ok(dogs);
        }

        let ticket = self.generation(CacheNamespace::Lists);
        let dogs = order_by_ids(ids, self.storage.find_by_ids(ids).await?);
        if let Some((caches, generation)) = ticket {
            caches.put_list(generation, ids, dogs.clone());
        }
        Ok(dogs)
    }

    /// Picks one of the given ids uniformly at random
    pub fn match_dog(&self, ids: &[String]) -> Option<String> {
        if ids.is_empty() {
            return None;
        }
        Some(ids[rand::random_range(0..ids.len())].clone())
    }

    /// One page of matching ids and the total. Results with no matches are not cached.
    pub async fn search_dogs(&self, request: &SearchRequest) -> CoreResult<SearchResult> {
        let key = SearchCacheKey::from(request);
        if let Some(result) = self.caches.as_ref().and_then(|c| c.get_search(&key)) {
            debug!("Search {} served from cache", key);
            return Ok(result);
        }

        let ticket = self.generation(CacheNamespace::Searches);
        let result = search_dogs(self.storage.as_ref(), request).await?;
        if let Some((caches, generation)) = ticket {
            caches.put_search(generation, key, result.clone());
        }
        Ok(result)
    }

    /// Searches and attaches previous/next links built from the raw query string
    pub async fn search_page(&self, request: &SearchRequest, query: &str) -> CoreResult<SearchResponse> {
        let result = self.search_dogs(request).await?;
        Ok(SearchResponse::assemble(request, query, result))
    }
}

fn order_by_ids(ids: &[String], dogs: Vec<Dog>) -> Vec<Dog> {
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(ids.len());
    for (position, id) in ids.iter().enumerate() {
        positions.entry(id.as_str()).or_insert(position);
    }

    let mut ordered: Vec<(usize, Dog)> = dogs
        .into_iter()
        .filter_map(|dog| positions.get(dog.primary_key()).map(|&p| (p, dog)))
        .collect();
    ordered.sort_by_key(|(position, _)| *position);
    ordered.dedup_by_key(|(position, _)| *position);
    ordered.into_iter().map(|(_, dog)| dog).collect()
}
