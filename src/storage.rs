use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};

use async_trait::async_trait;

use crate::error::{StorageError, StorageResult};
use crate::filter::DogFilter;
use crate::model::{Dog, SortDirection, SortField};
use crate::pagination::DogSearchPagination;
use crate::traits::HasPrimaryKey;

/// The record store consumed by the search service
#[async_trait]
pub trait DogStorage: Send + Sync {
    /// Returns the ids of one page of matching records, in sort order, and the
    /// total number of matches under `filter`.
    async fn find_matching(
        &self,
        filter: &DogFilter,
        page: &DogSearchPagination,
    ) -> StorageResult<(Vec<String>, u64)>;

    /// Returns the records with the given ids. Order is unspecified and unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[String]) -> StorageResult<Vec<Dog>>;

    /// Returns every distinct breed, sorted alphabetically.
    async fn distinct_breeds(&self) -> StorageResult<Vec<String>>;
}

/// A fixed, in-memory record store
#[derive(Debug, Clone, Default)]
pub struct InMemoryDogStorage {
    dogs: Vec<Dog>,
    by_id: HashMap<String, usize>,
}

impl InMemoryDogStorage {
    /// Creates a store from a vector of records.
    pub fn new(dogs: Vec<Dog>) -> StorageResult<Self> {
        let mut by_id = HashMap::with_capacity(dogs.len());
        for (position, dog) in dogs.iter().enumerate() {
            if by_id.insert(dog.primary_key().to_string(), position).is_some() {
                return Err(StorageError::QueryFailed(format!(
                    "Duplicate primary key: {}",
                    dog.primary_key()
                )));
            }
        }
        Ok(Self { dogs, by_id })
    }

    pub fn len(&self) -> usize {
        self.dogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dogs.is_empty()
    }

    fn compare(a: &Dog, b: &Dog, field: SortField) -> Ordering {
        match field {
            SortField::Age => a.age.cmp(&b.age),
            SortField::Breed => a.breed.cmp(&b.breed),
            SortField::Name => a.name.cmp(&b.name),
        }
    }
}

#[async_trait]
impl DogStorage for InMemoryDogStorage {
    async fn find_matching(
        &self,
        filter: &DogFilter,
        page: &DogSearchPagination,
    ) -> StorageResult<(Vec<String>, u64)> {
        let sort = page.sort();
        let mut matching: Vec<&Dog> = self.dogs.iter().filter(|dog| filter.matches(dog)).collect();
        matching.sort_by(|a, b| {
            let ordering = Self::compare(a, b, sort.field);
            let ordering = match sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            ordering.then_with(|| a.id.cmp(&b.id))
        });

        let total = matching.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let ids = matching
            .into_iter()
            .skip(offset)
            .take(page.page_size() as usize)
            .map(|dog| dog.id.clone())
            .collect();
        Ok((ids, total))
    }

    async fn find_by_ids(&self, ids: &[String]) -> StorageResult<Vec<Dog>> {
        let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let mut positions: Vec<usize> = wanted
            .into_iter()
            .filter_map(|id| self.by_id.get(id).copied())
            .collect();
        positions.sort_unstable();
        Ok(positions.into_iter().map(|p| self.dogs[p].clone()).collect())
    }

    async fn distinct_breeds(&self) -> StorageResult<Vec<String>> {
        let breeds: BTreeSet<&str> = self.dogs.iter().map(|dog| dog.breed.as_str()).collect();
        Ok(breeds.into_iter().map(str::to_string).collect())
    }
}
