use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;
use dog_search::{
    Dog, DogFilter, DogSearchPagination, DogStorage, InMemoryDogStorage, StorageError,
    StorageResult,
};

/// In-memory store that counts how often each operation reaches it
pub struct CountingStorage {
    inner: InMemoryDogStorage,
    find_matching_calls: AtomicUsize,
    find_by_ids_calls: AtomicUsize,
    distinct_breeds_calls: AtomicUsize,
}

#[allow(dead_code)]
impl CountingStorage {
    pub fn new(dogs: Vec<Dog>) -> Self {
        Self {
            inner: InMemoryDogStorage::new(dogs).unwrap(),
            find_matching_calls: AtomicUsize::new(0),
            find_by_ids_calls: AtomicUsize::new(0),
            distinct_breeds_calls: AtomicUsize::new(0),
        }
    }

    pub fn find_matching_calls(&self) -> usize {
        self.find_matching_calls.load(Ordering::SeqCst)
    }

    pub fn find_by_ids_calls(&self) -> usize {
        self.find_by_ids_calls.load(Ordering::SeqCst)
    }

    pub fn distinct_breeds_calls(&self) -> usize {
        self.distinct_breeds_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DogStorage for CountingStorage {
    async fn find_matching(
        &self,
        filter: &DogFilter,
        page: &DogSearchPagination,
    ) -> StorageResult<(Vec<String>, u64)> {
        self.find_matching_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_matching(filter, page).await
    }

    async fn find_by_ids(&self, ids: &[String]) -> StorageResult<Vec<Dog>> {
        self.find_by_ids_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_ids(ids).await
    }

    async fn distinct_breeds(&self) -> StorageResult<Vec<String>> {
        self.distinct_breeds_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.distinct_breeds().await
    }
}

/// A store that is always unreachable
#[allow(dead_code)]
pub struct FailingStorage;

#[async_trait]
impl DogStorage for FailingStorage {
    async fn find_matching(
        &self,
        _filter: &DogFilter,
        _page: &DogSearchPagination,
    ) -> StorageResult<(Vec<String>, u64)> {
        Err(StorageError::Unavailable("connection refused".to_string()))
    }

    async fn find_by_ids(&self, _ids: &[String]) -> StorageResult<Vec<Dog>> {
        Err(StorageError::Unavailable("connection refused".to_string()))
    }

    async fn distinct_breeds(&self) -> StorageResult<Vec<String>> {
        Err(StorageError::Unavailable("connection refused".to_string()))
    }
}

/// In-memory store whose breed listing and search block until released
#[allow(dead_code)]
pub struct GatedStorage {
    inner: InMemoryDogStorage,
    entered: Notify,
    release: Notify,
}

#[allow(dead_code)]
impl GatedStorage {
    pub fn new(dogs: Vec<Dog>) -> Self {
        Self {
            inner: InMemoryDogStorage::new(dogs).unwrap(),
            entered: Notify::new(),
            release: Notify::new(),
        }
    }

    /// Waits until a gated call has started
    pub async fn wait_until_entered(&self) {
        self.entered.notified().await;
    }

    /// Lets one gated call finish
    pub fn release(&self) {
        self.release.notify_one();
    }

    async fn gate(&self) {
        self.entered.notify_one();
        self.release.notified().await;
    }
}

#[async_trait]
impl DogStorage for GatedStorage {
    async fn find_matching(
        &self,
        filter: &DogFilter,
        page: &DogSearchPagination,
    ) -> StorageResult<(Vec<String>, u64)> {
        self.gate().await;
        self.inner.find_matching(filter, page).await
    }

    async fn find_by_ids(&self, ids: &[String]) -> StorageResult<Vec<Dog>> {
        self.inner.find_by_ids(ids).await
    }

    async fn distinct_breeds(&self) -> StorageResult<Vec<String>> {
        self.gate().await;
        self.inner.distinct_breeds().await
    }
}
