mod common;

use std::collections::HashSet;
use std::sync::Arc;

use common::{sample_dogs, CountingStorage, FailingStorage};
use dog_search::{
    search_dogs, DogService, InMemoryDogStorage, SearchError, SearchRequest, StorageError,
};

fn storage() -> InMemoryDogStorage {
    InMemoryDogStorage::new(sample_dogs()).unwrap()
}

fn id_set(ids: &[String]) -> HashSet<String> {
    ids.iter().cloned().collect()
}

#[tokio::test]
async fn test_no_filters_match_every_dog() {
    let storage = storage();
    let result = search_dogs(&storage, &SearchRequest::default().with_size(100)).await.unwrap();
    assert_eq!(result.total, storage.len() as u64);
    assert_eq!(result.ids.len(), storage.len());
}

#[tokio::test]
async fn test_empty_lists_match_every_dog() {
    let storage = storage();
    let request = SearchRequest::default()
        .with_breeds(Vec::<String>::new())
        .with_zip_codes(Vec::<String>::new());
    let result = search_dogs(&storage, &request).await.unwrap();
    assert_eq!(result.total, 12);
}

#[tokio::test]
async fn test_breed_union_is_superset() {
    let storage = storage();
    let akita = search_dogs(&storage, &SearchRequest::default().with_breeds(["Akita"]))
        .await
        .unwrap();
    let both = search_dogs(&storage, &SearchRequest::default().with_breeds(["Akita", "Poodle"]))
        .await
        .unwrap();

    assert_eq!(akita.total, 3);
    assert_eq!(both.total, 7);
    assert!(id_set(&akita.ids).is_subset(&id_set(&both.ids)));
}

#[tokio::test]
async fn test_zip_codes_narrow_breeds() {
    let storage = storage();
    let akita = search_dogs(&storage, &SearchRequest::default().with_breeds(["Akita"]))
        .await
        .unwrap();
    let akita_in_zip = search_dogs(
        &storage,
        &SearchRequest::default().with_breeds(["Akita"]).with_zip_codes(["10001"]),
    )
    .await
    .unwrap();

    assert_eq!(akita_in_zip.ids, vec!["s8D-OZUBBPFf4ZNZzA1l"]);
    assert!(id_set(&akita_in_zip.ids).is_subset(&id_set(&akita.ids)));
}

#[tokio::test]
async fn test_age_range_is_inclusive() {
    let storage = storage();
    let request = SearchRequest::default().with_age_min(3).with_age_max(7);
    let result = search_dogs(&storage, &request).await.unwrap();
    assert_eq!(result.total, 5);
}

#[tokio::test]
async fn test_short_last_page() {
    let storage = storage();
    let result = search_dogs(&storage, &SearchRequest::default().with_size(5).with_from(10))
        .await
        .unwrap();
    assert_eq!(result.total, 12);
    assert_eq!(result.ids.len(), 2);
}

#[tokio::test]
async fn test_from_beyond_total() {
    let storage = storage();
    let result = search_dogs(&storage, &SearchRequest::default().with_size(5).with_from(20))
        .await
        .unwrap();
    assert_eq!(result.total, 12);
    assert!(result.ids.is_empty());
}

#[tokio::test]
async fn test_page_never_exceeds_size() {
    let storage = storage();
    for size in 1..=13 {
        for from in 0..=13 {
            let request = SearchRequest::default().with_size(size).with_from(from);
            let result = search_dogs(&storage, &request).await.unwrap();
            let expected = (result.total.saturating_sub(u64::from(from))).min(u64::from(size));
            assert_eq!(result.ids.len() as u64, expected, "size={size} from={from}");
        }
    }
}

#[tokio::test]
async fn test_sort_orders() {
    let storage = storage();

    let by_breed = search_dogs(&storage, &SearchRequest::default().with_size(3)).await.unwrap();
    assert_eq!(
        by_breed.ids,
        vec!["qcD-OZUBBPFf4ZNZzDCC", "rcD-OZUBBPFf4ZNZzDCC", "s8D-OZUBBPFf4ZNZzA1l"]
    );

    let by_age = search_dogs(
        &storage,
        &SearchRequest::default().with_size(2).with_sort("age:desc".parse().unwrap()),
    )
    .await
    .unwrap();
    assert_eq!(by_age.ids, vec!["qcD-OZUBBPFf4ZNZzDCC", "xMD-OZUBBPFf4ZNZzCp9"]);

    let by_name = search_dogs(
        &storage,
        &SearchRequest::default().with_size(1).with_sort("name:asc".parse().unwrap()),
    )
    .await
    .unwrap();
    assert_eq!(by_name.ids, vec!["n8D-OZUBBPFf4ZNZzCt-"]);
}

#[tokio::test]
async fn test_search_is_deterministic() {
    let storage = storage();
    let request = SearchRequest::default().with_breeds(["Poodle", "Doberman"]).with_size(4);
    let first = search_dogs(&storage, &request).await.unwrap();
    let second = search_dogs(&storage, &request).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_storage_error_propagates() {
    let service = DogService::without_cache(Arc::new(FailingStorage));
    let err = service.search_dogs(&SearchRequest::default()).await.unwrap_err();
    assert!(matches!(err, SearchError::Storage(StorageError::Unavailable(_))));

    assert!(service.breeds().await.is_err());
    assert!(service.list_dogs(&["a".to_string()]).await.is_err());
}

#[tokio::test]
async fn test_search_page_links() {
    let storage = Arc::new(CountingStorage::new(sample_dogs()));
    let service = DogService::without_cache(storage);
    let request = SearchRequest::default()
        .with_breeds(["Poodle"])
        .with_size(2)
        .with_from(2);

    let response = service
        .search_page(&request, "breeds=Poodle&size=2&from=2")
        .await
        .unwrap();

    assert_eq!(response.total, 4);
    assert_eq!(response.result_ids.len(), 2);
    assert_eq!(response.next, None);
    assert_eq!(response.previous.as_deref(), Some("/dogs/search?breeds=Poodle&size=2&from=0"));
}

#[tokio::test]
async fn test_match_dog_picks_from_input() {
    let service = DogService::without_cache(Arc::new(storage()));
    let ids = common::strings(&["n8D-OZUBBPFf4ZNZzCt-", "gcD-OZUBBPFf4ZNZzAli", "G8D-OZUBBPFf4ZNZzBxx"]);
    for _ in 0..20 {
        let picked = service.match_dog(&ids).unwrap();
        assert!(ids.contains(&picked));
    }
    assert_eq!(service.match_dog(&[]), None);
}
