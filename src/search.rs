use tracing::debug;

use crate::error::CoreResult;
use crate::filter::DogFilter;
use crate::model::{SearchRequest, SearchResult};
use crate::pagination::DogSearchPagination;
use crate::storage::DogStorage;

/// Runs one uncached search: builds the filter and a single-page descriptor
/// from the request and hands both to the store.
///
/// A `from` past the last match yields no ids and the real total.
pub async fn search_dogs(storage: &dyn DogStorage, request: &SearchRequest) -> CoreResult<SearchResult> {
    let filter = DogFilter::build(
        request.breeds.as_deref(),
        request.zip_codes.as_deref(),
        request.age_min,
        request.age_max,
    );
    let pagination = DogSearchPagination::new(request.size, u64::from(request.from), request.sort);

    let (ids, total) = storage.find_matching(&filter, &pagination).await?;
    debug!(
        "Search at offset {} with {} predicates matched {} dogs, returning {}",
        pagination.offset(),
        filter.predicates().len(),
        total,
        ids.len()
    );
    Ok(SearchResult::new(ids, total))
}
