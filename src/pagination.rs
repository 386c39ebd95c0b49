use tracing::error;

use crate::error::{CoreResult, SearchError};
use crate::model::SortSpec;

/// An offset-based page request that covers exactly one page.
///
/// The position of the page is carried entirely by `offset`. There is no
/// successor or predecessor: to move, build a new descriptor with another
/// offset. [`next`](Self::next) and [`with_page`](Self::with_page) always fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DogSearchPagination {
    limit: u32,
    offset: u64,
    sort: SortSpec,
}

impl DogSearchPagination {
    pub fn new(limit: u32, offset: u64, sort: SortSpec) -> Self {
        Self { limit, offset, sort }
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Maximum number of ids in the page
    pub fn page_size(&self) -> u32 {
        self.limit
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    /// Always 0; the descriptor holds no page-cursor state.
    pub fn page_number(&self) -> u32 {
        0
    }

    /// Always false; previous-page existence is derived from offset and total by the caller.
    pub fn has_previous(&self) -> bool {
        false
    }

    /// The same descriptor, since this is the only page it knows about.
    pub fn first(&self) -> Self {
        *self
    }

    pub fn previous_or_first(&self) -> Self {
        self.first()
    }

    /// Not supported.
    ///
    /// # Errors
    ///
    /// Always returns [`SearchError::UnsupportedPagination`].
    pub fn next(&self) -> CoreResult<Self> {
        error!("next() called on single-page descriptor at offset {}", self.offset);
        Err(SearchError::UnsupportedPagination("next"))
    }

    /// Not supported.
    ///
    /// # Errors
    ///
    /// Always returns [`SearchError::UnsupportedPagination`].
    pub fn with_page(&self, page_number: u32) -> CoreResult<Self> {
        error!(
            "with_page({}) called on single-page descriptor at offset {}",
            page_number, self.offset
        );
        Err(SearchError::UnsupportedPagination("with_page"))
    }
}
