//! Previous/next links for search pages.
//!
//! Links are produced by patching the caller's raw query string token by token.
//! Tokens other than `from=` and `size=` keep their original text and position,
//! including their percent-encoding, so the query is never parsed into a map.

use serde::{Deserialize, Serialize};

use crate::model::{SearchRequest, SearchResult};

/// Path every navigation link points at
pub const SEARCH_PATH: &str = "/dogs/search";

const FROM_PREFIX: &str = "from=";
const SIZE_PREFIX: &str = "size=";

/// Builds a link to the page starting at `from`.
///
/// The first `from=` token gets the new value and later ones are dropped. The
/// first `size=` token is kept as is and later ones are dropped; `size` is only
/// used when the query has none. Missing tokens are appended, `size` before `from`.
pub fn build_navigation(query: &str, from: u64, size: u32) -> String {
    let mut tokens: Vec<String> = Vec::new();
    let mut from_exists = false;
    let mut size_exists = false;

    for token in split_query(query) {
        if token.starts_with(FROM_PREFIX) {
            if !from_exists {
                tokens.push(format!("{FROM_PREFIX}{from}"));
                from_exists = true;
            }
        } else if token.starts_with(SIZE_PREFIX) {
            if !size_exists {
                tokens.push(token.to_string());
                size_exists = true;
            }
        } else {
            tokens.push(token.to_string());
        }
    }

    if !size_exists {
        tokens.push(format!("{SIZE_PREFIX}{size}"));
    }
    if !from_exists {
        tokens.push(format!("{FROM_PREFIX}{from}"));
    }
    format!("{SEARCH_PATH}?{}", tokens.join("&"))
}

/// Splits on `&`. A blank query has no tokens and trailing empty tokens are dropped.
fn split_query(query: &str) -> Vec<&str> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let mut tokens: Vec<&str> = query.split('&').collect();
    while tokens.last().is_some_and(|t| t.is_empty()) {
        tokens.pop();
    }
    tokens
}

/// Response body of a search: one page of ids, the total, and adjacent-page links
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(rename = "prev", skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    pub result_ids: Vec<String>,
    pub total: u64,
}

impl SearchResponse {
    /// Combines a search result with links derived from the original query string.
    ///
    /// `next` is present while `from + size < total`, `prev` while `from - size >= 0`.
    pub fn assemble(request: &SearchRequest, query: &str, result: SearchResult) -> Self {
        let size = request.size;
        let next_from = u64::from(request.from) + u64::from(size);
        let next = (next_from < result.total).then(|| build_navigation(query, next_from, size));
        let previous = request
            .from
            .checked_sub(size)
            .map(|previous_from| build_navigation(query, u64::from(previous_from), size));

        Self {
            next,
            previous,
            result_ids: result.ids,
            total: result.total,
        }
    }
}
