//! SearchBooksHandler - Query handler for one page of catalogue results.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::book::BookSummary;
use crate::ports::{BookSearchError, BookSearchService};

/// Query for one page of search results.
#[derive(Debug, Clone)]
pub struct SearchBooksQuery {
    pub query: String,
    pub page: u32,
    pub page_size: u32,
}

/// One page of results, echoing the page actually served.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchBooksResult {
    pub items: Vec<BookSummary>,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchBooksError {
    #[error("search query must not be blank")]
    BlankQuery,

    #[error("page {0} is out of range")]
    PageOutOfRange(u32),

    #[error(transparent)]
    Search(#[from] BookSearchError),
}

/// Handler for catalogue searches.
///
/// Normalizes paging before reaching the catalogue: pages start at 1 and
/// the page size is clamped to `1..=max_page_size`. A page whose first
/// item index does not fit in a `u32` is rejected.
pub struct SearchBooksHandler {
    service: Arc<dyn BookSearchService>,
    max_page_size: u32,
}

impl SearchBooksHandler {
    pub fn new(service: Arc<dyn BookSearchService>, max_page_size: u32) -> Self {
        Self {
            service,
            max_page_size: max_page_size.max(1),
        }
    }

    pub async fn handle(
        &self,
        query: SearchBooksQuery,
    ) -> Result<SearchBooksResult, SearchBooksError> {
        let text = query.query.trim();
        if text.is_empty() {
            return Err(SearchBooksError::BlankQuery);
        }

        let page = query.page.max(1);
        let page_size = query.page_size.clamp(1, self.max_page_size);
        if (page - 1).checked_mul(page_size).is_none() {
            return Err(SearchBooksError::PageOutOfRange(page));
        }

        let items = self
            .service
            .search(text, page, page_size)
            .await?
            .into_iter()
            .map(BookSummary::into_secure)
            .collect();

        Ok(SearchBooksResult {
            items,
            page,
            page_size,
        })
    }
}
