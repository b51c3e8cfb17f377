//! HTTP DTOs for book endpoints.

use serde::{Deserialize, Serialize};

use crate::application::SearchBooksResult;
use crate::domain::book::BookSummary;

/// Query parameters for `GET /api/books`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBooksParams {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBooksResponse {
    pub items: Vec<BookSummary>,
    pub page: u32,
    pub page_size: u32,
}

impl From<SearchBooksResult> for SearchBooksResponse {
    fn from(result: SearchBooksResult) -> Self {
        Self {
            items: result.items,
            page: result.page,
            page_size: result.page_size,
        }
    }
}
