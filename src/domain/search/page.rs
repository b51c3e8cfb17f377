//! Page requests and the outcomes of applying their responses.

use serde::Serialize;

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A page fetch issued by a [`SearchSession`](super::SearchSession).
///
/// The request remembers the query generation and page it was issued for so
/// the session can recognise a late response after the query has moved on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub(super) generation: u64,
    pub(super) query: String,
    pub(super) page_index: u32,
    pub(super) page_size: u32,
}

impl PageRequest {
    /// Query text the page is fetched for.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Zero-based page cursor.
    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    /// One-based page number sent to the search service.
    pub fn page(&self) -> u32 {
        self.page_index + 1
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Result of feeding a page response back into the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// Items were merged; `added` counts the ones not seen before.
    Merged { added: usize, has_more: bool },
    /// The fetch failed; `message` is what the user sees.
    Failed { message: String },
    /// The response belongs to a superseded query or page and was dropped.
    Stale,
}
