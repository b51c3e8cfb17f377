//! SearchSession - incremental paginated search state.
//!
//! The session is a synchronous state machine. It never performs I/O: it
//! hands out [`PageRequest`]s and expects each response to come back through
//! [`SearchSession::apply_page`]. Every change of the effective query bumps
//! the session generation, which is how responses for superseded queries are
//! recognised and dropped.
//!
//! ```text
//! set_query ──(debounce)──► commit_query ──► PageRequest(page 0)
//!                                                  │
//! load_next_page ──► PageRequest(page n) ──► apply_page ──► Merged | Failed | Stale
//! ```

use serde::Serialize;
use std::collections::HashSet;

use crate::domain::book::BookSummary;
use crate::domain::foundation::BookId;

use super::page::{PageOutcome, PageRequest, DEFAULT_PAGE_SIZE};

/// Why a page fetch failed, as far as the user needs to know.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailure {
    RateLimited,
    Unavailable,
}

impl FetchFailure {
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchFailure::RateLimited => "Rate limit exceeded. Please try again later.",
            FetchFailure::Unavailable => "Failed to fetch books",
        }
    }
}

/// State of one search-as-you-type session.
#[derive(Debug, Clone)]
pub struct SearchSession {
    raw_query: String,
    effective_query: String,
    results: Vec<BookSummary>,
    seen_ids: HashSet<BookId>,
    page_index: u32,
    loaded_pages: u32,
    has_more: bool,
    is_loading: bool,
    error: Option<String>,
    generation: u64,
    page_size: u32,
    in_flight: Option<(u64, u32)>,
}

impl SearchSession {
    pub fn new(page_size: u32) -> Self {
        Self {
            raw_query: String::new(),
            effective_query: String::new(),
            results: Vec::new(),
            seen_ids: HashSet::new(),
            page_index: 0,
            loaded_pages: 0,
            has_more: true,
            is_loading: false,
            error: None,
            generation: 0,
            page_size: page_size.max(1),
            in_flight: None,
        }
    }

    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    pub fn effective_query(&self) -> &str {
        &self.effective_query
    }

    pub fn results(&self) -> &[BookSummary] {
        &self.results
    }

    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Records the latest keystroke value. Nothing is fetched until the
    /// value is committed.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.raw_query = text.into();
    }

    /// Promotes the raw query to the effective query (the debounce fired).
    ///
    /// Returns the request for page 0 when the effective query changed to a
    /// non-blank value. A blank query clears the results without fetching.
    pub fn commit_query(&mut self) -> Option<PageRequest> {
        if self.raw_query == self.effective_query {
            return None;
        }
        self.effective_query = self.raw_query.clone();
        self.start_generation();

        if self.effective_query.trim().is_empty() {
            return None;
        }
        Some(self.issue(0))
    }

    /// Requests the next unloaded page.
    ///
    /// Returns `None` while a fetch is in flight, after the last page, or
    /// when there is no query; calling it repeatedly is therefore safe.
    pub fn load_next_page(&mut self) -> Option<PageRequest> {
        if self.is_loading || !self.has_more || self.effective_query.trim().is_empty() {
            return None;
        }
        Some(self.issue(self.loaded_pages))
    }

    /// Feeds a page response back into the session.
    ///
    /// Responses whose request no longer matches the in-flight fetch are
    /// discarded without touching any state.
    pub fn apply_page(
        &mut self,
        request: &PageRequest,
        response: Result<Vec<BookSummary>, FetchFailure>,
    ) -> PageOutcome {
        if self.in_flight != Some((request.generation, request.page_index)) {
            return PageOutcome::Stale;
        }
        self.in_flight = None;
        self.is_loading = false;

        match response {
            Ok(items) => {
                let returned = items.len();
                let added = self.merge(items);
                self.loaded_pages = request.page_index + 1;
                self.has_more = returned == self.page_size as usize;
                self.error = None;
                PageOutcome::Merged {
                    added,
                    has_more: self.has_more,
                }
            }
            Err(failure) => {
                let message = failure.user_message().to_string();
                self.error = Some(message.clone());
                self.page_index = self.loaded_pages.saturating_sub(1);
                PageOutcome::Failed { message }
            }
        }
    }

    /// Returns the session to its initial state. In-flight responses become stale.
    pub fn reset(&mut self) {
        self.raw_query.clear();
        self.effective_query.clear();
        self.start_generation();
    }

    /// Owned copy of everything a results view renders.
    pub fn snapshot(&self) -> SearchSnapshot {
        SearchSnapshot {
            query: self.effective_query.clone(),
            results: self.results.clone(),
            page_index: self.page_index,
            has_more: self.has_more,
            is_loading: self.is_loading,
            error: self.error.clone(),
        }
    }

    fn start_generation(&mut self) {
        self.generation += 1;
        self.results.clear();
        self.seen_ids.clear();
        self.page_index = 0;
        self.loaded_pages = 0;
        self.has_more = true;
        self.is_loading = false;
        self.error = None;
        self.in_flight = None;
    }

    fn issue(&mut self, page_index: u32) -> PageRequest {
        self.page_index = page_index;
        self.is_loading = true;
        self.in_flight = Some((self.generation, page_index));
        PageRequest {
            generation: self.generation,
            query: self.effective_query.trim().to_string(),
            page_index,
            page_size: self.page_size,
        }
    }

    fn merge(&mut self, items: Vec<BookSummary>) -> usize {
        let mut added = 0;
        for item in items {
            if self.seen_ids.insert(item.id.clone()) {
                self.results.push(item.into_secure());
                added += 1;
            }
        }
        added
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// Render-ready view of a [`SearchSession`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSnapshot {
    pub query: String,
    pub results: Vec<BookSummary>,
    pub page_index: u32,
    pub has_more: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}
