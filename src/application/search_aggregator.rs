//! SearchAggregator - drives a [`SearchSession`] against a [`BookSearchService`].
//!
//! The session decides *what* to fetch; the aggregator owns the debounce
//! timer and performs the fetches. The session lock is never held across an
//! `.await`, so a response can be applied while another request is pending
//! and is dropped as stale when the query has moved on.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::config::SearchConfig;
use crate::domain::search::{
    FetchFailure, PageOutcome, PageRequest, SearchSession, SearchSnapshot, DEFAULT_PAGE_SIZE,
};
use crate::ports::BookSearchService;

/// Default quiet period before a typed query is searched.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Input from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// The search box changed.
    QueryChanged(String),
    /// The end-of-results marker scrolled into view.
    SentinelVisible,
}

/// Async driver for one search session. Clones share the same session.
#[derive(Clone)]
pub struct SearchAggregator {
    session: Arc<Mutex<SearchSession>>,
    service: Arc<dyn BookSearchService>,
    debounce: Duration,
    pending_commit: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl SearchAggregator {
    pub fn new(service: Arc<dyn BookSearchService>) -> Self {
        Self::with_settings(service, DEFAULT_PAGE_SIZE, DEFAULT_DEBOUNCE)
    }

    /// Page size and debounce taken from the `search` configuration section.
    pub fn from_config(service: Arc<dyn BookSearchService>, config: &SearchConfig) -> Self {
        Self::with_settings(service, config.page_size, config.debounce())
    }

    pub fn with_settings(
        service: Arc<dyn BookSearchService>,
        page_size: u32,
        debounce: Duration,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(SearchSession::new(page_size))),
            service,
            debounce,
            pending_commit: Arc::new(Mutex::new(None)),
        }
    }

    /// Routes a presentation event.
    ///
    /// Returns the outcome of a page load triggered by the event, if any.
    pub async fn dispatch(&self, event: SearchEvent) -> Option<PageOutcome> {
        match event {
            SearchEvent::QueryChanged(text) => {
                self.set_query(text);
                None
            }
            SearchEvent::SentinelVisible => self.load_next_page().await,
        }
    }

    /// Records a keystroke and restarts the debounce timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn set_query(&self, text: impl Into<String>) {
        let text = text.into();
        self.session().set_query(text.clone());

        let this = self.clone();
        let debounce = self.debounce;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            this.commit(&text);
        });

        if let Some(previous) = self.pending().replace(timer) {
            previous.abort();
        }
    }

    /// Loads the next page if the session allows it.
    ///
    /// Returns `None` without fetching while a page is loading, after the
    /// last page, or when there is no query.
    pub async fn load_next_page(&self) -> Option<PageOutcome> {
        let request = self.session().load_next_page()?;
        Some(self.fetch(request).await)
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        self.session().snapshot()
    }

    /// Cancels any pending debounce and clears the session.
    pub fn reset(&self) {
        if let Some(pending) = self.pending().take() {
            pending.abort();
        }
        self.session().reset();
    }

    /// Debounce fired for `armed`: promote the raw query and fetch its first
    /// page.
    ///
    /// A keystroke can land after the timer woke but before it got here; the
    /// raw query then differs from `armed` and that keystroke's own timer
    /// commits it after a full quiet period. The fetch runs on its own task
    /// so a later keystroke, which aborts the timer, cannot cancel a request
    /// halfway.
    fn commit(&self, armed: &str) {
        let request = {
            let mut session = self.session();
            if session.raw_query() != armed {
                tracing::debug!(armed, "search query changed before debounce commit");
                return;
            }
            session.commit_query()
        };
        let Some(request) = request else {
            tracing::debug!("search query unchanged or blank, nothing to fetch");
            return;
        };
        let this = self.clone();
        tokio::spawn(async move {
            this.fetch(request).await;
        });
    }

    async fn fetch(&self, request: PageRequest) -> PageOutcome {
        tracing::debug!(
            query = request.query(),
            page = request.page(),
            generation = request.generation(),
            "fetching search page"
        );

        let response = self
            .service
            .search(request.query(), request.page(), request.page_size())
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, query = request.query(), "search page fetch failed");
                FetchFailure::from(&err)
            });

        let outcome = self.session().apply_page(&request, response);
        match &outcome {
            PageOutcome::Merged { added, has_more } => {
                tracing::debug!(added, has_more, page = request.page(), "search page merged")
            }
            PageOutcome::Failed { message } => tracing::debug!(%message, "search page failed"),
            PageOutcome::Stale => tracing::debug!(
                generation = request.generation(),
                page = request.page(),
                "discarding stale search page"
            ),
        }
        outcome
    }

    fn session(&self) -> MutexGuard<'_, SearchSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn pending(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending_commit
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::book::{BookDetails, BookSummary};
    use crate::domain::foundation::BookId;
    use crate::ports::BookSearchError;
    use async_trait::async_trait;
    use tokio::sync::Semaphore;

    /// Stub catalogue: `total` numbered books per query, optionally holding
    /// every call for `gated_query` until a permit is released.
    struct StubCatalogue {
        calls: Mutex<Vec<(String, u32)>>,
        total: usize,
        gated_query: Option<String>,
        gate: Semaphore,
        fail: bool,
    }

    impl StubCatalogue {
        fn new(total: usize) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                total,
                gated_query: None,
                gate: Semaphore::new(0),
                fail: false,
            }
        }

        fn gated(total: usize, query: &str) -> Self {
            Self {
                gated_query: Some(query.to_string()),
                ..Self::new(total)
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new(0)
            }
        }

        fn calls(&self) -> Vec<(String, u32)> {
            self.calls.lock().unwrap().clone()
        }

        fn release(&self) {
            self.gate.add_permits(1);
        }
    }

    #[async_trait]
    impl BookSearchService for StubCatalogue {
        async fn search(
            &self,
            query: &str,
            page: u32,
            page_size: u32,
        ) -> Result<Vec<BookSummary>, BookSearchError> {
            self.calls.lock().unwrap().push((query.to_string(), page));
            if self.gated_query.as_deref() == Some(query) {
                self.gate.acquire().await.unwrap().forget();
            }
            if self.fail {
                return Err(BookSearchError::RateLimited);
            }
            let start = ((page - 1) * page_size) as usize;
            let end = (start + page_size as usize).min(self.total);
            Ok((start..end)
                .map(|n| {
                    BookSummary::new(
                        BookId::new(format!("{}-{}", query, n)).unwrap(),
                        format!("{} #{}", query, n),
                        vec![],
                        None,
                    )
                })
                .collect())
        }

        async fn details(&self, id: &BookId) -> Result<BookDetails, BookSearchError> {
            Err(BookSearchError::NotFound(id.to_string()))
        }
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(600)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn typing_is_debounced_into_one_search() {
        let catalogue = Arc::new(StubCatalogue::new(25));
        let aggregator = SearchAggregator::new(catalogue.clone());

        aggregator.set_query("d");
        tokio::time::sleep(Duration::from_millis(200)).await;
        aggregator.set_query("du");
        tokio::time::sleep(Duration::from_millis(200)).await;
        aggregator.set_query("dune");
        settle().await;

        assert_eq!(catalogue.calls(), vec![("dune".to_string(), 1)]);
        let snapshot = aggregator.snapshot();
        assert_eq!(snapshot.query, "dune");
        assert_eq!(snapshot.results.len(), 10);
        assert!(snapshot.has_more);
        assert!(!snapshot.is_loading);
    }

    #[tokio::test(start_paused = true)]
    async fn sentinel_loads_pages_until_a_short_page() {
        let catalogue = Arc::new(StubCatalogue::new(25));
        let aggregator = SearchAggregator::new(catalogue.clone());

        aggregator
            .dispatch(SearchEvent::QueryChanged("dune".into()))
            .await;
        settle().await;

        let second = aggregator.dispatch(SearchEvent::SentinelVisible).await;
        assert_eq!(
            second,
            Some(PageOutcome::Merged {
                added: 10,
                has_more: true
            })
        );
        let third = aggregator.dispatch(SearchEvent::SentinelVisible).await;
        assert_eq!(
            third,
            Some(PageOutcome::Merged {
                added: 5,
                has_more: false
            })
        );
        assert_eq!(aggregator.dispatch(SearchEvent::SentinelVisible).await, None);

        let snapshot = aggregator.snapshot();
        assert_eq!(snapshot.results.len(), 25);
        assert_eq!(snapshot.page_index, 2);
        assert_eq!(catalogue.calls().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn load_next_page_is_idempotent_while_loading() {
        let catalogue = Arc::new(StubCatalogue::gated(25, "dune"));
        let aggregator = SearchAggregator::new(catalogue.clone());

        aggregator.set_query("dune");
        settle().await;
        assert!(aggregator.snapshot().is_loading);

        for _ in 0..3 {
            assert_eq!(aggregator.load_next_page().await, None);
        }
        assert_eq!(catalogue.calls().len(), 1);

        catalogue.release();
        settle().await;

        let snapshot = aggregator.snapshot();
        assert!(!snapshot.is_loading);
        assert_eq!(snapshot.results.len(), 10);
        assert_eq!(catalogue.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn late_response_for_old_query_is_discarded() {
        let catalogue = Arc::new(StubCatalogue::gated(25, "dune"));
        let aggregator = SearchAggregator::new(catalogue.clone());

        aggregator.set_query("dune");
        settle().await;
        aggregator.set_query("hobbit");
        settle().await;

        catalogue.release();
        settle().await;

        let snapshot = aggregator.snapshot();
        assert_eq!(snapshot.query, "hobbit");
        assert_eq!(snapshot.results.len(), 10);
        assert!(snapshot
            .results
            .iter()
            .all(|book| book.id.as_str().starts_with("hobbit-")));
    }

    #[tokio::test(start_paused = true)]
    async fn failure_surfaces_message_and_stays_retryable() {
        let catalogue = Arc::new(StubCatalogue::failing());
        let aggregator = SearchAggregator::new(catalogue.clone());

        aggregator.set_query("dune");
        settle().await;

        let snapshot = aggregator.snapshot();
        assert_eq!(
            snapshot.error.as_deref(),
            Some("Rate limit exceeded. Please try again later.")
        );
        assert!(!snapshot.is_loading);

        let retry = aggregator.load_next_page().await;
        assert!(matches!(retry, Some(PageOutcome::Failed { .. })));
        assert_eq!(catalogue.calls(), vec![("dune".to_string(), 1), ("dune".to_string(), 1)]);
    }

    #[tokio::test(start_paused = true)]
    async fn blank_query_clears_without_fetching() {
        let catalogue = Arc::new(StubCatalogue::new(25));
        let aggregator = SearchAggregator::new(catalogue.clone());

        aggregator.set_query("dune");
        settle().await;
        aggregator.set_query("   ");
        settle().await;

        assert!(aggregator.snapshot().results.is_empty());
        assert_eq!(catalogue.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn configured_debounce_is_honoured() {
        let catalogue = Arc::new(StubCatalogue::new(25));
        let config = SearchConfig {
            page_size: 5,
            debounce_ms: 100,
            ..SearchConfig::default()
        };
        let aggregator = SearchAggregator::from_config(catalogue.clone(), &config);

        aggregator.set_query("dune");
        tokio::time::sleep(Duration::from_millis(90)).await;
        assert!(catalogue.calls().is_empty());

        tokio::time::sleep(Duration::from_millis(20)).await;
        tokio::task::yield_now().await;
        assert_eq!(catalogue.calls(), vec![("dune".to_string(), 1)]);

        settle().await;
        assert_eq!(aggregator.snapshot().results.len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn timer_for_an_older_keystroke_does_not_commit() {
        let catalogue = Arc::new(StubCatalogue::new(25));
        let aggregator = SearchAggregator::new(catalogue.clone());

        aggregator.set_query("dune");
        // A timer armed for "du" that woke after "dune" was typed.
        aggregator.commit("du");
        tokio::task::yield_now().await;

        assert!(catalogue.calls().is_empty());
        assert_eq!(aggregator.snapshot().query, "");

        settle().await;
        assert_eq!(catalogue.calls(), vec![("dune".to_string(), 1)]);
        assert_eq!(aggregator.snapshot().query, "dune");
    }

    #[tokio::test(start_paused = true)]
    async fn reset_cancels_pending_debounce() {
        let catalogue = Arc::new(StubCatalogue::new(25));
        let aggregator = SearchAggregator::new(catalogue.clone());

        aggregator.set_query("dune");
        aggregator.reset();
        settle().await;

        assert!(catalogue.calls().is_empty());
        assert_eq!(aggregator.snapshot().query, "");
    }
}
