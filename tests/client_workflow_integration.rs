//! Integration tests for the client workflows against a live API.
//!
//! The full router is served on an ephemeral port with a stub catalogue and
//! the in-memory review store. `SearchAggregator` and `ReviewDialog` then talk
//! to it through `ApiClient`, exactly as a front end would.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use booklens::adapters::api_client::ApiClient;
use booklens::adapters::http::{api_router, BooksAppState, ReviewsAppState};
use booklens::adapters::memory::InMemoryReviewStore;
use booklens::application::{ReviewDialog, ReviewDialogError, SearchAggregator, SearchEvent};
use booklens::config::SearchConfig;
use booklens::domain::book::{BookDetails, BookSummary};
use booklens::domain::foundation::BookId;
use booklens::domain::review::DraftStatus;
use booklens::domain::search::PageOutcome;
use booklens::ports::{BookSearchError, BookSearchService, ReviewStore, ReviewStoreError};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Catalogue with `total` books per query and plain-http thumbnails.
struct StubCatalogue {
    total: usize,
    rate_limited: AtomicBool,
}

impl StubCatalogue {
    fn new(total: usize) -> Self {
        Self {
            total,
            rate_limited: AtomicBool::new(false),
        }
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
        if self.rate_limited.load(Ordering::SeqCst) {
            return Err(BookSearchError::RateLimited);
        }
        let start = ((page - 1) * page_size) as usize;
        let end = (start + page_size as usize).min(self.total);
        Ok((start..end)
            .map(|n| BookSummary {
                id: BookId::new(format!("{}-{}", query, n)).unwrap(),
                title: format!("{} volume {}", query, n),
                authors: vec!["Frank Herbert".to_string()],
                thumbnail_url: Some(format!("http://books.example/{}.jpg", n)),
            })
            .collect())
    }

    async fn details(&self, id: &BookId) -> Result<BookDetails, BookSearchError> {
        if id.as_str() == "missing" {
            return Err(BookSearchError::NotFound(id.to_string()));
        }
        Ok(BookDetails::new(id.clone(), "Dune"))
    }
}

struct TestServer {
    base_url: String,
    catalogue: Arc<StubCatalogue>,
}

async fn spawn_server(total: usize) -> TestServer {
    let catalogue = Arc::new(StubCatalogue::new(total));
    let app = api_router(
        BooksAppState::new(catalogue.clone(), 10, 40),
        ReviewsAppState::new(Arc::new(InMemoryReviewStore::new())),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{}", addr),
        catalogue,
    }
}

fn client(server: &TestServer) -> Arc<ApiClient> {
    Arc::new(ApiClient::new(&server.base_url, Duration::from_secs(5)).unwrap())
}

/// Polls the aggregator until `done` holds or two seconds pass.
async fn wait_for(aggregator: &SearchAggregator, done: impl Fn(&SearchAggregator) -> bool) {
    for _ in 0..200 {
        if done(aggregator) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("search did not settle: {:?}", aggregator.snapshot());
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn search_pages_through_all_results_over_http() {
    let server = spawn_server(25).await;
    let config = SearchConfig {
        debounce_ms: 20,
        ..SearchConfig::default()
    };
    let aggregator = SearchAggregator::from_config(client(&server), &config);

    aggregator
        .dispatch(SearchEvent::QueryChanged("dune".into()))
        .await;
    wait_for(&aggregator, |a| a.snapshot().results.len() == 10).await;

    let first = aggregator.snapshot();
    assert!(first.has_more);
    assert!(first
        .results
        .iter()
        .all(|book| book.thumbnail_url.as_deref().unwrap().starts_with("https://")));

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
    assert_eq!(snapshot.results[24].id.as_str(), "dune-24");
}

#[tokio::test]
async fn upstream_rate_limit_reaches_the_search_state() {
    let server = spawn_server(25).await;
    server.catalogue.rate_limited.store(true, Ordering::SeqCst);
    let aggregator =
        SearchAggregator::with_settings(client(&server), 10, Duration::from_millis(20));

    aggregator.set_query("dune");
    wait_for(&aggregator, |a| a.snapshot().error.is_some()).await;

    let snapshot = aggregator.snapshot();
    assert_eq!(
        snapshot.error.as_deref(),
        Some("Rate limit exceeded. Please try again later.")
    );
    assert!(snapshot.results.is_empty());
    assert!(!snapshot.is_loading);

    server.catalogue.rate_limited.store(false, Ordering::SeqCst);
    let retry = aggregator.load_next_page().await;
    assert!(matches!(retry, Some(PageOutcome::Merged { added: 10, .. })));
    assert!(aggregator.snapshot().error.is_none());
}

#[tokio::test]
async fn book_details_and_missing_book_over_http() {
    let server = spawn_server(0).await;
    let api = client(&server);

    let details = api.details(&BookId::new("abc").unwrap()).await.unwrap();
    assert_eq!(details.title, "Dune");

    let missing = api.details(&BookId::new("missing").unwrap()).await;
    assert!(matches!(missing, Err(BookSearchError::NotFound(_))));
}

// =============================================================================
// Reviews
// =============================================================================

#[tokio::test]
async fn review_dialog_submits_and_reloads_over_http() {
    let server = spawn_server(0).await;
    let book_id = BookId::new("zyTCAlFPjgYC").unwrap();
    let mut dialog = ReviewDialog::new(book_id.clone(), client(&server));

    dialog.load().await.unwrap();
    assert!(dialog.reviews().is_empty());

    let draft = dialog.draft_mut();
    draft.set_reviewer_name("Ann").unwrap();
    draft.set_comment("Great book, loved it!").unwrap();
    draft.set_rating(8).unwrap();

    let review = dialog.submit().await.unwrap();
    assert_eq!(review.reviewer, "Ann");
    assert_eq!(review.rating.value(), 8);
    assert_eq!(dialog.draft().status(), DraftStatus::Submitted);
    assert!(dialog.draft().is_pristine());

    let mut reopened = ReviewDialog::new(book_id, client(&server));
    reopened.load().await.unwrap();
    assert_eq!(reopened.reviews(), &[review]);
    assert_eq!(reopened.average_rating(), Some(8.0));
}

#[tokio::test]
async fn book_ids_with_reserved_characters_round_trip() {
    let server = spawn_server(0).await;
    let api = client(&server);
    let book_id = BookId::new("a/b?c#d").unwrap();

    let details = api.details(&book_id).await.unwrap();
    assert_eq!(details.id, book_id);

    let mut dialog = ReviewDialog::new(book_id.clone(), api.clone());
    let draft = dialog.draft_mut();
    draft.set_reviewer_name("Ann").unwrap();
    draft.set_comment("Great book, loved it!").unwrap();
    let review = dialog.submit().await.unwrap();

    assert_eq!(api.list_by_book(&book_id).await.unwrap(), vec![review]);
    assert!(api
        .list_by_book(&BookId::new("a").unwrap())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn invalid_draft_never_reaches_the_server() {
    let server = spawn_server(0).await;
    let api = client(&server);
    let book_id = BookId::new("zyTCAlFPjgYC").unwrap();
    let mut dialog = ReviewDialog::new(book_id.clone(), api.clone());

    dialog.draft_mut().set_comment("short").unwrap();
    let result = dialog.submit().await;

    assert!(matches!(result, Err(ReviewDialogError::Draft(_))));
    assert!(api.list_by_book(&book_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn server_rejects_invalid_review_with_field_details() {
    let server = spawn_server(0).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/reviews", server.base_url))
        .json(&json!({
            "bookId": "zyTCAlFPjgYC",
            "reviewer": "A",
            "comment": "Great book, loved it!",
            "rating": 11
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert!(body["details"]["reviewer"].is_string());
    assert!(body["details"]["rating"].is_string());
    assert!(body["details"].get("comment").is_none());
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let api = ApiClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();

    let result = api.list_by_book(&BookId::new("zyTCAlFPjgYC").unwrap()).await;

    assert!(matches!(result, Err(ReviewStoreError::Network(_))));
}
