//! ApiClient - `BookSearchService` and `ReviewStore` over HTTP.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use std::time::Duration;

use crate::adapters::http::books::{SearchBooksParams, SearchBooksResponse};
use crate::adapters::http::reviews::CreateReviewRequest;
use crate::adapters::http::ErrorResponse;
use crate::domain::book::{BookDetails, BookSummary};
use crate::domain::foundation::BookId;
use crate::domain::review::{Review, ReviewInput};
use crate::ports::{BookSearchError, BookSearchService, ReviewStore, ReviewStoreError};

/// HTTP client for the booklens API.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Base URL extended with percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, String> {
        let invalid = || format!("invalid API base URL: {}", self.base_url);
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Reads `{code, message, details}` from a failed response, if present.
async fn error_body(response: Response) -> Option<ErrorResponse> {
    response.json::<ErrorResponse>().await.ok()
}

async fn search_error(response: Response) -> BookSearchError {
    let status = response.status();
    let message = error_body(response)
        .await
        .map(|body| body.message)
        .unwrap_or_default();
    match status {
        StatusCode::TOO_MANY_REQUESTS => BookSearchError::RateLimited,
        StatusCode::NOT_FOUND => BookSearchError::NotFound(message),
        _ => BookSearchError::upstream(status.as_u16(), message),
    }
}

async fn store_error(response: Response) -> ReviewStoreError {
    let status = response.status();
    let body = error_body(response).await;
    if let Some(errors) = body.as_ref().and_then(ErrorResponse::field_errors) {
        return ReviewStoreError::Invalid(errors);
    }
    let message = body.map(|b| b.message).unwrap_or_default();
    ReviewStoreError::Server(format!("{}: {}", status, message))
}

#[async_trait]
impl BookSearchService for ApiClient {
    async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<BookSummary>, BookSearchError> {
        let params = SearchBooksParams {
            query: Some(query.to_string()),
            page: Some(page),
            page_size: Some(page_size),
        };

        let response = self
            .client
            .get(self.endpoint(&["api", "books"]).map_err(BookSearchError::Network)?)
            .query(&params)
            .send()
            .await
            .map_err(|e| BookSearchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(search_error(response).await);
        }

        let page: SearchBooksResponse = response
            .json()
            .await
            .map_err(|e| BookSearchError::Parse(e.to_string()))?;
        Ok(page.items)
    }

    async fn details(&self, id: &BookId) -> Result<BookDetails, BookSearchError> {
        let response = self
            .client
            .get(
                self.endpoint(&["api", "books", id.as_str()])
                    .map_err(BookSearchError::Network)?,
            )
            .send()
            .await
            .map_err(|e| BookSearchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(search_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| BookSearchError::Parse(e.to_string()))
    }
}

#[async_trait]
impl ReviewStore for ApiClient {
    async fn create(&self, input: ReviewInput) -> Result<Review, ReviewStoreError> {
        let request = CreateReviewRequest {
            book_id: input.book_id().to_string(),
            reviewer: input.reviewer().to_string(),
            comment: input.comment().to_string(),
            rating: input.rating().value(),
        };

        let response = self
            .client
            .post(self.endpoint(&["api", "reviews"]).map_err(ReviewStoreError::Network)?)
            .json(&request)
            .send()
            .await
            .map_err(|e| ReviewStoreError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(store_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ReviewStoreError::Server(format!("Invalid review response: {}", e)))
    }

    async fn list_by_book(&self, book_id: &BookId) -> Result<Vec<Review>, ReviewStoreError> {
        let response = self
            .client
            .get(
                self.endpoint(&["api", "reviews", book_id.as_str()])
                    .map_err(ReviewStoreError::Network)?,
            )
            .send()
            .await
            .map_err(|e| ReviewStoreError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(store_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ReviewStoreError::Server(format!("Invalid reviews response: {}", e)))
    }
}
