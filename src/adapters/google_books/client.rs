//! Google Books client - Implementation of BookSearchService for the
//! Google Books `volumes` API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GoogleBooksClientConfig::new("https://www.googleapis.com/books/v1")
//!     .with_api_key(key)
//!     .with_timeout(Duration::from_secs(10));
//!
//! let client = GoogleBooksClient::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::domain::book::{BookDetails, BookSummary};
use crate::domain::foundation::BookId;
use crate::ports::{BookSearchError, BookSearchService};

use super::wire::{Volume, VolumeList};

/// Configuration for the Google Books client.
#[derive(Debug, Clone)]
pub struct GoogleBooksClientConfig {
    /// API key; requests are sent unauthenticated without one.
    api_key: Option<Secret<String>>,
    /// Base URL of the API (default: https://www.googleapis.com/books/v1).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GoogleBooksClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_key: None,
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_api_key(mut self, api_key: Secret<String>) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|key| key.expose_secret().as_str())
            .filter(|key| !key.is_empty())
    }
}

/// Google Books API client.
pub struct GoogleBooksClient {
    config: GoogleBooksClientConfig,
    client: Client,
}

impl GoogleBooksClient {
    pub fn new(config: GoogleBooksClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// Base URL extended with percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, BookSearchError> {
        let invalid = || {
            BookSearchError::Network(format!(
                "invalid Google Books base URL: {}",
                self.config.base_url
            ))
        };
        let mut url = Url::parse(&self.config.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        mut params: Vec<(&'static str, String)>,
    ) -> Result<T, BookSearchError> {
        if let Some(key) = self.config.api_key() {
            params.push(("key", key.to_string()));
        }

        let response = self
            .client
            .get(url)
            .query(&params)
            .send()
            .await
            .map_err(|e| BookSearchError::Network(e.to_string()))?;

        let response = handle_response_status(response).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| BookSearchError::Parse(e.to_string()))
    }
}

/// Maps non-success statuses to port errors.
async fn handle_response_status(response: Response) -> Result<Response, BookSearchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(status_error(status, body))
}

/// Zero-based index of the first volume on a one-based page.
fn start_index(page: u32, page_size: u32) -> u64 {
    u64::from(page.saturating_sub(1)) * u64::from(page_size)
}

fn status_error(status: StatusCode, body: String) -> BookSearchError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => BookSearchError::RateLimited,
        StatusCode::NOT_FOUND => BookSearchError::NotFound(body),
        _ => BookSearchError::upstream(status.as_u16(), body),
    }
}

#[async_trait]
impl BookSearchService for GoogleBooksClient {
    async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<BookSummary>, BookSearchError> {
        let params = vec![
            ("q", query.to_string()),
            ("startIndex", start_index(page, page_size).to_string()),
            ("maxResults", page_size.to_string()),
        ];

        tracing::debug!(query, page, page_size, "searching google books");
        let list: VolumeList = self.get_json(self.endpoint(&["volumes"])?, params).await?;

        let mut books = Vec::with_capacity(list.items.len());
        for volume in list.items {
            match volume.into_summary() {
                Ok(book) => books.push(book),
                Err(e) => tracing::warn!(error = %e, "skipping malformed volume"),
            }
        }
        Ok(books)
    }

    async fn details(&self, id: &BookId) -> Result<BookDetails, BookSearchError> {
        tracing::debug!(book_id = %id, "fetching google books volume");
        let volume: Volume = self
            .get_json(self.endpoint(&["volumes", id.as_str()])?, Vec::new())
            .await
            .map_err(|e| match e {
                BookSearchError::NotFound(_) => BookSearchError::NotFound(id.to_string()),
                other => other,
            })?;
        volume.into_details()
    }
}
