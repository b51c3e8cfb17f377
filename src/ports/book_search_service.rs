//! Book search port - Interface to a catalogue of books.
//!
//! Implemented against Google Books on the backend and against this
//! service's own `/api/books` endpoints on the client side.
//!
//! # Design
//!
//! - Pages are 1-based and fixed-size; the caller decides the page size
//! - A short page (fewer items than requested) means there is nothing after it
//! - Rate limiting is reported separately so it can be surfaced as such

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::book::{BookDetails, BookSummary};
use crate::domain::foundation::BookId;
use crate::domain::search::FetchFailure;

/// Port for searching the book catalogue.
#[async_trait]
pub trait BookSearchService: Send + Sync {
    /// Fetch one page of results for `query`.
    ///
    /// `page` starts at 1. Results are in relevance order.
    ///
    /// # Errors
    ///
    /// - `RateLimited` when the catalogue throttles the caller
    /// - `Network` / `Upstream` / `Parse` on transport or payload failures
    async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<BookSummary>, BookSearchError>;

    /// Fetch the normalized details of one volume.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the volume does not exist
    async fn details(&self, id: &BookId) -> Result<BookDetails, BookSearchError>;
}

/// Errors from the book catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookSearchError {
    /// Request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// Catalogue returned 429.
    #[error("rate limited by book catalogue")]
    RateLimited,

    /// Catalogue returned a non-success status.
    #[error("upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// Volume does not exist.
    #[error("book not found: {0}")]
    NotFound(String),

    /// Response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),
}

impl BookSearchError {
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }
}

impl From<&BookSearchError> for FetchFailure {
    fn from(err: &BookSearchError) -> Self {
        match err {
            BookSearchError::RateLimited => FetchFailure::RateLimited,
            _ => FetchFailure::Unavailable,
        }
    }
}
