//! Review store port.
//!
//! Reviews are append-only: they are created and listed per book, never
//! updated or deleted.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::BookId;
use crate::domain::review::{FieldErrors, Review, ReviewInput};

/// Port for persisting and retrieving reviews.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Persist a new review and return it with its generated id.
    ///
    /// # Errors
    ///
    /// - `Invalid` if the store rejects the values
    /// - `Network` / `Server` on persistence failure
    async fn create(&self, input: ReviewInput) -> Result<Review, ReviewStoreError>;

    /// All reviews for one book in insertion order.
    async fn list_by_book(&self, book_id: &BookId) -> Result<Vec<Review>, ReviewStoreError>;
}

/// Errors from a review store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewStoreError {
    #[error("network error: {0}")]
    Network(String),

    #[error("server error: {0}")]
    Server(String),

    #[error("invalid review: {} field error(s)", .0.len())]
    Invalid(FieldErrors),
}
