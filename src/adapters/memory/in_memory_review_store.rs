//! In-memory implementation of ReviewStore.
//!
//! Used when no database is configured, and by tests. Reviews live for the
//! lifetime of the process.

use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::domain::foundation::{BookId, ReviewId};
use crate::domain::review::{Review, ReviewInput};
use crate::ports::{ReviewStore, ReviewStoreError};

/// Process-local review store with sequential ids starting at 1.
pub struct InMemoryReviewStore {
    reviews: RwLock<Vec<Review>>,
    next_id: AtomicI64,
}

impl InMemoryReviewStore {
    pub fn new() -> Self {
        Self {
            reviews: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored reviews across all books.
    pub async fn len(&self) -> usize {
        self.reviews.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.reviews.read().await.is_empty()
    }
}

impl Default for InMemoryReviewStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReviewStore for InMemoryReviewStore {
    async fn create(&self, input: ReviewInput) -> Result<Review, ReviewStoreError> {
        let mut reviews = self.reviews.write().await;
        let id = ReviewId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let review = input.into_review(id);
        reviews.push(review.clone());
        Ok(review)
    }

    async fn list_by_book(&self, book_id: &BookId) -> Result<Vec<Review>, ReviewStoreError> {
        Ok(self
            .reviews
            .read()
            .await
            .iter()
            .filter(|review| &review.book_id == book_id)
            .cloned()
            .collect())
    }
}
