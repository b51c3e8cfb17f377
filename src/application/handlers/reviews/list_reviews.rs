//! ListReviewsHandler - Query handler for a book's reviews.

use std::sync::Arc;

use crate::domain::foundation::BookId;
use crate::domain::review::Review;
use crate::ports::{ReviewStore, ReviewStoreError};

/// Query for every review of one book.
#[derive(Debug, Clone)]
pub struct ListReviewsQuery {
    pub book_id: BookId,
}

pub struct ListReviewsHandler {
    store: Arc<dyn ReviewStore>,
}

impl ListReviewsHandler {
    pub fn new(store: Arc<dyn ReviewStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: ListReviewsQuery) -> Result<Vec<Review>, ReviewStoreError> {
        self.store.list_by_book(&query.book_id).await
    }
}
