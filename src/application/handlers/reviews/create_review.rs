//! CreateReviewHandler - Command handler for submitting a review.
//!
//! Runs the same field rules as the review form; a client that skips them
//! still cannot store an invalid review.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{BookId, ValidationError};
use crate::domain::review::{FieldErrors, Review, ReviewInput};
use crate::ports::{ReviewStore, ReviewStoreError};

/// Command to create a review from raw request values.
#[derive(Debug, Clone)]
pub struct CreateReviewCommand {
    pub book_id: String,
    pub reviewer: String,
    pub comment: String,
    pub rating: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateReviewError {
    #[error("invalid book id: {0}")]
    InvalidBookId(#[from] ValidationError),

    #[error("review has {} invalid field(s)", .0.len())]
    Invalid(FieldErrors),

    #[error(transparent)]
    Store(#[from] ReviewStoreError),
}

/// Handler for creating reviews.
pub struct CreateReviewHandler {
    store: Arc<dyn ReviewStore>,
}

impl CreateReviewHandler {
    pub fn new(store: Arc<dyn ReviewStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: CreateReviewCommand) -> Result<Review, CreateReviewError> {
        let book_id = BookId::new(cmd.book_id)?;
        let input = ReviewInput::new(book_id, &cmd.reviewer, &cmd.comment, cmd.rating)
            .map_err(CreateReviewError::Invalid)?;

        let review = self.store.create(input).await?;
        tracing::info!(
            review_id = %review.id,
            book_id = %review.book_id,
            rating = review.rating.value(),
            "review created"
        );
        Ok(review)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ReviewId;
    use crate::domain::review::ReviewField;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockReviewStore {
        created: Mutex<Vec<Review>>,
        fail_create: bool,
    }

    impl MockReviewStore {
        fn new() -> Self {
            Self {
                created: Mutex::new(Vec::new()),
                fail_create: false,
            }
        }

        fn failing() -> Self {
            Self {
                created: Mutex::new(Vec::new()),
                fail_create: true,
            }
        }

        fn created(&self) -> Vec<Review> {
            self.created.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ReviewStore for MockReviewStore {
        async fn create(&self, input: ReviewInput) -> Result<Review, ReviewStoreError> {
            if self.fail_create {
                return Err(ReviewStoreError::Server("Simulated insert failure".into()));
            }
            let mut created = self.created.lock().unwrap();
            let review = input.into_review(ReviewId::new(created.len() as i64 + 1));
            created.push(review.clone());
            Ok(review)
        }

        async fn list_by_book(&self, _book_id: &BookId) -> Result<Vec<Review>, ReviewStoreError> {
            Ok(self.created())
        }
    }

    fn command(reviewer: &str, comment: &str, rating: i32) -> CreateReviewCommand {
        CreateReviewCommand {
            book_id: "zyTCAlFPjgYC".to_string(),
            reviewer: reviewer.to_string(),
            comment: comment.to_string(),
            rating,
        }
    }

    #[tokio::test]
    async fn stores_trimmed_review() {
        let store = Arc::new(MockReviewStore::new());
        let handler = CreateReviewHandler::new(store.clone());

        let review = handler
            .handle(command("  Ann ", "Great book, loved it!  ", 8))
            .await
            .unwrap();

        assert_eq!(review.id, ReviewId::new(1));
        assert_eq!(review.reviewer, "Ann");
        assert_eq!(review.comment, "Great book, loved it!");
        assert_eq!(review.rating.value(), 8);
        assert_eq!(store.created().len(), 1);
    }

    #[tokio::test]
    async fn invalid_fields_never_reach_the_store() {
        let store = Arc::new(MockReviewStore::new());
        let handler = CreateReviewHandler::new(store.clone());

        let err = handler.handle(command("A", "short", 11)).await.unwrap_err();

        match err {
            CreateReviewError::Invalid(errors) => {
                assert!(errors.contains_key(&ReviewField::Reviewer));
                assert!(errors.contains_key(&ReviewField::Comment));
                assert!(errors.contains_key(&ReviewField::Rating));
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
        assert!(store.created().is_empty());
    }

    #[tokio::test]
    async fn blank_book_id_is_rejected() {
        let handler = CreateReviewHandler::new(Arc::new(MockReviewStore::new()));
        let mut cmd = command("Ann", "Great book, loved it!", 8);
        cmd.book_id = "  ".to_string();

        let result = handler.handle(cmd).await;

        assert!(matches!(result, Err(CreateReviewError::InvalidBookId(_))));
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let handler = CreateReviewHandler::new(Arc::new(MockReviewStore::failing()));

        let result = handler.handle(command("Ann", "Great book, loved it!", 8)).await;

        assert!(matches!(
            result,
            Err(CreateReviewError::Store(ReviewStoreError::Server(_)))
        ));
    }
}
