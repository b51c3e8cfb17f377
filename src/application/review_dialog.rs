//! ReviewDialog - review list and review form for one book.
//!
//! Owns a [`ReviewDraft`] and the reviews shown beneath it. A successful
//! submission appends the stored review to the list and clears the form; a
//! failed one keeps the entered values for another attempt.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::BookId;
use crate::domain::review::{average_rating, DraftError, Review, ReviewDraft, ReviewInput};
use crate::ports::{ReviewStore, ReviewStoreError};

pub const LOAD_FAILED_MESSAGE: &str = "Error loading reviews.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewDialogError {
    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error(transparent)]
    Store(#[from] ReviewStoreError),
}

pub struct ReviewDialog {
    book_id: BookId,
    store: Arc<dyn ReviewStore>,
    draft: ReviewDraft,
    reviews: Vec<Review>,
    load_error: Option<String>,
}

impl ReviewDialog {
    pub fn new(book_id: BookId, store: Arc<dyn ReviewStore>) -> Self {
        Self {
            book_id,
            store,
            draft: ReviewDraft::new(),
            reviews: Vec::new(),
            load_error: None,
        }
    }

    pub fn book_id(&self) -> &BookId {
        &self.book_id
    }

    pub fn draft(&self) -> &ReviewDraft {
        &self.draft
    }

    /// Form access for field edits.
    pub fn draft_mut(&mut self) -> &mut ReviewDraft {
        &mut self.draft
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn average_rating(&self) -> Option<f64> {
        average_rating(&self.reviews)
    }

    /// Replaces the displayed list with the stored reviews.
    ///
    /// On failure the previous list is kept and `load_error` is set.
    pub async fn load(&mut self) -> Result<(), ReviewDialogError> {
        match self.store.list_by_book(&self.book_id).await {
            Ok(reviews) => {
                self.reviews = reviews;
                self.load_error = None;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, book_id = %self.book_id, "failed to load reviews");
                self.load_error = Some(LOAD_FAILED_MESSAGE.to_string());
                Err(err.into())
            }
        }
    }

    /// Submits the draft.
    ///
    /// An invalid draft fails with [`DraftError::Invalid`] before any call
    /// to the store.
    pub async fn submit(&mut self) -> Result<Review, ReviewDialogError> {
        let submission = self.draft.begin_submit()?;
        let input = match ReviewInput::new(
            self.book_id.clone(),
            &submission.reviewer,
            &submission.comment,
            submission.rating.value(),
        ) {
            Ok(input) => input,
            Err(errors) => {
                self.draft.submit_failed()?;
                return Err(DraftError::Invalid(errors).into());
            }
        };

        match self.store.create(input).await {
            Ok(review) => {
                self.draft.submit_succeeded()?;
                self.reviews.push(review.clone());
                Ok(review)
            }
            Err(err) => {
                tracing::warn!(error = %err, book_id = %self.book_id, "failed to submit review");
                self.draft.submit_failed()?;
                Err(err.into())
            }
        }
    }
}
