//! ReviewDraft - the review form's validation and submission lifecycle.
//!
//! Validation messages stay hidden until the draft is dirty (first edit or
//! first submit attempt); from then on they are recomputed after every
//! change. A draft only hands out a [`DraftSubmission`] when every field
//! passes, so invalid input never reaches the review store.

use serde::Serialize;
use thiserror::Error;

use crate::domain::foundation::{Rating, StateMachine, ValidationError};

use super::status::DraftStatus;
use super::validation::{validate_fields, FieldErrors};

pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit review. Please try again.";

/// Errors raised by draft operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("a submission is already in progress")]
    AlreadySubmitting,

    #[error("review has {} invalid field(s)", .0.len())]
    Invalid(FieldErrors),

    #[error("no submission is in progress")]
    NotSubmitting,

    #[error(transparent)]
    Transition(#[from] ValidationError),
}

/// Trimmed values ready to be sent to the review store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftSubmission {
    pub reviewer: String,
    pub comment: String,
    pub rating: Rating,
}

/// An in-progress, unsaved review.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    reviewer_name: String,
    comment: String,
    rating: i32,
    is_dirty: bool,
    errors: FieldErrors,
    status: DraftStatus,
    submit_error: Option<String>,
}

impl ReviewDraft {
    pub fn new() -> Self {
        Self {
            reviewer_name: String::new(),
            comment: String::new(),
            rating: Rating::default().value(),
            is_dirty: false,
            errors: FieldErrors::new(),
            status: DraftStatus::Pristine,
            submit_error: None,
        }
    }

    pub fn reviewer_name(&self) -> &str {
        &self.reviewer_name
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn rating(&self) -> i32 {
        self.rating
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    pub fn status(&self) -> DraftStatus {
        self.status
    }

    /// Messages to show inline; empty until the draft is dirty.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Banner message after a failed submission.
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Whether the current values pass every rule, dirty or not.
    pub fn is_valid(&self) -> bool {
        self.current_errors().is_empty()
    }

    /// Untouched, empty form.
    pub fn is_pristine(&self) -> bool {
        !self.is_dirty
            && self.reviewer_name.is_empty()
            && self.comment.is_empty()
            && self.rating == Rating::default().value()
    }

    /// The submit control is disabled once the draft is dirty and invalid,
    /// and while a submission is in flight. A pristine form stays enabled so
    /// the first click can surface the validation messages.
    pub fn submit_disabled(&self) -> bool {
        self.status == DraftStatus::Submitting || (self.is_dirty && !self.is_valid())
    }

    pub fn set_reviewer_name(&mut self, name: impl Into<String>) -> Result<(), DraftError> {
        self.ensure_editable()?;
        self.reviewer_name = name.into();
        self.after_edit()
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) -> Result<(), DraftError> {
        self.ensure_editable()?;
        self.comment = comment.into();
        self.after_edit()
    }

    pub fn set_rating(&mut self, rating: i32) -> Result<(), DraftError> {
        self.ensure_editable()?;
        self.rating = rating;
        self.after_edit()
    }

    /// Submit attempt. Forces the draft dirty and revalidates; on success the
    /// draft enters `Submitting` and the caller must report back through
    /// [`submit_succeeded`](Self::submit_succeeded) or
    /// [`submit_failed`](Self::submit_failed).
    pub fn begin_submit(&mut self) -> Result<DraftSubmission, DraftError> {
        if self.status == DraftStatus::Submitting {
            return Err(DraftError::AlreadySubmitting);
        }
        self.is_dirty = true;
        self.errors = self.current_errors();

        if !self.errors.is_empty() {
            self.status = self.status.transition_to(DraftStatus::Invalid)?;
            return Err(DraftError::Invalid(self.errors.clone()));
        }

        let rating = Rating::try_from_i32(self.rating)?;
        self.status = self.status.transition_to(DraftStatus::Submitting)?;
        self.submit_error = None;
        Ok(DraftSubmission {
            reviewer: self.reviewer_name.trim().to_string(),
            comment: self.comment.trim().to_string(),
            rating,
        })
    }

    /// The store accepted the review: the form is cleared.
    pub fn submit_succeeded(&mut self) -> Result<(), DraftError> {
        self.ensure_submitting()?;
        self.status = self.status.transition_to(DraftStatus::Submitted)?;
        self.reviewer_name.clear();
        self.comment.clear();
        self.rating = Rating::default().value();
        self.is_dirty = false;
        self.errors.clear();
        self.submit_error = None;
        Ok(())
    }

    /// The store rejected the review: values are kept for another attempt.
    pub fn submit_failed(&mut self) -> Result<(), DraftError> {
        self.ensure_submitting()?;
        self.status = self.status.transition_to(DraftStatus::SubmitError)?;
        self.submit_error = Some(SUBMIT_FAILED_MESSAGE.to_string());
        Ok(())
    }

    fn current_errors(&self) -> FieldErrors {
        validate_fields(&self.reviewer_name, &self.comment, self.rating)
    }

    fn ensure_editable(&self) -> Result<(), DraftError> {
        if self.status.accepts_edits() {
            Ok(())
        } else {
            Err(DraftError::AlreadySubmitting)
        }
    }

    fn ensure_submitting(&self) -> Result<(), DraftError> {
        if self.status == DraftStatus::Submitting {
            Ok(())
        } else {
            Err(DraftError::NotSubmitting)
        }
    }

    fn after_edit(&mut self) -> Result<(), DraftError> {
        let editing = self.status.transition_to(DraftStatus::Editing)?;
        self.is_dirty = true;
        self.errors = self.current_errors();
        let settled = if self.errors.is_empty() {
            DraftStatus::Valid
        } else {
            DraftStatus::Invalid
        };
        self.status = editing.transition_to(settled)?;
        Ok(())
    }
}

impl Default for ReviewDraft {
    fn default() -> Self {
        Self::new()
    }
}
