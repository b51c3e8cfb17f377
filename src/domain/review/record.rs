//! Persisted review record and the validated input that creates one.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{BookId, Rating, ReviewId};

use super::validation::{validate_fields, FieldErrors};

/// A stored review of one book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub book_id: BookId,
    pub reviewer: String,
    pub comment: String,
    pub rating: Rating,
}

/// Validated, trimmed data for a new review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewInput {
    book_id: BookId,
    reviewer: String,
    comment: String,
    rating: Rating,
}

impl ReviewInput {
    /// Validates and trims the raw values.
    pub fn new(
        book_id: BookId,
        reviewer: &str,
        comment: &str,
        rating: i32,
    ) -> Result<Self, FieldErrors> {
        let errors = validate_fields(reviewer, comment, rating);
        if !errors.is_empty() {
            return Err(errors);
        }
        let rating = Rating::try_from_i32(rating).map_err(|_| errors)?;
        Ok(Self {
            book_id,
            reviewer: reviewer.trim().to_string(),
            comment: comment.trim().to_string(),
            rating,
        })
    }

    pub fn book_id(&self) -> &BookId {
        &self.book_id
    }

    pub fn reviewer(&self) -> &str {
        &self.reviewer
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    /// Builds the stored record once the store has assigned an id.
    pub fn into_review(self, id: ReviewId) -> Review {
        Review {
            id,
            book_id: self.book_id,
            reviewer: self.reviewer,
            comment: self.comment,
            rating: self.rating,
        }
    }
}

/// Mean rating of a set of reviews, `None` when there are none.
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let total: i32 = reviews.iter().map(|r| r.rating.value()).sum();
    Some(total as f64 / reviews.len() as f64)
}
