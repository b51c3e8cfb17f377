//! Field rules shared by the review form and the review API.
//!
//! Emptiness and length are both judged on the trimmed value, which is the
//! value that ends up being stored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::foundation::Rating;

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 30;
pub const COMMENT_MIN_CHARS: usize = 10;
pub const COMMENT_MAX_CHARS: usize = 500;

/// Review form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReviewField {
    Reviewer,
    Comment,
    Rating,
}

impl ReviewField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewField::Reviewer => "reviewer",
            ReviewField::Comment => "comment",
            ReviewField::Rating => "rating",
        }
    }
}

impl fmt::Display for ReviewField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Validation messages keyed by field; empty means valid.
pub type FieldErrors = BTreeMap<ReviewField, String>;

pub fn check_reviewer_name(name: &str) -> Option<&'static str> {
    let name = name.trim();
    let len = name.chars().count();
    if name.is_empty() {
        Some("Name is required")
    } else if len < NAME_MIN_CHARS {
        Some("Name must be at least 2 characters")
    } else if len > NAME_MAX_CHARS {
        Some("Name must be less than 30 characters")
    } else {
        None
    }
}

pub fn check_comment(comment: &str) -> Option<&'static str> {
    let comment = comment.trim();
    let len = comment.chars().count();
    if comment.is_empty() {
        Some("Review comment is required")
    } else if len < COMMENT_MIN_CHARS {
        Some("Review must be at least 10 characters")
    } else if len > COMMENT_MAX_CHARS {
        Some("Review must be less than 500 characters")
    } else {
        None
    }
}

pub fn check_rating(rating: i32) -> Option<&'static str> {
    Rating::try_from_i32(rating)
        .err()
        .map(|_| "Rating must be between 1 and 10")
}

/// Runs every rule and collects the failures.
pub fn validate_fields(reviewer: &str, comment: &str, rating: i32) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if let Some(message) = check_reviewer_name(reviewer) {
        errors.insert(ReviewField::Reviewer, message.to_string());
    }
    if let Some(message) = check_comment(comment) {
        errors.insert(ReviewField::Comment, message.to_string());
    }
    if let Some(message) = check_rating(rating) {
        errors.insert(ReviewField::Rating, message.to_string());
    }
    errors
}
