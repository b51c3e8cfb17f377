//! HTTP DTOs for review endpoints.

use serde::{Deserialize, Serialize};

use crate::application::CreateReviewCommand;

/// Request to create a review.
///
/// Fields are taken raw; the command handler validates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub book_id: String,
    #[serde(default)]
    pub reviewer: String,
    #[serde(default)]
    pub comment: String,
    pub rating: i32,
}

impl From<CreateReviewRequest> for CreateReviewCommand {
    fn from(req: CreateReviewRequest) -> Self {
        Self {
            book_id: req.book_id,
            reviewer: req.reviewer,
            comment: req.comment,
            rating: req.rating,
        }
    }
}
