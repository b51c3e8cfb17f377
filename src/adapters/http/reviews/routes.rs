//! Route configuration for review endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{create_review, list_reviews, ReviewsAppState};

/// Creates the review router.
///
/// Routes:
/// - `POST /api/reviews` - Submit a review
/// - `GET /api/reviews/:book_id` - Reviews for one book
pub fn reviews_router() -> Router<ReviewsAppState> {
    Router::new()
        .route("/api/reviews", post(create_review))
        .route("/api/reviews/:book_id", get(list_reviews))
}
