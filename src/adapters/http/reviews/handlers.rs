//! HTTP handlers for review endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::application::{CreateReviewHandler, ListReviewsHandler, ListReviewsQuery};
use crate::domain::foundation::BookId;
use crate::domain::review::Review;
use crate::ports::ReviewStore;

use super::dto::CreateReviewRequest;

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ReviewsAppState {
    create_handler: Arc<CreateReviewHandler>,
    list_handler: Arc<ListReviewsHandler>,
}

impl ReviewsAppState {
    pub fn new(store: Arc<dyn ReviewStore>) -> Self {
        Self {
            create_handler: Arc::new(CreateReviewHandler::new(store.clone())),
            list_handler: Arc::new(ListReviewsHandler::new(store)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/reviews - Submit a review
pub async fn create_review(
    State(state): State<ReviewsAppState>,
    Json(req): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    let review = state.create_handler.handle(req.into()).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// GET /api/reviews/:book_id - Reviews for one book
pub async fn list_reviews(
    State(state): State<ReviewsAppState>,
    Path(book_id): Path<String>,
) -> Result<Json<Vec<Review>>, ApiError> {
    let book_id = BookId::new(book_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let reviews = state.list_handler.handle(ListReviewsQuery { book_id }).await?;
    Ok(Json(reviews))
}
