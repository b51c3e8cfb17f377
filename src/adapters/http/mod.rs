//! HTTP adapters - REST API implementations.
//!
//! Each resource has its own router; [`api_router`] merges them with the
//! health probe.

pub mod books;
pub mod error;
pub mod reviews;

use axum::{routing::get, Json, Router};
use serde::Serialize;

pub use books::{books_router, BooksAppState};
pub use error::{ApiError, ErrorResponse};
pub use reviews::{reviews_router, ReviewsAppState};

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// GET /health - Liveness probe
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Full API: `/health`, `/api/books*` and `/api/reviews*`.
pub fn api_router(books: BooksAppState, reviews: ReviewsAppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(books_router().with_state(books))
        .merge(reviews_router().with_state(reviews))
}
