//! HTTP adapter for review endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::CreateReviewRequest;
pub use handlers::ReviewsAppState;
pub use routes::reviews_router;
