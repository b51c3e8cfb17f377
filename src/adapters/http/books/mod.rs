//! HTTP adapter for book endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{SearchBooksParams, SearchBooksResponse};
pub use handlers::BooksAppState;
pub use routes::books_router;
