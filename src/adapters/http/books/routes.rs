//! Route configuration for book endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{get_book, search_books, BooksAppState};

/// Creates the book router.
///
/// Routes:
/// - `GET /api/books?query=&page=&pageSize=` - Search the catalogue
/// - `GET /api/books/:id` - Volume details
pub fn books_router() -> Router<BooksAppState> {
    Router::new()
        .route("/api/books", get(search_books))
        .route("/api/books/:id", get(get_book))
}
