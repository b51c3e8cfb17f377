//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod books;
pub mod reviews;

pub use books::{
    GetBookDetailsHandler, GetBookDetailsQuery, SearchBooksError, SearchBooksHandler,
    SearchBooksQuery, SearchBooksResult,
};
pub use reviews::{
    CreateReviewCommand, CreateReviewError, CreateReviewHandler, ListReviewsHandler,
    ListReviewsQuery,
};
