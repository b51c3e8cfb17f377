//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Backend command/query handlers live in `handlers`; `SearchAggregator` and
//! `ReviewDialog` drive the client-side state machines.

pub mod handlers;
mod review_dialog;
mod search_aggregator;

pub use handlers::{
    CreateReviewCommand, CreateReviewError, CreateReviewHandler, GetBookDetailsHandler,
    GetBookDetailsQuery, ListReviewsHandler, ListReviewsQuery, SearchBooksError,
    SearchBooksHandler, SearchBooksQuery, SearchBooksResult,
};
pub use review_dialog::{ReviewDialog, ReviewDialogError, LOAD_FAILED_MESSAGE};
pub use search_aggregator::{SearchAggregator, SearchEvent, DEFAULT_DEBOUNCE};
