//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `BookSearchService` - Book catalogue search and volume details
//! - `ReviewStore` - Review persistence

mod book_search_service;
mod review_store;

pub use book_search_service::{BookSearchError, BookSearchService};
pub use review_store::{ReviewStore, ReviewStoreError};
