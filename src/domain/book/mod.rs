//! Book catalogue types.
//!
//! - `BookSummary` - one entry of a search result page
//! - `BookDetails` - full volume information for the details page

mod details;
mod summary;

pub use details::{canonical_info_link, extract_genres, BookDetails, ImageLinks};
pub use summary::BookSummary;
