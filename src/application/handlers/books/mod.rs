//! Book query handlers.

mod get_book_details;
mod search_books;

pub use get_book_details::{GetBookDetailsHandler, GetBookDetailsQuery};
pub use search_books::{SearchBooksError, SearchBooksHandler, SearchBooksQuery, SearchBooksResult};
