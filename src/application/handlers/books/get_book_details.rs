//! GetBookDetailsHandler - Query handler for a single volume.

use std::sync::Arc;

use crate::domain::book::BookDetails;
use crate::domain::foundation::BookId;
use crate::ports::{BookSearchError, BookSearchService};

/// Query to get one book by its catalogue id.
#[derive(Debug, Clone)]
pub struct GetBookDetailsQuery {
    pub book_id: BookId,
}

/// Handler for retrieving normalized book details.
pub struct GetBookDetailsHandler {
    service: Arc<dyn BookSearchService>,
}

impl GetBookDetailsHandler {
    pub fn new(service: Arc<dyn BookSearchService>) -> Self {
        Self { service }
    }

    pub async fn handle(&self, query: GetBookDetailsQuery) -> Result<BookDetails, BookSearchError> {
        let details = self.service.details(&query.book_id).await?;
        Ok(details.normalized())
    }
}
