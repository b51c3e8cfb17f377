//! HTTP handlers for book endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::application::{
    GetBookDetailsHandler, GetBookDetailsQuery, SearchBooksHandler, SearchBooksQuery,
};
use crate::domain::book::BookDetails;
use crate::domain::foundation::BookId;
use crate::ports::BookSearchService;

use super::dto::{SearchBooksParams, SearchBooksResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct BooksAppState {
    search_handler: Arc<SearchBooksHandler>,
    details_handler: Arc<GetBookDetailsHandler>,
    default_page_size: u32,
}

impl BooksAppState {
    pub fn new(
        service: Arc<dyn BookSearchService>,
        default_page_size: u32,
        max_page_size: u32,
    ) -> Self {
        Self {
            search_handler: Arc::new(SearchBooksHandler::new(service.clone(), max_page_size)),
            details_handler: Arc::new(GetBookDetailsHandler::new(service)),
            default_page_size,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/books?query=&page=&pageSize= - One page of search results
pub async fn search_books(
    State(state): State<BooksAppState>,
    Query(params): Query<SearchBooksParams>,
) -> Result<Json<SearchBooksResponse>, ApiError> {
    let query = SearchBooksQuery {
        query: params.query.unwrap_or_default(),
        page: params.page.unwrap_or(1),
        page_size: params.page_size.unwrap_or(state.default_page_size),
    };

    let result = state.search_handler.handle(query).await?;
    Ok(Json(result.into()))
}

/// GET /api/books/:id - Normalized details of one volume
pub async fn get_book(
    State(state): State<BooksAppState>,
    Path(id): Path<String>,
) -> Result<Json<BookDetails>, ApiError> {
    let book_id = BookId::new(id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let details = state
        .details_handler
        .handle(GetBookDetailsQuery { book_id })
        .await?;
    Ok(Json(details))
}
