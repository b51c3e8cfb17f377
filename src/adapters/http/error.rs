//! Error responses shared by every endpoint.
//!
//! All failures are rendered as `{code, message, details?}` with the status
//! code chosen here, so handlers only decide *which* error occurred.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::application::{CreateReviewError, SearchBooksError};
use crate::domain::foundation::ErrorCode;
use crate::domain::review::FieldErrors;
use crate::ports::{BookSearchError, ReviewStoreError};

/// Standard error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Validation failure with per-field messages under `details`.
    pub fn validation(errors: &FieldErrors) -> Self {
        Self {
            details: serde_json::to_value(errors).ok(),
            ..Self::new(ErrorCode::ValidationFailed, "Review validation failed")
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Field messages carried by a validation response, if any.
    pub fn field_errors(&self) -> Option<FieldErrors> {
        if self.code != ErrorCode::ValidationFailed.to_string() {
            return None;
        }
        self.details
            .clone()
            .and_then(|details| serde_json::from_value(details).ok())
    }
}

/// API error type that converts application errors to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Validation(FieldErrors),
    NotFound(String),
    RateLimited,
    BadGateway(String),
    Internal(String),
}

impl From<BookSearchError> for ApiError {
    fn from(err: BookSearchError) -> Self {
        match err {
            BookSearchError::RateLimited => ApiError::RateLimited,
            BookSearchError::NotFound(id) => ApiError::NotFound(id),
            other => ApiError::BadGateway(other.to_string()),
        }
    }
}

impl From<SearchBooksError> for ApiError {
    fn from(err: SearchBooksError) -> Self {
        match err {
            SearchBooksError::BlankQuery => {
                ApiError::BadRequest("Query parameter 'query' is required".to_string())
            }
            SearchBooksError::PageOutOfRange(page) => {
                ApiError::BadRequest(format!("Page {} is out of range", page))
            }
            SearchBooksError::Search(e) => e.into(),
        }
    }
}

impl From<ReviewStoreError> for ApiError {
    fn from(err: ReviewStoreError) -> Self {
        match err {
            ReviewStoreError::Invalid(errors) => ApiError::Validation(errors),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<CreateReviewError> for ApiError {
    fn from(err: CreateReviewError) -> Self {
        match err {
            CreateReviewError::InvalidBookId(e) => ApiError::BadRequest(e.to_string()),
            CreateReviewError::Invalid(errors) => ApiError::Validation(errors),
            CreateReviewError::Store(e) => e.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg)),
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::validation(&errors))
            }
            ApiError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(ErrorCode::BookNotFound, format!("Book not found: {}", id)),
            ),
            ApiError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                ErrorResponse::new(
                    ErrorCode::RateLimited,
                    "Rate limit exceeded. Please try again later.",
                ),
            ),
            ApiError::BadGateway(msg) => {
                tracing::warn!(error = %msg, "book catalogue request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse::new(ErrorCode::UpstreamUnavailable, "Failed to fetch books"),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::internal("An internal error occurred"),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::review::{validate_fields, ReviewField};

    #[test]
    fn catalogue_errors_map_to_statuses() {
        let cases = [
            (BookSearchError::RateLimited, StatusCode::TOO_MANY_REQUESTS),
            (BookSearchError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (BookSearchError::upstream(500, "boom"), StatusCode::BAD_GATEWAY),
            (BookSearchError::Network("reset".into()), StatusCode::BAD_GATEWAY),
            (BookSearchError::Parse("eof".into()), StatusCode::BAD_GATEWAY),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn validation_response_round_trips_field_errors() {
        let errors = validate_fields("A", "short", 5);
        let response = ErrorResponse::validation(&errors);

        assert_eq!(response.code, "VALIDATION_FAILED");
        let parsed = response.field_errors().unwrap();
        assert_eq!(
            parsed[&ReviewField::Reviewer],
            "Name must be at least 2 characters"
        );
        assert_eq!(parsed, errors);
    }

    #[test]
    fn non_validation_response_has_no_field_errors() {
        assert!(ErrorResponse::bad_request("nope").field_errors().is_none());
    }
}
