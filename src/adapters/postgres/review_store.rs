//! PostgreSQL implementation of ReviewStore.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};

use crate::domain::foundation::{BookId, Rating, ReviewId};
use crate::domain::review::{Review, ReviewInput};
use crate::ports::{ReviewStore, ReviewStoreError};

/// PostgreSQL implementation of ReviewStore.
#[derive(Clone)]
pub struct PostgresReviewStore {
    pool: PgPool,
}

impl PostgresReviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewStore for PostgresReviewStore {
    async fn create(&self, input: ReviewInput) -> Result<Review, ReviewStoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO reviews (book_id, reviewer, comment, rating)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(input.book_id().as_str())
        .bind(input.reviewer())
        .bind(input.comment())
        .bind(input.rating().value())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ReviewStoreError::Server(format!("Failed to insert review: {}", e)))?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| ReviewStoreError::Server(format!("Failed to read review id: {}", e)))?;

        Ok(input.into_review(ReviewId::new(id)))
    }

    async fn list_by_book(&self, book_id: &BookId) -> Result<Vec<Review>, ReviewStoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, book_id, reviewer, comment, rating
            FROM reviews
            WHERE book_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(book_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ReviewStoreError::Server(format!("Failed to fetch reviews: {}", e)))?;

        rows.iter().map(row_to_review).collect()
    }
}

fn row_to_review(row: &PgRow) -> Result<Review, ReviewStoreError> {
    let column =
        |e: sqlx::Error| ReviewStoreError::Server(format!("Failed to read review row: {}", e));

    let id: i64 = row.try_get("id").map_err(column)?;
    let book_id: String = row.try_get("book_id").map_err(column)?;
    let rating: i32 = row.try_get("rating").map_err(column)?;

    Ok(Review {
        id: ReviewId::new(id),
        book_id: BookId::new(book_id)
            .map_err(|e| ReviewStoreError::Server(format!("Corrupt review {}: {}", id, e)))?,
        reviewer: row.try_get("reviewer").map_err(column)?,
        comment: row.try_get("comment").map_err(column)?,
        rating: Rating::try_from_i32(rating)
            .map_err(|e| ReviewStoreError::Server(format!("Corrupt review {}: {}", id, e)))?,
    })
}
