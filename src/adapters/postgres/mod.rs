//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresReviewStore` - Review persistence
//!
//! Schema lives in `migrations/` and is applied by [`run_migrations`].

mod review_store;

pub use review_store::PostgresReviewStore;

use sqlx::PgPool;

/// Applies the embedded migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
