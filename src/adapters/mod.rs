//! Adapters - Implementations of ports for external systems.
//!
//! - `google_books` - Book catalogue backed by the Google Books API
//! - `api_client` - Both ports over this service's REST API
//! - `postgres` - PostgreSQL review store
//! - `memory` - In-memory review store
//! - `http` - Axum routers exposing the REST API

pub mod api_client;
pub mod google_books;
pub mod http;
pub mod memory;
pub mod postgres;
