//! Booklens - Book search and review service
//!
//! This crate searches the Google Books catalogue with paginated, debounced
//! queries and lets readers post 1-10 star reviews for a book.
//!
//! - `domain` - books, search sessions, reviews and the review draft
//! - `ports` - catalogue and review store traits
//! - `application` - handlers plus the search aggregator and review dialog
//! - `adapters` - HTTP API, Google Books, PostgreSQL, in-memory and API client
//! - `config` - environment-driven configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
