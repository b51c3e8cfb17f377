//! Google Books adapter.

mod client;
mod wire;

pub use client::{GoogleBooksClient, GoogleBooksClientConfig};
