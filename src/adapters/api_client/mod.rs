//! Client for this service's own REST API.
//!
//! Implements both ports so the client-side core (`SearchAggregator`,
//! `ReviewDialog`) can run against a deployed backend.

mod client;

pub use client::ApiClient;
