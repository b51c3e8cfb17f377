//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (identifiers, rating, errors, state machine)
//! - `book` - Catalogue types (search summaries, volume details)
//! - `search` - Paginated search session state machine
//! - `review` - Review records and the review draft state machine

pub mod book;
pub mod foundation;
pub mod review;
pub mod search;
