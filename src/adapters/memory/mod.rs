//! In-memory adapters.

mod in_memory_review_store;

pub use in_memory_review_store::InMemoryReviewStore;
