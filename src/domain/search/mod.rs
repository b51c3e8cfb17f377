//! Search domain module.
//!
//! Owns the state of an incremental, paginated book search: query
//! debouncing hand-off, page cursor, de-duplicated result accumulation,
//! end-of-results detection and stale-response discarding.

mod page;
mod session;

pub use page::{PageOutcome, PageRequest, DEFAULT_PAGE_SIZE};
pub use session::{FetchFailure, SearchSession, SearchSnapshot};
