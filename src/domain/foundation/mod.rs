//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, error types and the state machine
//! trait that form the vocabulary of the booklens domain.

mod errors;
mod ids;
mod rating;
mod secure_url;
mod state_machine;

pub use errors::{ErrorCode, ValidationError};
pub use ids::{BookId, ReviewId};
pub use rating::Rating;
pub use secure_url::{upgrade_optional, upgrade_to_https};
pub use state_machine::StateMachine;
