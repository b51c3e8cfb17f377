//! Review domain module.
//!
//! - `Review` / `ReviewInput` - the persisted record and validated input
//! - `ReviewDraft` - client-side form state machine (validation, dirty
//!   tracking, submission gating)
//! - field rules shared by the form and the review API

mod draft;
mod record;
mod status;
mod validation;

pub use draft::{DraftError, DraftSubmission, ReviewDraft, SUBMIT_FAILED_MESSAGE};
pub use record::{average_rating, Review, ReviewInput};
pub use status::DraftStatus;
pub use validation::{
    check_comment, check_rating, check_reviewer_name, validate_fields, FieldErrors, ReviewField,
    COMMENT_MAX_CHARS, COMMENT_MIN_CHARS, NAME_MAX_CHARS, NAME_MIN_CHARS,
};
