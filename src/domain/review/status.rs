//! DraftStatus enum for the review form lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle status of a review draft.
///
/// ```text
/// Pristine ─► Editing ─► Valid | Invalid ─► Submitting ─► Submitted | SubmitError
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DraftStatus {
    #[default]
    Pristine,
    Editing,
    Invalid,
    Valid,
    Submitting,
    Submitted,
    SubmitError,
}

impl DraftStatus {
    /// Returns true if field edits are accepted.
    pub fn accepts_edits(&self) -> bool {
        !matches!(self, DraftStatus::Submitting)
    }
}

impl StateMachine for DraftStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DraftStatus::*;
        matches!(
            (self, target),
            (Pristine, Editing)
                | (Pristine, Invalid)
                | (Editing, Valid)
                | (Editing, Invalid)
                | (Valid, Editing)
                | (Valid, Submitting)
                | (Invalid, Editing)
                | (Invalid, Invalid)
                | (Submitting, Submitted)
                | (Submitting, SubmitError)
                | (Submitted, Editing)
                | (Submitted, Invalid)
                | (SubmitError, Editing)
                | (SubmitError, Invalid)
                | (SubmitError, Submitting)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DraftStatus::*;
        match self {
            Pristine => vec![Editing, Invalid],
            Editing => vec![Valid, Invalid],
            Valid => vec![Editing, Submitting],
            Invalid => vec![Editing, Invalid],
            Submitting => vec![Submitted, SubmitError],
            Submitted => vec![Editing, Invalid],
            SubmitError => vec![Editing, Invalid, Submitting],
        }
    }
}

impl fmt::Display for DraftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DraftStatus::Pristine => "Pristine",
            DraftStatus::Editing => "Editing",
            DraftStatus::Invalid => "Invalid",
            DraftStatus::Valid => "Valid",
            DraftStatus::Submitting => "Submitting",
            DraftStatus::Submitted => "Submitted",
            DraftStatus::SubmitError => "SubmitError",
        };
        write!(f, "{}", s)
    }
}
