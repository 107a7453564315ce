//! Validation errors for roster and house input.

use thiserror::Error;

/// Result type alias for input validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Malformed input rejected before any planning happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("group submitted by {0:?} has no id")]
    MissingGroupId(String),

    #[error("group {0} has no contact name")]
    MissingContactName(String),

    #[error("group {0} has no members")]
    EmptyGroup(String),

    #[error("group {group_id} has likelihood {likelihood}, expected 0..=100")]
    LikelihoodOutOfRange { group_id: String, likelihood: u8 },

    #[error("unit {0} has non-positive capacity")]
    NonPositiveCapacity(String),

    #[error("duplicate group id: {0}")]
    DuplicateGroup(String),

    #[error("duplicate unit id: {0}")]
    DuplicateUnit(String),
}
