//! Error taxonomy for the workflow engine and persistence gateway.
//!
//! Every lifecycle failure is locally recoverable and surfaced to the caller
//! as a typed variant with a human-readable message; none are fatal to the
//! process. Data-integrity anomalies during search and reporting are
//! deliberately *not* errors (unresolvable joins are skipped).

use thiserror::Error;

/// Failure writing a collection through the persistence gateway.
///
/// Reads never produce this: an absent or unreadable backing store reads as
/// an empty collection.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write collection: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode collection: {0}")]
    Encode(#[from] serde_json::Error),
}

/// All the ways a workflow operation can refuse.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    #[error("user id or password is incorrect")]
    InvalidCredential,

    #[error("this operation requires a {expected} account")]
    RoleMismatch { expected: crate::Role },

    #[error("you already have an active or pending proposal")]
    DuplicateActiveProposal,

    #[error("your supervision capacity is full ({limit} active supervisions)")]
    CapacityExceeded { limit: u32 },

    #[error("you need an approved proposal before requesting a defense")]
    NoApprovedProposal,

    #[error("your approved proposal has no recorded approval date")]
    MissingApprovalDate,

    #[error("thesis '{thesis_id}' has no recorded defense date")]
    MissingDefenseDate { thesis_id: String },

    /// A time gate (the 90-day defense window, or the defense date itself)
    /// has not yet been satisfied.
    #[error("too early: {0}")]
    TooEarly(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl WorkflowError {
    /// Convenience constructor for lookups that came up empty.
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        WorkflowError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Convenience constructor for malformed input.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        WorkflowError::Validation(message.into())
    }
}
