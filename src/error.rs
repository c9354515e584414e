//! Error types for follow-up operations.
//!
//! Errors are classified by recoverability:
//! - NotFound: caller referenced a missing connection — surfaced, not retried
//! - Storage: transient SQLite failure — the caller may retry with backoff
//!
//! Unrecognized frequency values are deliberately absent here: they never
//! surface as errors, they degrade to "no schedule" in the frequency policy.

use serde::Serialize;
use thiserror::Error;

use crate::db::DbError;

/// Error type for follow-up engine operations.
#[derive(Debug, Error)]
pub enum FollowUpError {
    #[error("Connection not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] DbError),
}

impl FollowUpError {
    /// Returns true if this error is worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FollowUpError::Storage(_))
    }

    /// Get a user-friendly recovery suggestion.
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FollowUpError::NotFound(_) => "This connection no longer exists. Refresh the list.",
            FollowUpError::Storage(_) => "Could not update follow-up — try again.",
        }
    }
}

/// Serializable error representation for the UI layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFacingError {
    pub message: String,
    pub can_retry: bool,
    pub recovery_suggestion: String,
}

impl From<&FollowUpError> for UserFacingError {
    fn from(err: &FollowUpError) -> Self {
        UserFacingError {
            message: err.to_string(),
            can_retry: err.is_retryable(),
            recovery_suggestion: err.recovery_suggestion().to_string(),
        }
    }
}
