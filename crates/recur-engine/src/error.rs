//! Error types for recur-engine operations.

use thiserror::Error;

/// The one way recurrence parsing fails.
///
/// Carries the phrase exactly as the caller supplied it (before case folding
/// and whitespace collapsing) so it can be shown back to a user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecurError {
    #[error("Unsupported recurrence: {0}")]
    UnsupportedRecurrence(String),
}

impl RecurError {
    /// The phrase that failed to parse.
    pub fn phrase(&self) -> &str {
        match self {
            RecurError::UnsupportedRecurrence(phrase) => phrase,
        }
    }
}

/// Failures converting the non-recurrence task fields.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("Invalid priority: {0}")]
    InvalidPriority(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid mapping: {0}")]
    InvalidMapping(String),
}

pub type Result<T> = std::result::Result<T, RecurError>;
