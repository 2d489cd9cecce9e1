//! Error types for weekend-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WeekendError {
    /// The input is not a calendar date or date-time. Empty input, malformed
    /// formats and out-of-range dates all land here.
    #[error("Invalid timestamp: {0}")]
    Parse(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid weekend anchor: {0}")]
    InvalidAnchor(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),
}

pub type Result<T> = std::result::Result<T, WeekendError>;
