//! Error types for LoveLog
//!
//! Only the boundaries return these: import parsing, entry parsing, store I/O and
//! calendar arguments. The metric calculators are total and never fail.

use thiserror::Error;

/// Errors that can occur at the journal boundaries
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid import payload: {0}")]
    InvalidPayload(String),

    #[error("Malformed record at index {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    #[error("Invalid date '{0}': expected zero-padded YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid month {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Entry needs a date and at least one value")]
    EmptyEntry,

    #[error("Store error: {0}")]
    StoreError(String),
}

/// Result alias for journal boundary operations
pub type Result<T> = std::result::Result<T, JournalError>;
