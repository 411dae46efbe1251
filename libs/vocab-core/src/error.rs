//! Error types for vocab-core.

use thiserror::Error;

/// Result type alias using SchedulerError.
pub type Result<T> = std::result::Result<T, SchedulerError>;

/// Errors raised while writing review progress to durable storage.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised when building an interval ladder.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LadderError {
    #[error("interval ladder must contain at least one rung")]
    Empty,

    #[error("interval at rung {rung} must be at least one day")]
    ZeroInterval { rung: usize },

    #[error("invalid interval value: {value}")]
    Invalid { value: String },
}

/// Errors surfaced by the scheduler to its callers.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The outcome was applied in memory but could not be written out.
    #[error("failed to persist review progress: {0}")]
    Persist(#[from] StoreError),
}
