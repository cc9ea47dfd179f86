use chrono::NaiveDate;
use thiserror::Error;

/// eggtrack error types
#[derive(Error, Debug)]
pub enum TrackError {
    /// User input rejected before reaching the store
    #[error("{0}")]
    Validation(String),

    /// Range with start after end (caller bug)
    #[error("invalid range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// SQLite failure (open, query or write)
    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),

    /// Stored row that cannot be decoded
    #[error("corrupt record: {0}")]
    Corrupt(String),

    /// Edit targeted a date with no record
    #[error("no record for {}", .0.format(super::DATE_FORMAT))]
    NotFound(NaiveDate),

    /// Edit would move a record onto an occupied date
    #[error("a record for {} already exists", .0.format(super::DATE_FORMAT))]
    DateTaken(NaiveDate),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output could not be produced
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for eggtrack
pub type Result<T> = std::result::Result<T, TrackError>;
