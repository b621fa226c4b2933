//! Error types for tankcast-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the tankcast-io crate.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an operating-system I/O failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Wraps an error originating from the CSV parser.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Wraps a JSON serialisation failure.
    #[error("json error: {reason}")]
    Json {
        /// Description of the underlying JSON failure.
        reason: String,
    },

    /// Returned when a date cell cannot be parsed.
    #[error("invalid date '{value}' on line {line}")]
    InvalidDate {
        /// 1-based line number in the source file.
        line: u64,
        /// The offending text.
        value: String,
    },

    /// Returned when a value cell is neither a number nor empty.
    #[error("invalid value '{value}' in column '{column}' on line {line}")]
    InvalidValue {
        line: u64,
        column: String,
        value: String,
    },

    /// Returned when the same date appears on two rows.
    #[error("duplicate date {date}")]
    DuplicateDate { date: chrono::NaiveDate },

    /// Returned when a table has no value columns or no rows.
    #[error("table contains no data")]
    NoData,
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        IoError::Csv {
            reason: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        IoError::Json {
            reason: e.to_string(),
        }
    }
}
