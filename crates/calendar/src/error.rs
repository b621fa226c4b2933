//! Error types for the tankcast-calendar crate.

use chrono::NaiveDate;

/// Error type for all fallible operations in the tankcast-calendar crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a string is not a date in the expected format.
    #[error("invalid date '{input}' (expected {format})")]
    InvalidDate {
        /// The text that failed to parse.
        input: String,
        /// The expected `chrono` format string.
        format: &'static str,
    },

    /// Returned when a range ends before it starts.
    #[error("date range ends ({end}) before it starts ({start})")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
}
