//! Inclusive date ranges and the day-first text format.

use chrono::NaiveDate;

use crate::error::CalendarError;

/// Day-first format used on the command line and in forecast output.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Parses a `dd-mm-YYYY` date.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use tankcast_calendar::parse_date;
///
/// assert_eq!(parse_date("05-03-2024").unwrap(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
/// assert!(parse_date("2024-03-05").is_err());
/// ```
pub fn parse_date(input: &str) -> Result<NaiveDate, CalendarError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| CalendarError::InvalidDate {
        input: input.to_string(),
        format: DATE_FORMAT,
    })
}

/// Formats a date as `dd-mm-YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// An inclusive `[start, end]` span of days.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range; `start == end` is a one-day range.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvertedRange`] if `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CalendarError> {
        if end < start {
            return Err(CalendarError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the range, both ends included.
    pub fn len(&self) -> usize {
        // end >= start is enforced by the constructor.
        (self.end - self.start).num_days() as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Days from the day after `last` through `end`: how far a series
    /// ending on `last` must be forecast to cover the range. Zero when
    /// `last` is on or after `end`.
    pub fn steps_after(&self, last: NaiveDate) -> usize {
        (self.end - last).num_days().max(0) as usize
    }
}
