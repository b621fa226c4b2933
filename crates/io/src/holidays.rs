//! Holiday list files: one date per line, `#` starts a comment.

use std::path::Path;

use tankcast_calendar::HolidayCalendar;
use tracing::info;

use crate::error::IoError;
use crate::table::parse_date_cell;

/// Reads a holiday file into a [`HolidayCalendar`].
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist and
/// [`IoError::InvalidDate`] for a line that is not a date.
pub fn read_holidays(path: &Path) -> Result<HolidayCalendar, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path)?;
    let calendar = parse_holidays(&text)?;
    info!(path = %path.display(), holidays = calendar.len(), "read holiday calendar");
    Ok(calendar)
}

/// Parses holiday file content.
///
/// ```
/// use chrono::NaiveDate;
/// use tankcast_io::parse_holidays;
///
/// let cal = parse_holidays("# national\n2024-01-26\n15-08-2024  # independence day\n").unwrap();
/// assert_eq!(cal.len(), 2);
/// assert!(cal.is_holiday(NaiveDate::from_ymd_opt(2024, 8, 15).unwrap()));
/// ```
pub fn parse_holidays(text: &str) -> Result<HolidayCalendar, IoError> {
    text.lines()
        .enumerate()
        .filter_map(|(i, raw)| {
            let line = raw.split('#').next().unwrap_or("").trim();
            (!line.is_empty()).then_some((i, line))
        })
        .map(|(i, line)| {
            parse_date_cell(line).ok_or_else(|| IoError::InvalidDate {
                line: i as u64 + 1,
                value: line.to_string(),
            })
        })
        .collect()
}
