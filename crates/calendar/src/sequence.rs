//! Consecutive daily date sequences.

use chrono::NaiveDate;

/// The `n_days` dates strictly after `last`: the index of an
/// `n_days`-step forecast for a series ending on `last`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use tankcast_calendar::days_after;
///
/// let last = NaiveDate::from_ymd_opt(2024, 2, 27).unwrap();
/// let dates = days_after(last, 3);
/// assert_eq!(dates[2], NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
/// ```
pub fn days_after(last: NaiveDate, n_days: usize) -> Vec<NaiveDate> {
    last.iter_days().skip(1).take(n_days).collect()
}
