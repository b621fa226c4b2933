//! Holiday set and 0/1 indicator vectors.

use std::collections::BTreeSet;

use chrono::NaiveDate;

/// A set of holiday dates.
///
/// Built from any iterator of dates; duplicates collapse.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HolidayCalendar {
    dates: BTreeSet<NaiveDate>,
}

impl HolidayCalendar {
    /// A calendar with no holidays.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// Number of distinct holiday dates.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Holidays in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }

    /// Indicator for `n_days` consecutive days from `start`: 1.0 on
    /// holidays, 0.0 otherwise.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use tankcast_calendar::HolidayCalendar;
    ///
    /// let new_year = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    /// let cal: HolidayCalendar = [new_year].into_iter().collect();
    /// let start = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    /// assert_eq!(cal.indicator(start, 3), vec![0.0, 1.0, 0.0]);
    /// ```
    pub fn indicator(&self, start: NaiveDate, n_days: usize) -> Vec<f64> {
        self.indicator_for(start.iter_days().take(n_days))
    }

    /// Indicator over an arbitrary date sequence.
    pub fn indicator_for<I>(&self, dates: I) -> Vec<f64>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        dates
            .into_iter()
            .map(|d| if self.is_holiday(d) { 1.0 } else { 0.0 })
            .collect()
    }
}

impl FromIterator<NaiveDate> for HolidayCalendar {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_calendar_is_all_zero() {
        let cal = HolidayCalendar::empty();
        assert!(cal.is_empty());
        assert_eq!(cal.indicator(date(2024, 1, 1), 5), vec![0.0; 5]);
    }

    #[test]
    fn duplicates_collapse() {
        let cal: HolidayCalendar = [date(2024, 5, 1), date(2024, 5, 1), date(2024, 1, 1)]
            .into_iter()
            .collect();
        assert_eq!(cal.len(), 2);
        let sorted: Vec<_> = cal.iter().collect();
        assert_eq!(sorted, vec![date(2024, 1, 1), date(2024, 5, 1)]);
    }

    #[test]
    fn indicator_marks_holidays() {
        let cal: HolidayCalendar = [date(2024, 3, 2), date(2024, 3, 4)].into_iter().collect();
        assert_eq!(
            cal.indicator(date(2024, 3, 1), 5),
            vec![0.0, 1.0, 0.0, 1.0, 0.0]
        );
    }

    #[test]
    fn indicator_for_explicit_dates() {
        let cal: HolidayCalendar = [date(2024, 12, 25)].into_iter().collect();
        let dates = [date(2024, 12, 24), date(2024, 12, 25)];
        assert_eq!(cal.indicator_for(dates), vec![0.0, 1.0]);
    }
}
