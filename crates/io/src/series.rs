//! Gap-free daily series.

use chrono::{Days, NaiveDate};

/// Values on consecutive days starting at `start`.
///
/// Dates are implicit: value `i` belongs to `start + i` days.
#[derive(Clone, Debug, PartialEq)]
pub struct DailySeries {
    start: NaiveDate,
    values: Vec<f64>,
}

impl DailySeries {
    pub fn new(start: NaiveDate, values: Vec<f64>) -> Self {
        Self { start, values }
    }

    /// Date of the first value.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Date of the last value, or `None` for an empty series.
    pub fn end(&self) -> Option<NaiveDate> {
        self.len()
            .checked_sub(1)
            .and_then(|last| self.date_at(last))
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Date of value `index`.
    pub fn date_at(&self, index: usize) -> Option<NaiveDate> {
        self.start.checked_add_days(Days::new(index as u64))
    }

    /// The prefix of the series strictly before `date`.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use tankcast_io::DailySeries;
    ///
    /// let s = DailySeries::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), vec![1.0, 2.0, 3.0]);
    /// let head = s.before(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
    /// assert_eq!(head.values(), &[1.0, 2.0]);
    /// ```
    pub fn before(&self, date: NaiveDate) -> DailySeries {
        let keep = (date - self.start).num_days().clamp(0, self.len() as i64) as usize;
        DailySeries {
            start: self.start,
            values: self.values[..keep].to_vec(),
        }
    }
}
