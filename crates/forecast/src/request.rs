//! What to forecast: the next `n` days, or an explicit date range.

use chrono::NaiveDate;
use tankcast_calendar::DateRange;
use tankcast_io::DailySeries;

use crate::error::ForecastError;

/// A forecasting request for one column.
///
/// A bare horizon converts into [`ForecastRequest::Next`]:
///
/// ```
/// use tankcast_forecast::ForecastRequest;
///
/// assert_eq!(ForecastRequest::from(30), ForecastRequest::Next(30));
/// assert_eq!(ForecastRequest::Next(30).horizon(), 30);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForecastRequest {
    /// The `n` days after the last observation.
    Next(usize),
    /// Every day in `start..=end`.
    ///
    /// Only observations before `start` are used for training, so a range
    /// inside the observed period is forecast out of sample.
    Range { start: NaiveDate, end: NaiveDate },
}

impl From<usize> for ForecastRequest {
    fn from(n: usize) -> Self {
        ForecastRequest::Next(n)
    }
}

impl From<DateRange> for ForecastRequest {
    fn from(range: DateRange) -> Self {
        ForecastRequest::Range {
            start: range.start(),
            end: range.end(),
        }
    }
}

impl ForecastRequest {
    /// Number of reported forecast values: `n`, or `(end - start).days + 1`.
    ///
    /// An inverted range has horizon 0.
    pub fn horizon(&self) -> usize {
        match *self {
            ForecastRequest::Next(n) => n,
            ForecastRequest::Range { start, end } => {
                ((end - start).num_days() + 1).max(0) as usize
            }
        }
    }

    /// Splits `series` into the training part and the forecast extent.
    pub(crate) fn plan(&self, series: &DailySeries) -> Result<Plan, ForecastError> {
        match *self {
            ForecastRequest::Next(0) => Err(ForecastError::InvalidRequest {
                reason: "horizon must be at least one day".to_string(),
            }),
            ForecastRequest::Next(n) => Ok(Plan {
                train: series.clone(),
                steps: n,
                report: n,
            }),
            ForecastRequest::Range { start, end } => {
                let range = DateRange::new(start, end)?;
                if range.start() <= series.start() {
                    return Err(ForecastError::InvalidRequest {
                        reason: format!(
                            "range starts on {} but observations only begin on {}",
                            range.start(),
                            series.start()
                        ),
                    });
                }
                let train = series.before(range.start());
                // `train` ends no later than the day before `start`, so the
                // forecast always covers the whole range.
                let steps = match train.end() {
                    Some(last) => range.steps_after(last),
                    None => range.len(),
                };
                Ok(Plan {
                    train,
                    steps,
                    report: range.len(),
                })
            }
        }
    }
}

/// Training data and forecast extent derived from a request.
#[derive(Debug, Clone)]
pub(crate) struct Plan {
    /// Observations the model is fitted on.
    pub(crate) train: DailySeries,
    /// Days forecast past the end of `train`.
    pub(crate) steps: usize,
    /// Trailing forecast days that are reported; `report <= steps`.
    pub(crate) report: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series() -> DailySeries {
        // 2024-01-01 ..= 2024-01-10
        DailySeries::new(date(2024, 1, 1), (0..10).map(f64::from).collect())
    }

    #[test]
    fn horizon_of_range_is_inclusive() {
        let r = ForecastRequest::Range {
            start: date(2024, 3, 1),
            end: date(2024, 3, 31),
        };
        assert_eq!(r.horizon(), 31);
        let one_day = ForecastRequest::Range {
            start: date(2024, 3, 1),
            end: date(2024, 3, 1),
        };
        assert_eq!(one_day.horizon(), 1);
    }

    #[test]
    fn horizon_of_inverted_range_is_zero() {
        let r = ForecastRequest::Range {
            start: date(2024, 3, 2),
            end: date(2024, 3, 1),
        };
        assert_eq!(r.horizon(), 0);
    }

    #[test]
    fn from_date_range() {
        let range = DateRange::new(date(2024, 2, 1), date(2024, 2, 3)).unwrap();
        let r = ForecastRequest::from(range);
        assert_eq!(
            r,
            ForecastRequest::Range {
                start: date(2024, 2, 1),
                end: date(2024, 2, 3)
            }
        );
    }

    #[test]
    fn plan_next_uses_everything() {
        let plan = ForecastRequest::Next(4).plan(&series()).unwrap();
        assert_eq!(plan.train.len(), 10);
        assert_eq!(plan.steps, 4);
        assert_eq!(plan.report, 4);
    }

    #[test]
    fn plan_next_zero_rejected() {
        let err = ForecastRequest::Next(0).plan(&series()).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidRequest { .. }));
    }

    #[test]
    fn plan_range_after_data() {
        let r = ForecastRequest::Range {
            start: date(2024, 1, 14),
            end: date(2024, 1, 15),
        };
        let plan = r.plan(&series()).unwrap();
        assert_eq!(plan.train.len(), 10);
        // 11th ..= 15th forecast, last two reported.
        assert_eq!(plan.steps, 5);
        assert_eq!(plan.report, 2);
    }

    #[test]
    fn plan_range_inside_data_truncates_training() {
        let r = ForecastRequest::Range {
            start: date(2024, 1, 6),
            end: date(2024, 1, 8),
        };
        let plan = r.plan(&series()).unwrap();
        assert_eq!(plan.train.values(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(plan.steps, 3);
        assert_eq!(plan.report, 3);
    }

    #[test]
    fn plan_range_starting_on_first_day_rejected() {
        let r = ForecastRequest::Range {
            start: date(2024, 1, 1),
            end: date(2024, 1, 8),
        };
        let err = r.plan(&series()).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidRequest { .. }));
    }

    #[test]
    fn plan_inverted_range_is_calendar_error() {
        let r = ForecastRequest::Range {
            start: date(2024, 1, 8),
            end: date(2024, 1, 6),
        };
        let err = r.plan(&series()).unwrap_err();
        assert!(matches!(err, ForecastError::Calendar(_)));
    }
}
