//! Per-column forecast results and their serialized form.

use chrono::NaiveDate;
use serde::Serialize;
use tankcast_calendar::format_date;
use tankcast_evaluate::Metrics;
use tankcast_sarimax::Order;

/// Outcome of forecasting one column.
///
/// A failed column keeps its name and horizon but has no index, all-NaN
/// values and all-NaN metrics; [`error()`](Self::error) says why.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    column: String,
    index: Option<Vec<NaiveDate>>,
    values: Vec<f64>,
    metrics: Metrics,
    order: Option<Order>,
    error: Option<String>,
}

impl ForecastResult {
    pub(crate) fn success(
        column: &str,
        index: Vec<NaiveDate>,
        values: Vec<f64>,
        metrics: Metrics,
        order: Order,
    ) -> Self {
        Self {
            column: column.to_string(),
            index: Some(index),
            values,
            metrics,
            order: Some(order),
            error: None,
        }
    }

    /// Fallback result: `n` NaN values and NaN metrics.
    pub(crate) fn failed(column: &str, n: usize, error: impl ToString) -> Self {
        Self {
            column: column.to_string(),
            index: None,
            values: vec![f64::NAN; n],
            metrics: Metrics::nan(),
            order: None,
            error: Some(error.to_string()),
        }
    }

    /// Returns the column (tank) name.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Returns the forecast dates, or `None` for a failed column.
    pub fn index(&self) -> Option<&[NaiveDate]> {
        self.index.as_deref()
    }

    /// Returns the forecast values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    pub fn mse(&self) -> f64 {
        self.metrics.mse
    }

    pub fn mae(&self) -> f64 {
        self.metrics.mae
    }

    pub fn rmse(&self) -> f64 {
        self.metrics.rmse
    }

    /// Returns the selected model order, or `None` for a failed column.
    pub fn order(&self) -> Option<Order> {
        self.order
    }

    /// Returns the failure message, or `None` on success.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// `true` if the pipeline failed for this column.
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    /// Rounds every value to `decimals` places; NaN stays NaN.
    pub fn rounded(mut self, decimals: i32) -> Self {
        for v in &mut self.values {
            *v = round_to(*v, decimals);
        }
        self
    }

    /// Builds the serializable record for this column.
    pub fn report(&self) -> ColumnReport {
        let dates = self
            .index
            .iter()
            .flatten()
            .map(|d| Some(format_date(*d)))
            .chain(std::iter::repeat(None));
        let forecast = self
            .values
            .iter()
            .zip(dates)
            .map(|(&v, date)| ForecastPoint {
                date,
                value: v.is_finite().then_some(v),
            })
            .collect();
        ColumnReport {
            tank: self.column.clone(),
            forecast,
            metrics: self.metrics,
            order: self.order.map(|o| o.as_tuple()),
            error: self.error.clone(),
        }
    }
}

/// Rounds `value` half away from zero to `decimals` places. NaN and
/// infinities pass through unchanged.
///
/// # Example
///
/// ```
/// use tankcast_forecast::round_to;
///
/// assert_eq!(round_to(1.23456, 3), 1.235);
/// assert!(round_to(f64::NAN, 3).is_nan());
/// ```
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// One forecast day in a [`ColumnReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    /// `dd-mm-YYYY`; `null` for a failed column.
    pub date: Option<String>,
    /// `null` when the value is NaN.
    pub value: Option<f64>,
}

/// JSON record for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnReport {
    pub tank: String,
    pub forecast: Vec<ForecastPoint>,
    pub metrics: Metrics,
    /// `[p, d, q]`.
    pub order: Option<(usize, usize, usize)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
