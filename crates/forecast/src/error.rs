//! Error types for the tankcast-forecast crate.

/// Error type for everything that can go wrong while forecasting one column.
///
/// The column pipeline never lets one of these escape: it is logged and
/// turned into a fallback [`ForecastResult`](crate::ForecastResult).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ForecastError {
    /// Seasonal decomposition failed.
    #[error(transparent)]
    Decomposition(#[from] tankcast_decompose::DecomposeError),

    /// Order selection or the final model fit failed.
    #[error(transparent)]
    ModelFit(#[from] tankcast_sarimax::SarimaxError),

    /// A holiday regressor does not line up with its series or horizon.
    #[error("regressor length mismatch: expected {expected} values, got {got}")]
    Alignment {
        /// Length of the series or horizon.
        expected: usize,
        /// Length of the regressor.
        got: usize,
    },

    /// The fitted model produced NaN or infinity, e.g. from an explosive
    /// relaxed fit.
    #[error("forecast is not finite at step {step}")]
    NonFiniteForecast {
        /// Zero-based horizon step of the first bad value.
        step: usize,
    },

    /// Scoring the forecast failed.
    #[error(transparent)]
    Evaluation(#[from] tankcast_evaluate::EvaluateError),

    /// Invalid date range.
    #[error(transparent)]
    Calendar(#[from] tankcast_calendar::CalendarError),

    /// Returned when a request cannot be served from the given series.
    #[error("invalid request: {reason}")]
    InvalidRequest {
        /// Description of the problem.
        reason: String,
    },
}
