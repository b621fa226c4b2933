//! Error types for the tankcast-sarimax crate.

/// Error type for all fallible operations in the tankcast-sarimax crate.
///
/// Covers input validation, exogenous regressor alignment, numerical
/// failures inside the Kalman filter and optimizer failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SarimaxError {
    /// Returned when the input data is empty.
    #[error("input data is empty")]
    EmptyData,

    /// Returned when the input data has fewer observations than required.
    #[error("insufficient data: got {n} observations, need at least {min}")]
    InsufficientData {
        /// Number of observations provided.
        n: usize,
        /// Minimum number of observations required.
        min: usize,
    },

    /// Returned when the input data or regressor contains NaN or infinity.
    #[error("input data contains non-finite values")]
    NonFiniteData,

    /// Returned when the (differenced) data has zero variance.
    #[error("input data is constant (zero variance)")]
    ConstantData,

    /// Returned when an exogenous regressor does not line up with the
    /// series or horizon it accompanies.
    #[error("exogenous regressor has length {got}, expected {expected}")]
    ExogLengthMismatch {
        /// Required length.
        expected: usize,
        /// Length provided.
        got: usize,
    },

    /// Returned when a regressor is supplied to a model fitted without one.
    #[error("model was fitted without an exogenous regressor")]
    UnexpectedExog,

    /// Returned when a stationary initial state covariance does not exist.
    #[error("model is non-stationary")]
    NonStationary,

    /// Returned when the Kalman filter produces a non-finite or degenerate
    /// prediction variance.
    #[error("likelihood evaluation failed: {reason}")]
    NonFiniteLikelihood {
        /// What went wrong.
        reason: String,
    },

    /// Returned when the optimizer cannot find a finite likelihood.
    #[error("optimisation failed to converge: {reason}")]
    OptimizationFailed {
        /// What went wrong.
        reason: String,
    },

    /// Returned when the order search has no candidates to evaluate.
    #[error("order search grid is empty")]
    EmptyGrid,
}
