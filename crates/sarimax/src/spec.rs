//! SARIMAX model specification (unfitted).

use crate::error::SarimaxError;
use crate::fit::SarimaxFit;
use crate::order::Order;

/// Default cap on Nelder-Mead iterations per fit.
pub const DEFAULT_MAX_ITERS: usize = 5000;

/// An unfitted regression-with-ARIMA-errors specification.
///
/// Entry point of the typestate workflow: configure with the `with_*`
/// builders, then call [`SarimaxSpec::fit()`] to obtain a [`SarimaxFit`].
///
/// ```mermaid
/// graph LR
///     A["SarimaxSpec::new(order)"] -->|".fit(&data, exog)?"| B["SarimaxFit"]
/// ```
///
/// By default the AR polynomial is constrained to be stationary and the
/// MA polynomial to be invertible. Relaxing either lets the optimizer
/// move over raw coefficients and switches the filter to an approximate
/// diffuse start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SarimaxSpec {
    order: Order,
    enforce_stationarity: bool,
    enforce_invertibility: bool,
    max_iters: usize,
}

impl SarimaxSpec {
    /// Creates a specification for `order` with both constraints enforced.
    ///
    /// # Example
    ///
    /// ```
    /// use tankcast_sarimax::{Order, SarimaxSpec};
    ///
    /// let spec = SarimaxSpec::new(Order::new(2, 1, 1)).with_enforce_stationarity(false);
    /// assert_eq!(spec.order().as_tuple(), (2, 1, 1));
    /// assert!(!spec.enforce_stationarity());
    /// assert!(spec.enforce_invertibility());
    /// ```
    pub fn new(order: Order) -> Self {
        Self {
            order,
            enforce_stationarity: true,
            enforce_invertibility: true,
            max_iters: DEFAULT_MAX_ITERS,
        }
    }

    /// Sets whether the AR polynomial is kept stationary.
    pub fn with_enforce_stationarity(mut self, enforce: bool) -> Self {
        self.enforce_stationarity = enforce;
        self
    }

    /// Sets whether the MA polynomial is kept invertible.
    pub fn with_enforce_invertibility(mut self, enforce: bool) -> Self {
        self.enforce_invertibility = enforce;
        self
    }

    /// Sets the Nelder-Mead iteration cap.
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Returns the model order.
    pub fn order(&self) -> Order {
        self.order
    }

    pub fn enforce_stationarity(&self) -> bool {
        self.enforce_stationarity
    }

    pub fn enforce_invertibility(&self) -> bool {
        self.enforce_invertibility
    }

    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Minimum series length this model can be fitted to:
    /// `d + max(p, q + 1) + 1`.
    pub fn min_len(&self) -> usize {
        let (p, d, q) = self.order.as_tuple();
        d + p.max(q + 1) + 1
    }

    /// Fits the model by exact maximum likelihood.
    ///
    /// `exog`, when given, is a single regressor aligned with `data`; it
    /// is differenced alongside the series.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`SarimaxError::EmptyData`] | `data` is empty |
    /// | [`SarimaxError::NonFiniteData`] | NaN or infinity in `data` or `exog` |
    /// | [`SarimaxError::ExogLengthMismatch`] | `exog.len() != data.len()` |
    /// | [`SarimaxError::InsufficientData`] | `data.len() < min_len()` |
    /// | [`SarimaxError::ConstantData`] | differenced series is flat relative to the data |
    /// | [`SarimaxError::NonStationary`] | stationary start requested for a unit-root AR part |
    /// | [`SarimaxError::NonFiniteLikelihood`] | the filter breaks down at the optimum |
    /// | [`SarimaxError::OptimizationFailed`] | no parameter vector gives a finite likelihood |
    pub fn fit(&self, data: &[f64], exog: Option<&[f64]>) -> Result<SarimaxFit, SarimaxError> {
        crate::optimizer::fit_sarimax(*self, data, exog)
    }
}
