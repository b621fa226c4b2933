//! Final model fit with the holiday regressor.

use tankcast_sarimax::{Order, SarimaxSpec};
use tracing::{debug, warn};

use crate::config::FitOptions;
use crate::error::ForecastError;

/// Fits SARIMAX(`order`) to `series` with `holiday_train` as the single
/// regressor, then forecasts `n` steps with `holiday_future`.
///
/// The returned values continue `series` on its original level: the model
/// is fitted on `d`-times differenced data and its forecasts integrated
/// back.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ForecastError::Alignment`] | `holiday_train.len() != series.len()` or `holiday_future.len() != n` |
/// | [`ForecastError::ModelFit`] | the fit or the forecast fails |
/// | [`ForecastError::NonFiniteForecast`] | a forecast value is NaN or infinite |
///
/// # Example
///
/// ```ignore
/// let values = fit_and_forecast(&deseasonalized, order, &x_train, 30, &x_future, &FitOptions::default())?;
/// assert_eq!(values.len(), 30);
/// ```
pub fn fit_and_forecast(
    series: &[f64],
    order: Order,
    holiday_train: &[f64],
    n: usize,
    holiday_future: &[f64],
    options: &FitOptions,
) -> Result<Vec<f64>, ForecastError> {
    if holiday_train.len() != series.len() {
        return Err(ForecastError::Alignment {
            expected: series.len(),
            got: holiday_train.len(),
        });
    }
    if holiday_future.len() != n {
        return Err(ForecastError::Alignment {
            expected: n,
            got: holiday_future.len(),
        });
    }

    let fit = SarimaxSpec::new(order)
        .with_enforce_stationarity(options.enforce_stationarity())
        .with_enforce_invertibility(options.enforce_invertibility())
        .with_max_iters(options.max_iters())
        .fit(series, Some(holiday_train))?;

    if !fit.converged() {
        warn!(order = %order, "final fit stopped at the iteration cap");
    }
    debug!(
        order = %order,
        holiday_coef = fit.exog_coef().unwrap_or(0.0),
        intercept = fit.intercept(),
        aic = fit.aic(),
        "final model fitted"
    );

    let values = fit.forecast(n, Some(holiday_future))?;
    ensure_finite(values)
}

/// Passes `values` through unless one of them is NaN or infinite.
pub(crate) fn ensure_finite(values: Vec<f64>) -> Result<Vec<f64>, ForecastError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(step) => Err(ForecastError::NonFiniteForecast { step }),
        None => Ok(values),
    }
}
