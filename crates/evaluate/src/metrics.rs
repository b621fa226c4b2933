//! Error metrics between a reference window and a forecast.

use serde::Serialize;

use crate::error::EvaluateError;

/// Accuracy of one forecast.
///
/// Serializes NaN fields as JSON `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub mse: f64,
    pub mae: f64,
    pub rmse: f64,
}

impl Metrics {
    /// All-NaN metrics reported for a column whose pipeline failed.
    pub fn nan() -> Self {
        Self {
            mse: f64::NAN,
            mae: f64::NAN,
            rmse: f64::NAN,
        }
    }

    /// `true` when every field is finite.
    pub fn is_finite(&self) -> bool {
        self.mse.is_finite() && self.mae.is_finite() && self.rmse.is_finite()
    }
}

/// Scores `forecast` against `reference` position by position.
///
/// `rmse` is `mse.sqrt()` exactly. Non-finite inputs are not rejected;
/// they propagate into the metrics.
///
/// # Errors
///
/// Returns [`EvaluateError::LengthMismatch`] if the slices differ in
/// length and [`EvaluateError::EmptyInput`] if both are empty.
///
/// # Example
///
/// ```
/// use tankcast_evaluate::evaluate;
///
/// let m = evaluate(&[1.0, 2.0, 3.0], &[2.0, 2.0, 1.0]).unwrap();
/// assert!((m.mse - 5.0 / 3.0).abs() < 1e-12);
/// assert!((m.mae - 1.0).abs() < 1e-12);
/// ```
pub fn evaluate(reference: &[f64], forecast: &[f64]) -> Result<Metrics, EvaluateError> {
    if reference.len() != forecast.len() {
        return Err(EvaluateError::LengthMismatch {
            reference: reference.len(),
            forecast: forecast.len(),
        });
    }
    if reference.is_empty() {
        return Err(EvaluateError::EmptyInput);
    }

    let n = reference.len() as f64;
    let (sq, abs) = reference
        .iter()
        .zip(forecast)
        .fold((0.0, 0.0), |(sq, abs), (r, f)| {
            let e = r - f;
            (sq + e * e, abs + e.abs())
        });
    let mse = sq / n;

    Ok(Metrics {
        mse,
        mae: abs / n,
        rmse: mse.sqrt(),
    })
}
