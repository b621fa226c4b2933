//! Fitted SARIMAX model results and forecasting.

use crate::differencing::{difference, integrate};
use crate::error::SarimaxError;
use crate::kalman;
use crate::order::Order;
use crate::spec::SarimaxSpec;
use crate::state_space::StateSpace;

/// Everything the optimizer hands over to build a [`SarimaxFit`].
pub(crate) struct FitParts {
    pub(crate) spec: SarimaxSpec,
    pub(crate) ar: Vec<f64>,
    pub(crate) ma: Vec<f64>,
    pub(crate) exog_coef: Option<f64>,
    pub(crate) n_exog_params: usize,
    pub(crate) intercept: f64,
    pub(crate) sigma2: f64,
    pub(crate) log_likelihood: f64,
    pub(crate) n_eff: usize,
    pub(crate) next_state: Vec<f64>,
    pub(crate) level_tails: Vec<f64>,
    pub(crate) exog_tail: Option<Vec<f64>>,
    pub(crate) converged: bool,
}

/// A fitted model produced by [`SarimaxSpec::fit()`].
///
/// Holds the estimated coefficients, the concentrated innovation
/// variance and log-likelihood, and the terminal filter state needed to
/// forecast past the end of the training data.
///
/// ```mermaid
/// graph LR
///     B["SarimaxFit"] --> C[".ar() / .ma()"]
///     B --> D[".exog_coef() / .intercept()"]
///     B --> E[".aic() / .nobs()"]
///     B --> F[".forecast(n, future_exog)?"]
/// ```
#[derive(Clone, Debug)]
pub struct SarimaxFit {
    spec: SarimaxSpec,
    ar: Vec<f64>,
    ma: Vec<f64>,
    exog_coef: Option<f64>,
    n_exog_params: usize,
    intercept: f64,
    sigma2: f64,
    log_likelihood: f64,
    n_eff: usize,
    next_state: Vec<f64>,
    level_tails: Vec<f64>,
    exog_tail: Option<Vec<f64>>,
    converged: bool,
}

impl SarimaxFit {
    pub(crate) fn new(parts: FitParts) -> Self {
        let FitParts {
            spec,
            ar,
            ma,
            exog_coef,
            n_exog_params,
            intercept,
            sigma2,
            log_likelihood,
            n_eff,
            next_state,
            level_tails,
            exog_tail,
            converged,
        } = parts;
        Self {
            spec,
            ar,
            ma,
            exog_coef,
            n_exog_params,
            intercept,
            sigma2,
            log_likelihood,
            n_eff,
            next_state,
            level_tails,
            exog_tail,
            converged,
        }
    }

    /// Returns the [`SarimaxSpec`] that produced this fit.
    pub fn spec(&self) -> SarimaxSpec {
        self.spec
    }

    /// Returns the `(p, d, q)` order of the fitted model.
    pub fn order(&self) -> Order {
        self.spec.order()
    }

    /// Returns the AR coefficients (`phi`).
    pub fn ar(&self) -> &[f64] {
        &self.ar
    }

    /// Returns the MA coefficients (`theta`).
    pub fn ma(&self) -> &[f64] {
        &self.ma
    }

    /// Returns the regressor coefficient (`beta`), or `None` when the
    /// model was fitted without a regressor.
    ///
    /// A regressor with no variation after differencing gets `Some(0.0)`.
    pub fn exog_coef(&self) -> Option<f64> {
        self.exog_coef
    }

    /// Returns the mean of the differenced series net of the regressor.
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Returns the innovation variance (`sigma2`).
    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    /// Returns the maximised log-likelihood.
    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    /// Number of observations that entered the likelihood.
    pub fn nobs(&self) -> usize {
        self.n_eff
    }

    /// `false` when Nelder-Mead stopped at its iteration cap.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Number of estimated parameters counted by the information
    /// criteria: AR and MA coefficients, the regressor weight when it was
    /// estimated, and the innovation variance.
    pub fn n_params(&self) -> usize {
        self.ar.len() + self.ma.len() + self.n_exog_params + 1
    }

    /// Akaike Information Criterion, `2k - 2 loglik`. Lower is better.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let fit = SarimaxSpec::new(Order::new(1, 1, 0)).fit(&data, None)?;
    /// println!("AIC = {}", fit.aic());
    /// ```
    pub fn aic(&self) -> f64 {
        2.0 * self.n_params() as f64 - 2.0 * self.log_likelihood
    }

    /// Forecasts `steps` values past the end of the training data.
    ///
    /// `future_exog` must be given exactly when the model was fitted with
    /// a regressor, and must then hold `steps` values.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`SarimaxError::ExogLengthMismatch`] | regressor missing or of the wrong length |
    /// | [`SarimaxError::UnexpectedExog`] | regressor given to a model fitted without one |
    /// | [`SarimaxError::NonFiniteData`] | regressor contains NaN or infinity |
    pub fn forecast(
        &self,
        steps: usize,
        future_exog: Option<&[f64]>,
    ) -> Result<Vec<f64>, SarimaxError> {
        let xd_future = match (&self.exog_tail, future_exog) {
            (Some(tail), Some(future)) => {
                if future.len() != steps {
                    return Err(SarimaxError::ExogLengthMismatch {
                        expected: steps,
                        got: future.len(),
                    });
                }
                if future.iter().any(|v| !v.is_finite()) {
                    return Err(SarimaxError::NonFiniteData);
                }
                let joined: Vec<f64> = tail.iter().chain(future).copied().collect();
                Some(difference(&joined, self.spec.order().d()))
            }
            (Some(_), None) => {
                return Err(SarimaxError::ExogLengthMismatch {
                    expected: steps,
                    got: 0,
                });
            }
            (None, Some(_)) => return Err(SarimaxError::UnexpectedExog),
            (None, None) => None,
        };

        if steps == 0 {
            return Ok(Vec::new());
        }

        let ss = StateSpace::new(&self.ar, &self.ma);
        let arma = kalman::project(&ss, &self.next_state, steps);
        let beta = self.exog_coef.unwrap_or(0.0);

        let diffs: Vec<f64> = arma
            .iter()
            .enumerate()
            .map(|(h, u)| {
                let x = xd_future.as_ref().map_or(0.0, |xd| xd[h]);
                self.intercept + beta * x + u
            })
            .collect();

        Ok(integrate(&diffs, &self.level_tails))
    }
}
