//! Nelder-Mead optimizer for SARIMAX maximum-likelihood estimation.
//!
//! The model fitted to `w = Δ^d y` is
//!
//! ```text
//! w_t = mu + beta * Δ^d x_t + u_t,    u ~ ARMA(p, q)
//! ```
//!
//! `mu` and `sigma2` are concentrated out; Nelder-Mead searches over
//! the ARMA coefficients and `beta`.
//!
//! **Not part of the public API.**

use argmin::core::{CostFunction, Executor, State, TerminationReason};
use argmin::solver::neldermead::NelderMead;
use tracing::{debug, warn};

use crate::differencing::{difference, level_tails};
use crate::error::SarimaxError;
use crate::fit::{FitParts, SarimaxFit};
use crate::kalman::{self, Initialization};
use crate::params::ParamLayout;
use crate::spec::SarimaxSpec;
use crate::state_space::StateSpace;

const SD_TOLERANCE: f64 = 1e-8;
const MIN_EXOG_VARIANCE: f64 = 1e-12;

/// Fits `spec` to `data` with an optional regressor.
///
/// 1. Validate data and regressor
/// 2. Difference both `d` times
/// 3. Seed `beta` by least squares
/// 4. Optimize the concentrated log-likelihood via Nelder-Mead
/// 5. Final Kalman pass for sigma2 and terminal state
pub(crate) fn fit_sarimax(
    spec: SarimaxSpec,
    data: &[f64],
    exog: Option<&[f64]>,
) -> Result<SarimaxFit, SarimaxError> {
    let (p, d, q) = spec.order().as_tuple();

    // 1. Validate
    if data.is_empty() {
        return Err(SarimaxError::EmptyData);
    }
    if data.iter().any(|x| !x.is_finite()) {
        return Err(SarimaxError::NonFiniteData);
    }
    if let Some(x) = exog {
        if x.len() != data.len() {
            return Err(SarimaxError::ExogLengthMismatch {
                expected: data.len(),
                got: x.len(),
            });
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(SarimaxError::NonFiniteData);
        }
    }
    let min_len = spec.min_len();
    if data.len() < min_len {
        return Err(SarimaxError::InsufficientData {
            n: data.len(),
            min: min_len,
        });
    }

    // 2. Difference
    let w = difference(data, d);
    // Flatness is judged against the levels, not the differences.
    if tankcast_stats::is_flat(&w, tankcast_stats::max_abs(data)) {
        return Err(SarimaxError::ConstantData);
    }
    let xd = exog.map(|x| difference(x, d));

    // 3. A regressor that is constant after differencing is absorbed by mu.
    let estimated_xd = xd
        .as_deref()
        .filter(|x| tankcast_stats::variance(x) > MIN_EXOG_VARIANCE);
    let beta0 = estimated_xd.map_or(0.0, |x| ols_slope(&w, x));
    let k_exog = usize::from(estimated_xd.is_some());

    let layout = ParamLayout::new(
        p,
        q,
        k_exog,
        spec.enforce_stationarity(),
        spec.enforce_invertibility(),
    );
    let init = if spec.enforce_stationarity() {
        Initialization::Stationary
    } else {
        Initialization::ApproximateDiffuse
    };
    let cost = SarimaxCost {
        w: &w,
        xd: estimated_xd,
        layout,
        init,
    };

    // 4. Optimize. With no ARMA terms OLS already maximizes the likelihood.
    let (best, converged) = if p + q == 0 {
        (vec![beta0; k_exog], true)
    } else {
        optimize(&cost, beta0, &w, spec.max_iters())?
    };

    // 5. Final pass
    let ar = layout.ar(&best);
    let ma = layout.ma(&best);
    let beta = layout.exog(&best).first().copied().unwrap_or(0.0);
    let (u, mu) = cost.arma_residuals(beta);
    let ss = StateSpace::new(&ar, &ma);
    let output = kalman::filter(&ss, &u, init)?;

    debug!(
        order = %spec.order(),
        loglik = output.log_likelihood,
        sigma2 = output.sigma2,
        converged,
        "fitted sarimax"
    );

    let exog_tail = exog.map(|x| x[x.len() - d..].to_vec());

    Ok(SarimaxFit::new(FitParts {
        spec,
        ar,
        ma,
        exog_coef: exog.map(|_| beta),
        n_exog_params: k_exog,
        intercept: mu,
        sigma2: output.sigma2,
        log_likelihood: output.log_likelihood,
        n_eff: output.n_eff,
        next_state: output.next_state,
        level_tails: level_tails(data, d),
        exog_tail,
        converged,
    }))
}

fn optimize(
    cost: &SarimaxCost<'_>,
    beta0: f64,
    w: &[f64],
    max_iters: usize,
) -> Result<(Vec<f64>, bool), SarimaxError> {
    let layout = cost.layout;
    let dim = layout.dim();
    let n_arma = dim - usize::from(cost.xd.is_some());

    let mut origin = vec![0.0; dim];
    if cost.xd.is_some() {
        origin[n_arma] = beta0;
    }
    let beta_step = (0.5 * beta0.abs()).max(0.1 * tankcast_stats::sd(w));

    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(dim + 1);
    simplex.push(origin.clone());
    for i in 0..dim {
        let mut vertex = origin.clone();
        vertex[i] += if i < n_arma {
            layout.arma_step(i)
        } else {
            beta_step
        };
        simplex.push(vertex);
    }

    let solver = NelderMead::new(simplex)
        .with_sd_tolerance(SD_TOLERANCE)
        .map_err(|e| SarimaxError::OptimizationFailed {
            reason: e.to_string(),
        })?;
    let result = Executor::new(*cost, solver)
        .configure(|state| state.max_iters(max_iters as u64))
        .run()
        .map_err(|e| SarimaxError::OptimizationFailed {
            reason: e.to_string(),
        })?;

    let state = result.state();
    let best_cost = state.get_best_cost();
    if !best_cost.is_finite() || best_cost == f64::MAX {
        return Err(SarimaxError::OptimizationFailed {
            reason: "no parameter vector gave a finite likelihood".to_string(),
        });
    }
    let best = state
        .best_param
        .clone()
        .ok_or_else(|| SarimaxError::OptimizationFailed {
            reason: "optimizer returned no parameters".to_string(),
        })?;

    let hit_cap = matches!(
        state.get_termination_reason(),
        Some(TerminationReason::MaxItersReached)
    );
    if hit_cap {
        warn!(max_iters, "nelder-mead stopped at the iteration cap");
    }
    Ok((best, !hit_cap))
}

/// Least-squares slope of `w` on `x` with intercept.
fn ols_slope(w: &[f64], x: &[f64]) -> f64 {
    let mw = tankcast_stats::mean(w);
    let mx = tankcast_stats::mean(x);
    let (sxy, sxx) = w
        .iter()
        .zip(x)
        .fold((0.0, 0.0), |(sxy, sxx), (wi, xi)| {
            let dx = xi - mx;
            (sxy + dx * (wi - mw), sxx + dx * dx)
        });
    if sxx > 0.0 { sxy / sxx } else { 0.0 }
}

/// Cost function for argmin: negative concentrated log-likelihood.
#[derive(Clone, Copy)]
struct SarimaxCost<'a> {
    w: &'a [f64],
    xd: Option<&'a [f64]>,
    layout: ParamLayout,
    init: Initialization,
}

impl SarimaxCost<'_> {
    /// ARMA residual `u = w - beta x - mu` and the concentrated `mu`.
    fn arma_residuals(&self, beta: f64) -> (Vec<f64>, f64) {
        let z: Vec<f64> = match self.xd {
            Some(x) => self.w.iter().zip(x).map(|(w, x)| w - beta * x).collect(),
            None => self.w.to_vec(),
        };
        let mu = tankcast_stats::mean(&z);
        (z.into_iter().map(|v| v - mu).collect(), mu)
    }
}

impl CostFunction for SarimaxCost<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, params: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
        let ar = self.layout.ar(params);
        let ma = self.layout.ma(params);
        let beta = self.layout.exog(params).first().copied().unwrap_or(0.0);
        let (u, _) = self.arma_residuals(beta);
        let ss = StateSpace::new(&ar, &ma);

        match kalman::concentrated_loglik(&ss, &u, self.init) {
            Ok(loglik) if loglik.is_finite() => Ok(-loglik),
            _ => Ok(f64::MAX),
        }
    }
}
