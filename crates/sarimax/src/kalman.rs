//! Kalman filter for the ARMA error process.
//!
//! The filter runs with `sigma2 = 1` and the innovation variance is
//! concentrated out of the likelihood afterwards:
//!
//! ```text
//! sigma2_hat = (1/n) Σ v_t² / F_t
//! loglik     = -n/2 (ln 2π + ln sigma2_hat + 1) - 1/2 Σ ln F_t
//! ```
//!
//! The companion structure of `T` keeps the prediction step at O(r²)
//! instead of the O(r³) of a dense `T P Tᵀ`. Once the covariance stops
//! moving the filter freezes it and only updates the state.
//!
//! **Not part of the public API.**

use ndarray::Array2;

use crate::error::SarimaxError;
use crate::state_space::StateSpace;

const MIN_PREDICTION_VARIANCE: f64 = 1e-12;
const STEADY_STATE_TOL: f64 = 1e-9;

/// How the initial state covariance is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Initialization {
    /// Exact unconditional covariance; fails for non-stationary AR parts.
    Stationary,
    /// Large multiple of the identity. The first `r` observations are
    /// excluded from the likelihood.
    ApproximateDiffuse,
}

/// Result of a full filtering pass.
#[derive(Clone, Debug)]
pub(crate) struct FilterOutput {
    pub(crate) sigma2: f64,
    pub(crate) log_likelihood: f64,
    /// Observations that entered the likelihood.
    pub(crate) n_eff: usize,
    /// Predicted state `a[n+1|n]` after the last observation.
    pub(crate) next_state: Vec<f64>,
}

/// Runs the filter over `data` and returns the concentrated
/// log-likelihood together with the terminal state.
pub(crate) fn filter(
    ss: &StateSpace,
    data: &[f64],
    init: Initialization,
) -> Result<FilterOutput, SarimaxError> {
    run(ss, data, init)
}

/// Concentrated log-likelihood only; used inside the optimizer loop.
pub(crate) fn concentrated_loglik(
    ss: &StateSpace,
    data: &[f64],
    init: Initialization,
) -> Result<f64, SarimaxError> {
    run(ss, data, init).map(|out| out.log_likelihood)
}

/// Propagates `state` forward without observations and returns the
/// observed component `a[0]` at each of the `steps` horizons.
pub(crate) fn project(ss: &StateSpace, state: &[f64], steps: usize) -> Vec<f64> {
    let r = ss.r();
    let phi = ss.phi();
    let mut a = state.to_vec();
    let mut out = Vec::with_capacity(steps);
    for _ in 0..steps {
        out.push(a[0]);
        let a0 = a[0];
        for i in 0..r {
            let next = if i + 1 < r { a[i + 1] } else { 0.0 };
            a[i] = phi[i] * a0 + next;
        }
    }
    out
}

fn run(
    ss: &StateSpace,
    data: &[f64],
    init: Initialization,
) -> Result<FilterOutput, SarimaxError> {
    let r = ss.r();
    let phi = ss.phi();
    let rv = ss.r_vec();

    let (mut p, burn) = match init {
        Initialization::Stationary => (
            ss.stationary_covariance()
                .ok_or(SarimaxError::NonStationary)?,
            0,
        ),
        Initialization::ApproximateDiffuse => (ss.diffuse_covariance(), r),
    };
    let burn = burn.min(data.len().saturating_sub(1));

    let mut a = vec![0.0; r];
    let mut k = vec![0.0; r];
    let mut pf = Array2::<f64>::zeros((r, r));
    let mut tp = Array2::<f64>::zeros((r, r));
    let mut steady = false;
    let mut f = 0.0;

    let mut sum_v2f = 0.0;
    let mut sum_ln_f = 0.0;
    let mut n_eff = 0usize;

    for (t, &y) in data.iter().enumerate() {
        let v = y - a[0];

        if !steady {
            f = p[[0, 0]];
            if !f.is_finite() || f < MIN_PREDICTION_VARIANCE {
                return Err(SarimaxError::NonFiniteLikelihood {
                    reason: format!("prediction variance {f} at t={t}"),
                });
            }
            for i in 0..r {
                k[i] = p[[i, 0]] / f;
            }
        }

        if t >= burn {
            sum_v2f += v * v / f;
            sum_ln_f += f.ln();
            n_eff += 1;
        }

        // a[t+1|t] = T (a + k v), built in place from the top row down.
        let af0 = a[0] + k[0] * v;
        for i in 0..r {
            let next = if i + 1 < r { a[i + 1] + k[i + 1] * v } else { 0.0 };
            a[i] = phi[i] * af0 + next;
        }

        if !steady {
            // Pf = P - k P[0, :]
            for i in 0..r {
                for j in 0..r {
                    pf[[i, j]] = p[[i, j]] - k[i] * p[[0, j]];
                }
            }
            // TP = T Pf, then P' = TP Tᵀ + R Rᵀ.
            for i in 0..r {
                for j in 0..r {
                    let below = if i + 1 < r { pf[[i + 1, j]] } else { 0.0 };
                    tp[[i, j]] = phi[i] * pf[[0, j]] + below;
                }
            }
            let mut delta = 0.0_f64;
            for i in 0..r {
                for j in 0..r {
                    let right = if j + 1 < r { tp[[i, j + 1]] } else { 0.0 };
                    let value = tp[[i, 0]] * phi[j] + right + rv[i] * rv[j];
                    delta = delta.max((value - p[[i, j]]).abs());
                    p[[i, j]] = value;
                }
            }
            if delta < STEADY_STATE_TOL {
                steady = true;
            }
        }
    }

    if n_eff == 0 {
        return Err(SarimaxError::InsufficientData {
            n: data.len(),
            min: burn + 1,
        });
    }

    let n = n_eff as f64;
    let sigma2 = sum_v2f / n;
    if !sigma2.is_finite() || sigma2 <= 0.0 {
        return Err(SarimaxError::NonFiniteLikelihood {
            reason: format!("innovation variance {sigma2}"),
        });
    }
    let log_likelihood =
        -0.5 * n * ((2.0 * std::f64::consts::PI).ln() + sigma2.ln() + 1.0) - 0.5 * sum_ln_f;
    if !log_likelihood.is_finite() {
        return Err(SarimaxError::NonFiniteLikelihood {
            reason: "log-likelihood is not finite".to_string(),
        });
    }

    Ok(FilterOutput {
        sigma2,
        log_likelihood,
        n_eff,
        next_state: a,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    fn ar1_series(phi: f64, n: usize, seed: u64) -> Vec<f64> {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let normal = Normal::new(0.0, 1.0).unwrap();
        let mut y = vec![0.0; n];
        for t in 1..n {
            y[t] = phi * y[t - 1] + normal.sample(&mut rng);
        }
        y
    }

    #[test]
    fn ar1_matches_exact_likelihood() {
        let phi: f64 = 0.6;
        let y = ar1_series(phi, 200, 7);
        let n = y.len() as f64;

        let ss = StateSpace::new(&[phi], &[]);
        let out = filter(&ss, &y, Initialization::Stationary).unwrap();

        let f1 = 1.0 / (1.0 - phi * phi);
        let mut sum = y[0] * y[0] / f1;
        for t in 1..y.len() {
            let e = y[t] - phi * y[t - 1];
            sum += e * e;
        }
        let sigma2 = sum / n;
        let expected =
            -0.5 * n * ((2.0 * std::f64::consts::PI).ln() + sigma2.ln() + 1.0) - 0.5 * f1.ln();

        assert_relative_eq!(out.sigma2, sigma2, max_relative = 1e-10);
        assert_relative_eq!(out.log_likelihood, expected, max_relative = 1e-10);
        assert_eq!(out.n_eff, 200);
        assert_relative_eq!(out.next_state[0], phi * y[199], max_relative = 1e-10);
    }

    #[test]
    fn loglik_only_agrees_with_full_pass() {
        let y = ar1_series(0.3, 150, 11);
        let ss = StateSpace::new(&[0.3, 0.1], &[0.2]);
        let full = filter(&ss, &y, Initialization::Stationary).unwrap();
        let ll = concentrated_loglik(&ss, &y, Initialization::Stationary).unwrap();
        assert_relative_eq!(full.log_likelihood, ll, max_relative = 1e-14);
    }

    #[test]
    fn diffuse_burns_state_dimension() {
        let y = ar1_series(0.5, 100, 3);
        let ss = StateSpace::new(&[0.5], &[0.2, 0.1]);
        let out = filter(&ss, &y, Initialization::ApproximateDiffuse).unwrap();
        assert_eq!(out.n_eff, 100 - ss.r());
        assert!(out.log_likelihood.is_finite());
    }

    #[test]
    fn diffuse_accepts_unit_root() {
        let y = ar1_series(0.9, 100, 5);
        let ss = StateSpace::new(&[1.0], &[]);
        assert!(matches!(
            filter(&ss, &y, Initialization::Stationary),
            Err(SarimaxError::NonStationary)
        ));
        assert!(filter(&ss, &y, Initialization::ApproximateDiffuse).is_ok());
    }

    #[test]
    fn white_noise_sigma2_is_mean_square() {
        let y = [1.0, -2.0, 0.5, 1.5, -1.0];
        let ss = StateSpace::new(&[], &[]);
        let out = filter(&ss, &y, Initialization::Stationary).unwrap();
        let ms = y.iter().map(|v| v * v).sum::<f64>() / 5.0;
        assert_relative_eq!(out.sigma2, ms, max_relative = 1e-12);
    }

    #[test]
    fn project_ar1_decays_geometrically() {
        let ss = StateSpace::new(&[0.5], &[]);
        let path = project(&ss, &[4.0], 4);
        assert_eq!(path, vec![4.0, 2.0, 1.0, 0.5]);
    }

    #[test]
    fn project_ma1_vanishes_after_one_step() {
        let ss = StateSpace::new(&[], &[0.7]);
        let path = project(&ss, &[1.0, 0.35], 3);
        assert_eq!(path, vec![1.0, 0.35, 0.0]);
    }
}
