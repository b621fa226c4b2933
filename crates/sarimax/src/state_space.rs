//! ARMA state-space representation.
//!
//! Converts ARMA(p,q) error coefficients into companion form:
//!
//! ```text
//! a[t+1] = T * a[t] + R * e[t]     (state transition)
//! u[t]   = Z' * a[t]                (observation, Z = e_1)
//! ```
//!
//! where `T` is the transition matrix, `R` the noise-input vector and
//! `e[t] ~ N(0, sigma2)`. The regression part of the model is removed
//! before the filter sees the data, so the observation equation has no
//! intercept.
//!
//! **Not part of the public API.**

use ndarray::{Array1, Array2, Axis};

/// Scale of the approximate diffuse prior on the initial state.
pub(crate) const DIFFUSE_SCALE: f64 = 1e6;

const DOUBLING_MAX_ITERS: usize = 64;
const DOUBLING_TOL: f64 = 1e-12;
const DOUBLING_BLOWUP: f64 = 1e12;

/// State-space representation of an ARMA(p,q) error process.
#[derive(Clone, Debug)]
pub(crate) struct StateSpace {
    r: usize,
    phi: Vec<f64>,
    t: Array2<f64>,
    r_vec: Array1<f64>,
    rrt: Array2<f64>,
}

impl StateSpace {
    /// Builds the companion form from AR and MA coefficients.
    pub(crate) fn new(ar: &[f64], ma: &[f64]) -> Self {
        let p = ar.len();
        let q = ma.len();
        let r = p.max(q + 1).max(1);

        let mut phi = vec![0.0; r];
        phi[..p].copy_from_slice(ar);

        // First column carries phi, super-diagonal is ones.
        let mut t = Array2::zeros((r, r));
        for (i, &c) in phi.iter().enumerate() {
            t[[i, 0]] = c;
        }
        for i in 0..r.saturating_sub(1) {
            t[[i, i + 1]] = 1.0;
        }

        // R = [1, theta_1, ..., theta_q, 0, ...]
        let mut r_vec = Array1::zeros(r);
        r_vec[0] = 1.0;
        for (j, &c) in ma.iter().enumerate() {
            r_vec[j + 1] = c;
        }

        let r_col = r_vec.view().insert_axis(Axis(1));
        let r_row = r_vec.view().insert_axis(Axis(0));
        let rrt = r_col.dot(&r_row);

        Self {
            r,
            phi,
            t,
            r_vec,
            rrt,
        }
    }

    /// State dimension `r = max(p, q+1)`, minimum 1.
    pub(crate) fn r(&self) -> usize {
        self.r
    }

    /// First column of `T`, zero-padded to length `r`.
    pub(crate) fn phi(&self) -> &[f64] {
        &self.phi
    }

    /// Transition matrix `T` (r×r).
    pub(crate) fn t(&self) -> &Array2<f64> {
        &self.t
    }

    /// Noise input vector `R` (length r).
    pub(crate) fn r_vec(&self) -> &Array1<f64> {
        &self.r_vec
    }

    /// Precomputed `R·Rᵀ`.
    pub(crate) fn rrt(&self) -> &Array2<f64> {
        &self.rrt
    }

    /// Unconditional state covariance (in units of sigma2), solving
    /// `P = T P Tᵀ + R Rᵀ` by the doubling recursion.
    ///
    /// Returns `None` when the AR part has a root on or inside the unit
    /// circle, in which case no stationary distribution exists.
    pub(crate) fn stationary_covariance(&self) -> Option<Array2<f64>> {
        let mut p = self.rrt.clone();
        let mut a = self.t.clone();

        for _ in 0..DOUBLING_MAX_ITERS {
            let step = a.dot(&p).dot(&a.t());
            let step_max = max_abs(&step);
            p += &step;
            let p_max = max_abs(&p);
            if !p_max.is_finite() || p_max > DOUBLING_BLOWUP {
                return None;
            }
            if step_max <= DOUBLING_TOL * (1.0 + p_max) {
                return Some(p);
            }
            a = a.dot(&a);
        }
        None
    }

    /// Approximate diffuse initial covariance `kappa · I`.
    pub(crate) fn diffuse_covariance(&self) -> Array2<f64> {
        Array2::eye(self.r) * DIFFUSE_SCALE
    }
}

fn max_abs(m: &Array2<f64>) -> f64 {
    m.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
}
