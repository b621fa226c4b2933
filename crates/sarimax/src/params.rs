//! Parameter vector layout and the stationarity/invertibility transform.
//!
//! The optimizer works on a flat vector `[ar (p), ma (q), beta (k)]`.
//! When constraints are enforced the AR and MA blocks are unconstrained
//! reals mapped through [`constrain_pacf`]; otherwise they are the
//! polynomial coefficients themselves.
//!
//! **Not part of the public API.**

/// Maps unconstrained parameters to stationary polynomial coefficients
/// via the PACF parametrization (Jones 1980, Monahan 1984).
///
/// Step 1: `r_k = tanh(alpha_k)` maps each parameter to (-1, 1).
/// Step 2: Levinson-Durbin recursion converts partial autocorrelations
///         to coefficients `phi` such that `1 - phi_1 z - ... - phi_p z^p`
///         has all roots outside the unit circle.
pub(crate) fn constrain_pacf(alpha: &[f64]) -> Vec<f64> {
    let p = alpha.len();
    if p == 0 {
        return Vec::new();
    }

    let r: Vec<f64> = alpha.iter().map(|a| a.tanh()).collect();

    let mut phi = vec![0.0; p];
    let mut prev = vec![0.0; p];
    phi[0] = r[0];

    for k in 1..p {
        prev.copy_from_slice(&phi);
        phi[k] = r[k];
        for j in 0..k {
            phi[j] = prev[j] - r[k] * prev[k - 1 - j];
        }
    }

    phi
}

/// Describes how the flat optimizer vector maps onto model coefficients.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ParamLayout {
    p: usize,
    q: usize,
    k_exog: usize,
    enforce_stationarity: bool,
    enforce_invertibility: bool,
}

impl ParamLayout {
    pub(crate) fn new(
        p: usize,
        q: usize,
        k_exog: usize,
        enforce_stationarity: bool,
        enforce_invertibility: bool,
    ) -> Self {
        Self {
            p,
            q,
            k_exog,
            enforce_stationarity,
            enforce_invertibility,
        }
    }

    /// Length of the flat parameter vector.
    pub(crate) fn dim(&self) -> usize {
        self.p + self.q + self.k_exog
    }

    /// AR coefficients for `params`.
    pub(crate) fn ar(&self, params: &[f64]) -> Vec<f64> {
        let raw = &params[..self.p];
        if self.enforce_stationarity {
            constrain_pacf(raw)
        } else {
            raw.to_vec()
        }
    }

    /// MA coefficients for `params`.
    ///
    /// The MA polynomial is `1 + theta_1 z + ...`, so the constrained map
    /// negates the Levinson output to keep the roots outside the unit
    /// circle.
    pub(crate) fn ma(&self, params: &[f64]) -> Vec<f64> {
        let raw = &params[self.p..self.p + self.q];
        if self.enforce_invertibility {
            constrain_pacf(raw).into_iter().map(|c| -c).collect()
        } else {
            raw.to_vec()
        }
    }

    /// Exogenous coefficients for `params` (no transform).
    pub(crate) fn exog<'a>(&self, params: &'a [f64]) -> &'a [f64] {
        &params[self.p + self.q..]
    }

    /// Initial Nelder-Mead step along coordinate `i` of the ARMA block.
    ///
    /// Transformed parameters live on the whole real line, raw
    /// coefficients are kept near the origin.
    pub(crate) fn arma_step(&self, i: usize) -> f64 {
        let constrained = if i < self.p {
            self.enforce_stationarity
        } else {
            self.enforce_invertibility
        };
        if constrained { 0.5 } else { 0.1 }
    }
}
