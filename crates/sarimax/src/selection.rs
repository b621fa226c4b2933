//! AIC-based order selection.
//!
//! `p` is read off the partial autocorrelation function; `(d, q)` is
//! chosen by fitting every candidate on a grid and keeping the lowest
//! AIC. Ties go to the candidate met first in grid order, so the
//! parallel search returns the same order as the sequential one.

use std::ops::RangeInclusive;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::SarimaxError;
use crate::order::Order;
use crate::spec::{DEFAULT_MAX_ITERS, SarimaxSpec};

/// Settings for [`search_orders`].
///
/// # Example
///
/// ```
/// use tankcast_sarimax::SelectionConfig;
///
/// let config = SelectionConfig::default().with_q_range(0..=3).with_parallel(false);
/// assert_eq!(config.max_lag(), 40);
/// assert_eq!(config.q_range(), 0..=3);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionConfig {
    max_lag: usize,
    pacf_threshold: f64,
    d_range: RangeInclusive<usize>,
    q_range: RangeInclusive<usize>,
    max_iters: usize,
    parallel: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            max_lag: 40,
            pacf_threshold: 0.5,
            d_range: 0..=3,
            q_range: 0..=7,
            max_iters: DEFAULT_MAX_ITERS,
            parallel: true,
        }
    }
}

impl SelectionConfig {
    /// Highest PACF lag inspected when choosing `p`.
    pub fn with_max_lag(mut self, max_lag: usize) -> Self {
        self.max_lag = max_lag;
        self
    }

    /// PACF magnitude below which a lag counts as insignificant.
    pub fn with_pacf_threshold(mut self, threshold: f64) -> Self {
        self.pacf_threshold = threshold;
        self
    }

    pub fn with_d_range(mut self, d_range: RangeInclusive<usize>) -> Self {
        self.d_range = d_range;
        self
    }

    pub fn with_q_range(mut self, q_range: RangeInclusive<usize>) -> Self {
        self.q_range = q_range;
        self
    }

    /// Nelder-Mead iteration cap for each candidate fit.
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Fit grid candidates on the rayon pool instead of one by one.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn max_lag(&self) -> usize {
        self.max_lag
    }

    pub fn pacf_threshold(&self) -> f64 {
        self.pacf_threshold
    }

    pub fn d_range(&self) -> RangeInclusive<usize> {
        self.d_range.clone()
    }

    pub fn q_range(&self) -> RangeInclusive<usize> {
        self.q_range.clone()
    }

    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }
}

/// Outcome of a grid search: the winning order, its AIC and the score of
/// every candidate in grid order.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderSearch {
    order: Order,
    aic: f64,
    scores: Vec<(Order, f64)>,
}

impl OrderSearch {
    pub fn order(&self) -> Order {
        self.order
    }

    pub fn aic(&self) -> f64 {
        self.aic
    }

    pub fn scores(&self) -> &[(Order, f64)] {
        &self.scores
    }
}

/// Returns the first lag `k` (counting lag 0) whose partial
/// autocorrelation magnitude is below `threshold`, or 0 if none is.
///
/// # Errors
///
/// Fails when the PACF is undefined: empty, non-finite, too short or
/// constant input.
pub fn ar_order_from_pacf(
    data: &[f64],
    max_lag: usize,
    threshold: f64,
) -> Result<usize, SarimaxError> {
    let pacf = tankcast_stats::pacf(data, max_lag).ok_or_else(|| pacf_failure(data))?;
    Ok(pacf
        .iter()
        .position(|v| v.abs() < threshold)
        .unwrap_or(0))
}

fn pacf_failure(data: &[f64]) -> SarimaxError {
    if data.is_empty() {
        SarimaxError::EmptyData
    } else if data.iter().any(|x| !x.is_finite()) {
        SarimaxError::NonFiniteData
    } else if data.len() < 3 {
        SarimaxError::InsufficientData {
            n: data.len(),
            min: 3,
        }
    } else {
        SarimaxError::ConstantData
    }
}

/// Chooses `p` from the PACF, then fits every `(d, q)` candidate and
/// returns the lowest-AIC order with the full score table.
///
/// Candidates are fitted without a regressor and with stationarity and
/// invertibility enforced. Any candidate failing to fit fails the whole
/// search.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SarimaxError::EmptyGrid`] | `d_range` or `q_range` is empty |
/// | any fit error | the first failing candidate's error |
pub fn search_orders(data: &[f64], config: &SelectionConfig) -> Result<OrderSearch, SarimaxError> {
    let p = ar_order_from_pacf(data, config.max_lag, config.pacf_threshold)?;
    let candidates: Vec<Order> =
        Order::grid(p, config.d_range(), config.q_range()).collect();
    if candidates.is_empty() {
        return Err(SarimaxError::EmptyGrid);
    }
    debug!(p, candidates = candidates.len(), "searching order grid");

    let score = |order: &Order| -> Result<(Order, f64), SarimaxError> {
        let fit = SarimaxSpec::new(*order)
            .with_max_iters(config.max_iters)
            .fit(data, None)?;
        debug!(order = %order, aic = fit.aic(), "candidate fitted");
        Ok((*order, fit.aic()))
    };

    let scores: Vec<(Order, f64)> = if config.parallel {
        candidates.par_iter().map(score).collect::<Result<_, _>>()?
    } else {
        candidates.iter().map(score).collect::<Result<_, _>>()?
    };

    let (order, aic) = first_min_aic(&scores).ok_or(SarimaxError::EmptyGrid)?;
    info!(order = %order, aic, "selected order");
    Ok(OrderSearch { order, aic, scores })
}

/// Runs [`search_orders`] and returns only the winning order.
pub fn select_order(data: &[f64], config: &SelectionConfig) -> Result<Order, SarimaxError> {
    search_orders(data, config).map(|search| search.order())
}

/// Lowest AIC; an equal later score never replaces an earlier one.
pub(crate) fn first_min_aic(scores: &[(Order, f64)]) -> Option<(Order, f64)> {
    let mut best: Option<(Order, f64)> = None;
    for &(order, aic) in scores {
        match best {
            Some((_, best_aic)) if aic >= best_aic => {}
            _ => best = Some((order, aic)),
        }
    }
    best
}
