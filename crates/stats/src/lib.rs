//! Statistical helper functions for tankcast.
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`mean`] | Arithmetic mean |
//! | [`variance`] / [`sd`] | Sample variance and standard deviation (N-1) |
//! | [`range`] / [`is_flat`] | Spread of a slice and a scale-aware constant check |
//! | [`pacf`] | Partial autocorrelation via Durbin-Levinson |

mod correlation;

pub use correlation::pacf;

/// Relative spread below which a series counts as constant.
pub const FLAT_TOLERANCE: f64 = 1e-12;

/// Arithmetic mean; 0.0 for an empty slice.
pub fn mean(data: &[f64]) -> f64 {
    match data.len() {
        0 => 0.0,
        n => data.iter().sum::<f64>() / n as f64,
    }
}

/// Sample variance (N-1 denominator); 0.0 below two values.
pub fn variance(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let m = mean(data);
    let ss: f64 = data.iter().map(|&x| (x - m).powi(2)).sum();
    ss / (data.len() - 1) as f64
}

/// Sample standard deviation, `variance(data).sqrt()`.
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// `max - min`, or 0.0 for an empty slice. NaN values are skipped.
///
/// Used to detect series with nothing left to model.
pub fn range(data: &[f64]) -> f64 {
    let (lo, hi) = data
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)));
    if lo > hi { 0.0 } else { hi - lo }
}

/// Largest absolute value, or 0.0 for an empty slice. NaN values are skipped.
pub fn max_abs(data: &[f64]) -> f64 {
    data.iter().fold(0.0, |m: f64, &x| m.max(x.abs()))
}

/// `true` when the spread of `data` is negligible next to `scale`.
///
/// The threshold is `FLAT_TOLERANCE * max(|scale|, 1)`, so rounding
/// noise left by differencing a straight line still counts as flat.
pub fn is_flat(data: &[f64], scale: f64) -> bool {
    range(data) <= FLAT_TOLERANCE * scale.abs().max(1.0)
}
