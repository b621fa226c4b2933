//! Additive decomposition into trend, seasonal and deseasonalized parts.

use tracing::debug;

use crate::config::DecomposeConfig;
use crate::error::DecomposeError;

/// Result of [`decompose()`]: seasonal pattern and the series with that
/// pattern removed.
///
/// All vectors have the same length as the input. `seasonal()[t] +
/// deseasonalized()[t]` reproduces the observation at `t`.
#[derive(Clone, Debug)]
pub struct SeasonalComponents {
    period: usize,
    trend: Vec<f64>,
    seasonal: Vec<f64>,
    deseasonalized: Vec<f64>,
}

impl SeasonalComponents {
    /// Returns the seasonal period used.
    pub fn period(&self) -> usize {
        self.period
    }

    /// Centred moving-average trend. NaN for the `period / 2` observations
    /// at each end where the window does not fit.
    pub fn trend(&self) -> &[f64] {
        &self.trend
    }

    /// Seasonal component, periodic with zero mean over one cycle.
    pub fn seasonal(&self) -> &[f64] {
        &self.seasonal
    }

    /// Observed minus seasonal (trend plus residual).
    pub fn deseasonalized(&self) -> &[f64] {
        &self.deseasonalized
    }

    /// Consumes the components and returns the deseasonalized series.
    pub fn into_deseasonalized(self) -> Vec<f64> {
        self.deseasonalized
    }

    /// One cycle of seasonal factors, indexed by phase `t % period`.
    pub fn seasonal_factors(&self) -> &[f64] {
        &self.seasonal[..self.period]
    }
}

/// Decomposes `data` additively with the configured seasonal period.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`DecomposeError::InvalidPeriod`] | period < 2 |
/// | [`DecomposeError::EmptyData`] | `data` is empty |
/// | [`DecomposeError::NonFiniteData`] | any element is NaN or infinite |
/// | [`DecomposeError::InsufficientData`] | `data.len() < 2 * period` |
/// | [`DecomposeError::ConstantData`] | spread is negligible next to the data's magnitude |
pub fn decompose(
    data: &[f64],
    config: &DecomposeConfig,
) -> Result<SeasonalComponents, DecomposeError> {
    let period = config.period();
    if period < 2 {
        return Err(DecomposeError::InvalidPeriod { period });
    }
    if data.is_empty() {
        return Err(DecomposeError::EmptyData);
    }
    if data.iter().any(|x| !x.is_finite()) {
        return Err(DecomposeError::NonFiniteData);
    }
    let n = data.len();
    if n < config.min_len() {
        return Err(DecomposeError::InsufficientData {
            n,
            min: config.min_len(),
            period,
        });
    }
    if tankcast_stats::is_flat(data, tankcast_stats::max_abs(data)) {
        return Err(DecomposeError::ConstantData);
    }

    let trend = centred_moving_average(data, period);

    // Phase means of the detrended series over the positions where the
    // trend is defined. Two full cycles guarantee every phase is covered.
    let mut sums = vec![0.0; period];
    let mut counts = vec![0usize; period];
    for (t, (&x, &tr)) in data.iter().zip(&trend).enumerate() {
        if tr.is_finite() {
            sums[t % period] += x - tr;
            counts[t % period] += 1;
        }
    }
    let mut factors: Vec<f64> = sums
        .iter()
        .zip(&counts)
        .map(|(&s, &c)| s / c as f64)
        .collect();
    let centre = tankcast_stats::mean(&factors);
    for f in &mut factors {
        *f -= centre;
    }

    let seasonal: Vec<f64> = (0..n).map(|t| factors[t % period]).collect();
    let deseasonalized: Vec<f64> = data.iter().zip(&seasonal).map(|(x, s)| x - s).collect();

    debug!(n, period, "seasonal decomposition complete");

    Ok(SeasonalComponents {
        period,
        trend,
        seasonal,
        deseasonalized,
    })
}

/// Centred moving average of width `period`.
///
/// Odd periods use equal weights over `period` points. Even periods use a
/// `2 x period` filter: `period + 1` points with half weight at both ends.
/// Positions closer than `period / 2` to either end are NaN.
fn centred_moving_average(data: &[f64], period: usize) -> Vec<f64> {
    let n = data.len();
    let half = period / 2;
    let p = period as f64;

    let mut prefix = Vec::with_capacity(n + 1);
    prefix.push(0.0);
    let mut acc = 0.0;
    for &x in data {
        acc += x;
        prefix.push(acc);
    }

    let mut trend = vec![f64::NAN; n];
    for t in half..n.saturating_sub(half) {
        let window = prefix[t + half + 1] - prefix[t - half];
        trend[t] = if period % 2 == 1 {
            window / p
        } else {
            (window - 0.5 * (data[t - half] + data[t + half])) / p
        };
    }
    trend
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sine_with_trend(n: usize, period: usize) -> Vec<f64> {
        (0..n)
            .map(|t| {
                10.0 + 0.05 * t as f64
                    + 2.0 * (2.0 * std::f64::consts::PI * t as f64 / period as f64).sin()
            })
            .collect()
    }

    #[test]
    fn moving_average_odd() {
        let ma = centred_moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert!(ma[0].is_nan());
        assert_abs_diff_eq!(ma[1], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ma[2], 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ma[3], 4.0, epsilon = 1e-12);
        assert!(ma[4].is_nan());
    }

    #[test]
    fn moving_average_even_uses_half_weights() {
        // period 4: weights [0.125, 0.25, 0.25, 0.25, 0.125]
        let data = [0.0, 0.0, 8.0, 0.0, 0.0, 0.0];
        let ma = centred_moving_average(&data, 4);
        assert!(ma[0].is_nan() && ma[1].is_nan());
        assert_abs_diff_eq!(ma[2], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ma[3], 2.0, epsilon = 1e-12);
        assert!(ma[4].is_nan() && ma[5].is_nan());

        let edge = centred_moving_average(&[8.0, 0.0, 0.0, 0.0, 0.0], 4);
        assert_abs_diff_eq!(edge[2], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn seasonal_has_zero_mean_and_period() {
        let period = 12;
        let data = sine_with_trend(120, period);
        let parts = decompose(&data, &DecomposeConfig::default().with_period(period)).unwrap();
        let factors = parts.seasonal_factors();
        assert_eq!(factors.len(), period);
        assert_abs_diff_eq!(factors.iter().sum::<f64>(), 0.0, epsilon = 1e-9);
        for t in period..data.len() {
            assert_abs_diff_eq!(parts.seasonal()[t], parts.seasonal()[t - period], epsilon = 1e-12);
        }
    }

    #[test]
    fn recovers_pure_seasonal_pattern() {
        let period = 7;
        let pattern = [1.0, -2.0, 0.5, 3.0, -1.5, -0.5, -0.5];
        let data: Vec<f64> = (0..70).map(|t| 20.0 + pattern[t % period]).collect();
        let parts = decompose(&data, &DecomposeConfig::default().with_period(period)).unwrap();
        for t in 0..data.len() {
            assert_abs_diff_eq!(parts.seasonal()[t], pattern[t % period], epsilon = 1e-9);
            assert_abs_diff_eq!(parts.deseasonalized()[t], 20.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn trend_nan_only_at_edges() {
        let period = 10;
        let data = sine_with_trend(50, period);
        let parts = decompose(&data, &DecomposeConfig::default().with_period(period)).unwrap();
        let trend = parts.trend();
        assert!(trend[..5].iter().all(|x| x.is_nan()));
        assert!(trend[45..].iter().all(|x| x.is_nan()));
        assert!(trend[5..45].iter().all(|x| x.is_finite()));
    }

    #[test]
    fn rejects_short_series() {
        let err = decompose(&[1.0, 2.0, 3.0], &DecomposeConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            DecomposeError::InsufficientData {
                n: 3,
                min: 730,
                period: 365
            }
        ));
    }

    #[test]
    fn rejects_invalid_input() {
        let config = DecomposeConfig::default().with_period(2);
        assert_eq!(decompose(&[], &config).unwrap_err(), DecomposeError::EmptyData);
        assert_eq!(
            decompose(&[1.0, f64::NAN, 3.0, 4.0], &config).unwrap_err(),
            DecomposeError::NonFiniteData
        );
        assert_eq!(
            decompose(&[0.0; 8], &config).unwrap_err(),
            DecomposeError::ConstantData
        );
        assert_eq!(
            decompose(&[1.0, 2.0], &DecomposeConfig::default().with_period(1)).unwrap_err(),
            DecomposeError::InvalidPeriod { period: 1 }
        );
    }

    #[test]
    fn flatness_is_relative_to_level() {
        let config = DecomposeConfig::default().with_period(2);
        let jitter: Vec<f64> = (0..8).map(|t| 1e6 + 1e-9 * (t % 2) as f64).collect();
        assert_eq!(
            decompose(&jitter, &config).unwrap_err(),
            DecomposeError::ConstantData
        );
        let small: Vec<f64> = (0..8).map(|t| 1e-3 * (t % 2) as f64).collect();
        assert!(decompose(&small, &config).is_ok());
    }
}
