//! Partial autocorrelation (PACF) from sample autocovariances.

/// Adjusted sample autocovariances for lags `0..=max_lag`: lag `k` is
/// divided by `n - k`.
fn autocovariance(data: &[f64], max_lag: usize) -> Vec<f64> {
    let n = data.len();
    let mean = crate::mean(data);
    (0..=max_lag)
        .map(|lag| {
            let sum: f64 = data[..n - lag]
                .iter()
                .zip(&data[lag..])
                .map(|(&xt, &xt_h)| (xt - mean) * (xt_h - mean))
                .sum();
            sum / (n - lag) as f64
        })
        .collect()
}

/// Partial autocorrelation function for lags `0..=max_lag`.
///
/// Yule-Walker estimates with adjusted autocovariances (denominator
/// `n - k`), solved lag by lag with the Durbin-Levinson recursion. Lag 0
/// is reported as 1.0 so that index `k` of the result is the PACF at lag
/// `k`. `max_lag` is clamped to `n - 1`.
///
/// Returns `None` if `data.len() < 3`, any value is non-finite, or the
/// series is constant.
///
/// # Example
///
/// ```
/// let data = [1.0, 3.0, 2.0, 4.0, 3.0, 5.0, 4.0, 6.0, 5.0, 7.0];
/// let r = tankcast_stats::pacf(&data, 4).unwrap();
/// assert_eq!(r.len(), 5);
/// assert_eq!(r[0], 1.0);
/// ```
pub fn pacf(data: &[f64], max_lag: usize) -> Option<Vec<f64>> {
    let n = data.len();
    if n < 3 || data.iter().any(|v| !v.is_finite()) {
        return None;
    }
    let max_lag = max_lag.min(n - 1);
    let acov = autocovariance(data, max_lag);
    let c0 = acov[0];
    if c0 <= 0.0 {
        return None;
    }
    let rho: Vec<f64> = acov.iter().map(|c| c / c0).collect();

    let mut pacf_vals = Vec::with_capacity(max_lag + 1);
    pacf_vals.push(1.0);
    if max_lag == 0 {
        return Some(pacf_vals);
    }

    // phi_{1,1} = rho(1)
    pacf_vals.push(rho[1]);
    let mut phi_prev = vec![rho[1]];

    for h in 2..=max_lag {
        let mut num = rho[h];
        let mut den = 1.0;
        for j in 0..h - 1 {
            num -= phi_prev[j] * rho[h - 1 - j];
            den -= phi_prev[j] * rho[j + 1];
        }
        let phi_hh = if den.abs() > 1e-14 { num / den } else { 0.0 };

        let mut phi_new = Vec::with_capacity(h);
        for j in 0..h - 1 {
            phi_new.push(phi_prev[j] - phi_hh * phi_prev[h - 2 - j]);
        }
        phi_new.push(phi_hh);

        pacf_vals.push(phi_hh);
        phi_prev = phi_new;
    }

    Some(pacf_vals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    fn ar1(phi: f64, n: usize, seed: u64) -> Vec<f64> {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let normal = Normal::new(0.0, 1.0).unwrap();
        let mut data = vec![0.0; n];
        for t in 1..n {
            data[t] = phi * data[t - 1] + normal.sample(&mut rng);
        }
        data
    }

    #[test]
    fn pacf_lag_one_matches_adjusted_acf() {
        let data = [1.0, 3.0, 2.0, 4.0, 3.0, 5.0, 4.0, 6.0, 5.0, 7.0];
        let r = pacf(&data, 3).unwrap();
        let acov = autocovariance(&data, 1);
        assert_abs_diff_eq!(r[1], acov[1] / acov[0], epsilon = 1e-12);
    }

    #[test]
    fn pacf_ar1_cuts_off_after_lag_one() {
        let data = ar1(0.8, 3000, 11);
        let r = pacf(&data, 10).unwrap();
        assert_eq!(r.len(), 11);
        assert!((r[1] - 0.8).abs() < 0.05, "pacf[1] = {}", r[1]);
        for (k, v) in r.iter().enumerate().skip(2) {
            assert!(v.abs() < 0.1, "pacf[{k}] = {v}");
        }
    }

    #[test]
    fn pacf_rejects_short_or_constant() {
        assert!(pacf(&[1.0, 2.0], 1).is_none());
        assert!(pacf(&[0.0; 10], 3).is_none());
        assert!(pacf(&[1.0, f64::INFINITY, 2.0, 3.0], 2).is_none());
    }

    #[test]
    fn pacf_zero_lag_only() {
        assert_eq!(pacf(&[1.0, 2.0, 4.0], 0).unwrap(), vec![1.0]);
    }
}
