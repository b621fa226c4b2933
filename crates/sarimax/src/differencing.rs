//! Ordinary differencing and its inverse.

/// Applies the first-difference operator `d` times.
///
/// The result has `n - d` values (empty when `d >= n`).
///
/// # Example
///
/// ```
/// use tankcast_sarimax::difference;
///
/// assert_eq!(difference(&[1.0, 4.0, 9.0, 16.0], 1), vec![3.0, 5.0, 7.0]);
/// assert_eq!(difference(&[1.0, 4.0, 9.0, 16.0], 2), vec![2.0, 2.0]);
/// ```
pub fn difference(data: &[f64], d: usize) -> Vec<f64> {
    let mut out = data.to_vec();
    for _ in 0..d {
        if out.len() < 2 {
            return Vec::new();
        }
        out = out.windows(2).map(|w| w[1] - w[0]).collect();
    }
    out
}

/// Last value of `Δ^k data` for `k = 0..d`; the anchors needed to undo
/// `d` differences past the end of `data`.
pub(crate) fn level_tails(data: &[f64], d: usize) -> Vec<f64> {
    let mut tails = Vec::with_capacity(d);
    let mut current = data.to_vec();
    for _ in 0..d {
        match current.last() {
            Some(&last) => tails.push(last),
            None => break,
        }
        current = difference(&current, 1);
    }
    tails
}

/// Inverts `difference` for values that continue the series the
/// `tails` were taken from.
pub(crate) fn integrate(diffs: &[f64], tails: &[f64]) -> Vec<f64> {
    let mut out = diffs.to_vec();
    for &anchor in tails.iter().rev() {
        let mut level = anchor;
        for v in out.iter_mut() {
            level += *v;
            *v = level;
        }
    }
    out
}
