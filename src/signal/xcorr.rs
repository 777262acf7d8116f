//! Normalized cross-correlation with a bounded lag search.

/// Normalized cross-correlation of `a` against `b` at a fixed integer lag.
///
/// A positive lag delays `b`: sample `a[i]` is compared with `b[i - lag]`,
/// so when `a` is a copy of `b` arriving `s` samples later the coefficient
/// peaks at `lag = s`. Samples shifted outside the overlap contribute zero,
/// and the normalization uses the full-window energies, so the coefficient
/// lies in [-1, 1] for every lag.
///
/// Returns 0.0 when either signal has no energy.
pub fn cross_correlation_at(a: &[f64], b: &[f64], lag: i64) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }

    let energy_a: f64 = a[..n].iter().map(|x| x * x).sum();
    let energy_b: f64 = b[..n].iter().map(|x| x * x).sum();
    let norm = (energy_a * energy_b).sqrt();
    if norm <= f64::EPSILON {
        return 0.0;
    }

    let mut dot = 0.0;
    for i in 0..n {
        let j = i as i64 - lag;
        if (0..n as i64).contains(&j) {
            dot += a[i] * b[j as usize];
        }
    }
    dot / norm
}

/// Search the lag in `[-max_lag, max_lag]` maximizing the normalized
/// cross-correlation of `a` against `b`.
///
/// Returns `(coefficient, lag)`. Ties prefer the smaller absolute lag, then
/// the earlier (more negative) lag, making the search deterministic.
pub fn max_cross_correlation(a: &[f64], b: &[f64], max_lag: usize) -> (f64, i64) {
    let mut best_cc = f64::NEG_INFINITY;
    let mut best_lag = 0i64;
    for lag in -(max_lag as i64)..=(max_lag as i64) {
        let cc = cross_correlation_at(a, b, lag);
        let better = cc > best_cc
            || (cc == best_cc && lag.abs() < best_lag.abs())
            || (cc == best_cc && lag.abs() == best_lag.abs() && lag < best_lag);
        if better {
            best_cc = cc;
            best_lag = lag;
        }
    }
    (best_cc, best_lag)
}

/// Normalized cross-correlation at zero lag.
pub fn zero_lag_correlation(a: &[f64], b: &[f64]) -> f64 {
    cross_correlation_at(a, b, 0)
}
