//! Statistical helper functions for trajectory analysis.

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sample variance with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean = data.iter().sum::<f64>() / nf;
    data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0)
}

/// Sample standard deviation with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Smallest and largest value of a slice, ignoring NaN.
///
/// Returns `None` if the slice holds no comparable values.
pub fn min_max(data: &[f64]) -> Option<(f64, f64)> {
    data.iter()
        .copied()
        .filter(|x| !x.is_nan())
        .fold(None, |acc, x| match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
        })
}

/// Raw (uncentred) lagged product sums.
///
/// Returns `(Σ x[i]², Σ x[i + lag]·x[i])` over `i in 0..n - lag`. Both sums
/// are 0.0 when `lag >= data.len()`.
pub fn lagged_products(data: &[f64], lag: usize) -> (f64, f64) {
    let n = data.len();
    if lag >= n {
        return (0.0, 0.0);
    }
    let mut xx = 0.0;
    let mut xx_lag = 0.0;
    for i in 0..n - lag {
        xx += data[i] * data[i];
        xx_lag += data[i + lag] * data[i];
    }
    (xx, xx_lag)
}

/// Uncentred lag autocorrelation `Σ x[i + lag]·x[i] / Σ x[i]²`.
///
/// Returns `None` if `lag >= data.len()` or the denominator is zero.
pub fn autocorrelation(data: &[f64], lag: usize) -> Option<f64> {
    if lag >= data.len() {
        return None;
    }
    let (xx, xx_lag) = lagged_products(data, lag);
    if xx == 0.0 {
        return None;
    }
    Some(xx_lag / xx)
}
