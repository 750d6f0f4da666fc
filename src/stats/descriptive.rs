//! Descriptive statistics over f64 slices
//!
//! All dispersion measures are population moments unless the name says
//! otherwise. Empty input yields 0.

/// Arithmetic mean
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by n)
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Unbiased sample variance (divides by n - 1)
pub fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

/// Third standardized moment
pub fn skewness(values: &[f64]) -> f64 {
    let std = population_std_dev(values);
    if std == 0.0 {
        return 0.0;
    }
    let m = mean(values);
    let n = values.len() as f64;
    values.iter().map(|v| ((v - m) / std).powi(3)).sum::<f64>() / n
}

/// Fourth standardized moment minus 3
pub fn excess_kurtosis(values: &[f64]) -> f64 {
    let std = population_std_dev(values);
    if std == 0.0 {
        return 0.0;
    }
    let m = mean(values);
    let n = values.len() as f64;
    values.iter().map(|v| ((v - m) / std).powi(4)).sum::<f64>() / n - 3.0
}

/// Percentile of an ascending slice, interpolating linearly between the
/// floor and ceiling of `p * (n - 1)`
///
/// Infinite neighbours are returned as-is, so a tail of `f64::INFINITY`
/// entries never produces NaN.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let (low, high) = (sorted[lower], sorted[upper]);
    let weight = rank - lower as f64;
    if lower == upper || weight == 0.0 || low == high {
        return low;
    }
    if high.is_infinite() {
        return high;
    }
    if low.is_infinite() {
        return low;
    }
    low + (high - low) * weight
}
