//! Hypothesis tests for strategy validation
//!
//! Provides:
//! - Welch two-sample t-test for a shift in mean return
//! - Kolmogorov-Smirnov test for a change in return distribution
//! - Jarque-Bera test for normality
//! - Ljung-Box test for autocorrelation
//! - Wald-Wolfowitz runs test for randomness
//!
//! All p-values use the shared normal and chi-square approximations in
//! [`crate::stats`].

use super::types::StatisticalTest;
use crate::stats::{
    chi_square_cdf, excess_kurtosis, mean, percentile, sample_variance, skewness,
    two_sided_p_value,
};

/// Significance threshold applied to every test
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Default number of autocorrelation lags for Ljung-Box
pub const DEFAULT_LJUNG_BOX_LAGS: usize = 10;

/// Runs the five validation tests
#[derive(Debug, Clone)]
pub struct StatisticalValidator {
    ljung_box_lags: usize,
}

impl StatisticalValidator {
    /// Create a validator with the default lag count
    pub fn new() -> Self {
        Self {
            ljung_box_lags: DEFAULT_LJUNG_BOX_LAGS,
        }
    }

    /// Use a custom number of Ljung-Box lags
    #[must_use]
    pub fn with_ljung_box_lags(mut self, lags: usize) -> Self {
        self.ljung_box_lags = lags.max(1);
        self
    }

    /// Welch t-test: H0 both samples share a mean
    pub fn t_test(&self, sample1: &[f64], sample2: &[f64]) -> StatisticalTest {
        let n1 = sample1.len() as f64;
        let n2 = sample2.len() as f64;
        let (t, p_value) = if sample1.len() < 2 || sample2.len() < 2 {
            (0.0, 1.0)
        } else {
            let standard_error =
                (sample_variance(sample1) / n1 + sample_variance(sample2) / n2).sqrt();
            if standard_error == 0.0 {
                (0.0, 1.0)
            } else {
                let t = (mean(sample1) - mean(sample2)) / standard_error;
                (t, two_sided_p_value(t))
            }
        };

        let interpretation = if p_value < SIGNIFICANCE_LEVEL {
            format!("Mean returns differ significantly between samples (t={t:.3})")
        } else {
            "No significant difference in mean returns".to_string()
        };
        build("Two-sample t-test", t, p_value, interpretation)
    }

    /// Kolmogorov-Smirnov: H0 both samples share a distribution
    ///
    /// The asymptotic p-value is not clipped, so identical samples report
    /// a p-value of 2.
    pub fn ks_test(&self, sample1: &[f64], sample2: &[f64]) -> StatisticalTest {
        let mut sorted1 = sample1.to_vec();
        let mut sorted2 = sample2.to_vec();
        sorted1.sort_by(f64::total_cmp);
        sorted2.sort_by(f64::total_cmp);

        let mut d = 0.0_f64;
        if !sorted1.is_empty() && !sorted2.is_empty() {
            let n1 = sorted1.len() as f64;
            let n2 = sorted2.len() as f64;
            for x in sorted1.iter().chain(sorted2.iter()) {
                let cdf1 = sorted1.partition_point(|v| v <= x) as f64 / n1;
                let cdf2 = sorted2.partition_point(|v| v <= x) as f64 / n2;
                d = d.max((cdf1 - cdf2).abs());
            }
        }

        let n1 = sorted1.len() as f64;
        let n2 = sorted2.len() as f64;
        let effective_n = if n1 + n2 > 0.0 {
            (n1 * n2 / (n1 + n2)).sqrt()
        } else {
            0.0
        };
        let p_value = 2.0 * (-2.0 * (d * effective_n).powi(2)).exp();

        let interpretation = if p_value < SIGNIFICANCE_LEVEL {
            format!("Return distributions differ significantly (D={d:.3})")
        } else {
            "Return distributions are consistent".to_string()
        };
        build("Kolmogorov-Smirnov", d, p_value, interpretation)
    }

    /// Jarque-Bera: H0 the sample is normally distributed
    pub fn jarque_bera(&self, sample: &[f64]) -> StatisticalTest {
        let n = sample.len() as f64;
        let skew = skewness(sample);
        let kurt = excess_kurtosis(sample);
        let jb = (n / 6.0) * (skew.powi(2) + kurt.powi(2) / 4.0);
        let p_value = 1.0 - chi_square_cdf(jb, 2.0);

        let interpretation = if p_value < SIGNIFICANCE_LEVEL {
            format!("Returns are not normally distributed (skew={skew:.2}, excess kurtosis={kurt:.2})")
        } else {
            "Returns are consistent with a normal distribution".to_string()
        };
        build("Jarque-Bera", jb, p_value, interpretation)
    }

    /// Ljung-Box: H0 no autocorrelation up to the configured lag
    pub fn ljung_box(&self, sample: &[f64]) -> StatisticalTest {
        let n = sample.len();
        let lags = self.ljung_box_lags.min(n.saturating_sub(1));
        let m = mean(sample);
        let denominator: f64 = sample.iter().map(|x| (x - m).powi(2)).sum();

        let q = if denominator == 0.0 || lags == 0 {
            0.0
        } else {
            let nf = n as f64;
            let sum: f64 = (1..=lags)
                .map(|k| {
                    let numerator: f64 = (k..n)
                        .map(|t| (sample[t] - m) * (sample[t - k] - m))
                        .sum();
                    let rho = numerator / denominator;
                    rho.powi(2) / (nf - k as f64)
                })
                .sum();
            nf * (nf + 2.0) * sum
        };
        let p_value = if lags == 0 {
            1.0
        } else {
            1.0 - chi_square_cdf(q, lags as f64)
        };

        let interpretation = if p_value < SIGNIFICANCE_LEVEL {
            format!("Significant autocorrelation detected within {lags} lags")
        } else {
            "No significant autocorrelation".to_string()
        };
        build("Ljung-Box", q, p_value, interpretation)
    }

    /// Runs test: H0 the order of returns above/below the median is random
    pub fn runs_test(&self, sample: &[f64]) -> StatisticalTest {
        let mut sorted = sample.to_vec();
        sorted.sort_by(f64::total_cmp);
        let median = percentile(&sorted, 0.5);

        let signs: Vec<bool> = sample.iter().map(|x| *x > median).collect();
        let above = signs.iter().filter(|s| **s).count() as f64;
        let below = signs.len() as f64 - above;
        let runs = if signs.is_empty() {
            0.0
        } else {
            1.0 + signs.windows(2).filter(|w| w[0] != w[1]).count() as f64
        };

        let total = above + below;
        let (z, p_value) = if above == 0.0 || below == 0.0 || total < 2.0 {
            (0.0, 1.0)
        } else {
            let product = 2.0 * above * below;
            let expected = product / total + 1.0;
            let variance =
                product * (product - total) / (total.powi(2) * (total - 1.0));
            if variance <= 0.0 {
                (0.0, 1.0)
            } else {
                let z = (runs - expected) / variance.sqrt();
                (z, two_sided_p_value(z))
            }
        };

        let interpretation = if p_value < SIGNIFICANCE_LEVEL {
            if z < 0.0 {
                "Fewer runs than expected: returns cluster (trending)".to_string()
            } else {
                "More runs than expected: returns alternate (mean-reverting)".to_string()
            }
        } else {
            "Return sequence is consistent with randomness".to_string()
        };
        build("Runs test", z, p_value, interpretation)
    }

    /// All five tests: the two-sample tests compare the samples and the
    /// single-sample tests examine `sample2`
    pub fn run_all(&self, sample1: &[f64], sample2: &[f64]) -> Vec<StatisticalTest> {
        vec![
            self.t_test(sample1, sample2),
            self.ks_test(sample1, sample2),
            self.jarque_bera(sample2),
            self.ljung_box(sample2),
            self.runs_test(sample2),
        ]
    }
}

impl Default for StatisticalValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn build(name: &str, statistic: f64, p_value: f64, interpretation: String) -> StatisticalTest {
    StatisticalTest {
        name: name.to_string(),
        statistic,
        p_value,
        significant: p_value < SIGNIFICANCE_LEVEL,
        interpretation,
    }
}
