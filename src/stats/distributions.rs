//! CDF approximations
//!
//! Every test in the crate goes through these two functions so p-values are
//! reproducible across tests and platforms.

/// Standard normal CDF (Abramowitz and Stegun 7.1.26)
pub fn normal_cdf(x: f64) -> f64 {
    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;
    let p = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs() / std::f64::consts::SQRT_2;

    let t = 1.0 / (1.0 + p * x);
    let y = 1.0 - (((((a5 * t + a4) * t) + a3) * t + a2) * t + a1) * t * (-x * x).exp();

    0.5 * (1.0 + sign * y)
}

/// Two-sided p-value for a standard normal statistic
pub fn two_sided_p_value(z: f64) -> f64 {
    2.0 * (1.0 - normal_cdf(z.abs()))
}

/// Chi-square CDF via the Wilson-Hilferty cube-root transform
pub fn chi_square_cdf(x: f64, degrees_of_freedom: f64) -> f64 {
    if x <= 0.0 || degrees_of_freedom <= 0.0 {
        return 0.0;
    }
    let k = degrees_of_freedom;
    let shift = 2.0 / (9.0 * k);
    let z = ((x / k).cbrt() - (1.0 - shift)) / shift.sqrt();
    normal_cdf(z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_cdf_known_points() {
        assert!((normal_cdf(0.0) - 0.5).abs() < 1e-9);
        assert!((normal_cdf(1.96) - 0.975).abs() < 1e-3);
        assert!((normal_cdf(-1.96) - 0.025).abs() < 1e-3);
        assert!(normal_cdf(8.0) > 0.999_999);
    }

    #[test]
    fn test_normal_cdf_symmetry() {
        for x in [0.3, 1.0, 2.5] {
            assert!((normal_cdf(x) + normal_cdf(-x) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_two_sided_p_value() {
        assert!((two_sided_p_value(0.0) - 1.0).abs() < 1e-6);
        assert!((two_sided_p_value(1.96) - 0.05).abs() < 2e-3);
        assert_eq!(two_sided_p_value(-2.0), two_sided_p_value(2.0));
    }

    #[test]
    fn test_chi_square_critical_values() {
        // 95th percentiles: 5.991 (df=2), 18.307 (df=10)
        assert!((chi_square_cdf(5.991, 2.0) - 0.95).abs() < 0.01);
        assert!((chi_square_cdf(18.307, 10.0) - 0.95).abs() < 0.005);
    }

    #[test]
    fn test_chi_square_non_positive() {
        assert_eq!(chi_square_cdf(0.0, 2.0), 0.0);
        assert_eq!(chi_square_cdf(-1.0, 10.0), 0.0);
    }
}
