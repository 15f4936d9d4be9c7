//! Compensated summation and tolerance checks.
//!
//! Marginal probabilities are sums over exponentially many small joint
//! probabilities. Neumaier summation keeps the accumulated rounding error
//! independent of the number of terms, so answers do not drift with the
//! enumeration order.

/// Running Neumaier (improved Kahan) sum.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one term.
    pub fn add(&mut self, value: f64) {
        let t = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - t) + value;
        } else {
            self.compensation += (value - t) + self.sum;
        }
        self.sum = t;
    }

    /// Current compensated total.
    pub fn total(&self) -> f64 {
        self.sum + self.compensation
    }
}

impl Extend<f64> for CompensatedSum {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for v in iter {
            self.add(v);
        }
    }
}

impl FromIterator<f64> for CompensatedSum {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut acc = CompensatedSum::new();
        acc.extend(iter);
        acc
    }
}

/// Sum a slice with Neumaier compensation.
pub fn stable_sum(values: &[f64]) -> f64 {
    values.iter().copied().collect::<CompensatedSum>().total()
}

/// Absolute-tolerance comparison. NaN never compares equal.
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() <= tol
}

/// Check that a distribution sums to 1.0 within `tolerance`.
pub fn sums_to_one(probs: &[f64], tolerance: f64) -> bool {
    approx_eq(stable_sum(probs), 1.0, tolerance)
}

/// True for a finite value in `[0, 1]`.
pub fn is_probability(p: f64) -> bool {
    p.is_finite() && (0.0..=1.0).contains(&p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_sum_recovers_small_terms() {
        let mut values = vec![1.0];
        values.extend(std::iter::repeat(1e-16).take(10_000));
        values.push(-1.0);
        assert!(approx_eq(stable_sum(&values), 1e-12, 1e-18));
    }

    #[test]
    fn stable_sum_empty_is_zero() {
        assert_eq!(stable_sum(&[]), 0.0);
    }

    #[test]
    fn sums_to_one_with_tolerance() {
        assert!(sums_to_one(&[0.2, 0.8], 1e-12));
        assert!(sums_to_one(&[0.1, 0.2, 0.3, 0.4], 1e-12));
        assert!(!sums_to_one(&[0.2, 0.7], 1e-6));
    }

    #[test]
    fn approx_eq_rejects_nan() {
        assert!(!approx_eq(f64::NAN, f64::NAN, 1.0));
        assert!(approx_eq(0.24, 0.2 * 0.8 + 0.8 * 0.1, 1e-12));
    }

    #[test]
    fn is_probability_bounds() {
        assert!(is_probability(0.0));
        assert!(is_probability(1.0));
        assert!(!is_probability(-0.01));
        assert!(!is_probability(1.5));
        assert!(!is_probability(f64::NAN));
        assert!(!is_probability(f64::INFINITY));
    }
}
