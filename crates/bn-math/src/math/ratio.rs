//! Conditional-probability quotient.
//!
//! `P(T | E) = P(E ∪ T) / P(E)`. When the evidence is impossible the
//! quotient is 0/0; it is reported as NaN so callers can detect it per
//! query instead of aborting the run.

/// Quotient of a joint and a marginal probability.
///
/// Returns NaN when `marginal` is zero (or either input is NaN). The
/// quotient is not clamped: a joint event that is not a refinement of the
/// marginal one yields whatever the division gives.
pub fn conditional_ratio(joint: f64, marginal: f64) -> f64 {
    if joint.is_nan() || marginal.is_nan() || marginal == 0.0 {
        return f64::NAN;
    }
    joint / marginal
}

/// True when a conditional answer is undefined (impossible evidence).
pub fn is_undefined(answer: f64) -> bool {
    answer.is_nan()
}
