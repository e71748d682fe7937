//! The grand-total formula.

use tracing::debug;

/// Combine the three section totals into the grand total.
///
/// When both `a` and `d` are positive:
/// - `a >= d`: `(a * 2) / d + m`
/// - `a < d`: `4 - (2 * d) / a + m`
///
/// Otherwise the grand total is `0`. A result that overflows to infinity
/// or NaN is also reported as `0`.
pub fn grand_total(a: f64, d: f64, m: f64) -> f64 {
    if !(a > 0.0 && d > 0.0) {
        return 0.0;
    }

    let result = if a >= d {
        (a * 2.0) / d + m
    } else {
        4.0 - (2.0 * d) / a + m
    };

    if result.is_finite() {
        result
    } else {
        debug!(a, d, m, "grand total is not finite, using 0");
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a_at_least_d() {
        assert_eq!(grand_total(10.0, 5.0, 1.0), 5.0);
        assert_eq!(grand_total(4.0, 4.0, 0.0), 2.0);
    }

    #[test]
    fn test_a_less_than_d() {
        assert_eq!(grand_total(5.0, 10.0, 1.0), 1.0);
        assert_eq!(grand_total(1.0, 4.0, -2.0), -6.0);
    }

    #[test]
    fn test_non_positive_inputs_give_zero() {
        assert_eq!(grand_total(0.0, 5.0, 1.0), 0.0);
        assert_eq!(grand_total(5.0, 0.0, 1.0), 0.0);
        assert_eq!(grand_total(-5.0, 2.0, 1.0), 0.0);
        assert_eq!(grand_total(0.0, 0.0, 100.0), 0.0);
    }

    #[test]
    fn test_overflow_gives_zero() {
        assert_eq!(grand_total(f64::MAX, 1e-300, 0.0), 0.0);
        assert_eq!(grand_total(1.0, 1.0, f64::INFINITY), 0.0);
    }
}
