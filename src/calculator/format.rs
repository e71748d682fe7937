//! Number formatting for section totals and the grand total.

/// Non-finite values are rendered as zero.
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Round half toward positive infinity.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Format a number with an explicit sign.
///
/// With one decimal place the value is floored to the tenth below it, so
/// `-0.37` becomes `-0.4` and `2.39` becomes `+2.3`. Any other precision
/// rounds to two decimals (half up) and then renders `decimal_places` digits.
/// A `+` is prefixed when the rounded value is zero or positive.
pub fn format_signed(num: f64, decimal_places: usize) -> String {
    let num = finite_or_zero(num);
    let rounded = if decimal_places == 1 {
        (num * 10.0).floor() / 10.0
    } else {
        round_half_up(num * 100.0) / 100.0
    };
    // Adding zero turns -0.0 into 0.0.
    let rounded = rounded + 0.0;

    let fixed = format!("{rounded:.decimal_places$}");
    if rounded >= 0.0 {
        format!("+{fixed}")
    } else {
        fixed
    }
}

/// Format a number with exactly two decimals and no explicit sign.
///
/// Ties round away from zero, so `0.125` becomes `0.13`.
pub fn format_two_decimals(num: f64) -> String {
    let num = finite_or_zero(num);
    let rounded = round_half_up(num.abs() * 100.0) / 100.0;
    format!("{:.2}", rounded.copysign(num))
}

/// Format a number with the shortest decimal text that reads back the same.
///
/// Whole numbers have no fractional part (`5`, not `5.0`).
pub fn format_plain(num: f64) -> String {
    finite_or_zero(num).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_one_decimal_floors() {
        assert_eq!(format_signed(2.0, 1), "+2.0");
        assert_eq!(format_signed(2.39, 1), "+2.3");
        assert_eq!(format_signed(7.0 / 3.0, 1), "+2.3");
        assert_eq!(format_signed(-0.37, 1), "-0.4");
        assert_eq!(format_signed(-1.0, 1), "-1.0");
    }

    #[test]
    fn test_signed_zero_is_positive() {
        assert_eq!(format_signed(0.0, 1), "+0.0");
        assert_eq!(format_signed(-0.0, 1), "+0.0");
        assert_eq!(format_signed(0.04, 1), "+0.0");
    }

    #[test]
    fn test_signed_two_decimals_rounds() {
        assert_eq!(format_signed(1.234, 2), "+1.23");
        assert_eq!(format_signed(1.236, 2), "+1.24");
        assert_eq!(format_signed(-1.236, 2), "-1.24");
        assert_eq!(format_signed(-0.001, 2), "+0.00");
    }

    #[test]
    fn test_signed_non_finite_is_zero() {
        assert_eq!(format_signed(f64::INFINITY, 1), "+0.0");
        assert_eq!(format_signed(f64::NAN, 1), "+0.0");
    }

    #[test]
    fn test_two_decimals() {
        assert_eq!(format_two_decimals(5.0), "5.00");
        assert_eq!(format_two_decimals(2.0 / 3.0), "0.67");
        assert_eq!(format_two_decimals(-3.14159), "-3.14");
        assert_eq!(format_two_decimals(f64::NEG_INFINITY), "0.00");
    }

    #[test]
    fn test_two_decimals_ties_round_away_from_zero() {
        assert_eq!(format_two_decimals(0.125), "0.13");
        assert_eq!(format_two_decimals(-0.125), "-0.13");
        assert_eq!(format_two_decimals(0.375), "0.38");
        assert_eq!(format_two_decimals(1.0 / 8.0), "0.13");
    }

    #[test]
    fn test_plain() {
        assert_eq!(format_plain(5.0), "5");
        assert_eq!(format_plain(2.5), "2.5");
        assert_eq!(format_plain(-0.1), "-0.1");
        assert_eq!(format_plain(f64::NAN), "0");
    }
}
