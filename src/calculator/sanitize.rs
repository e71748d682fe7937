//! Input cleanup for section expressions.
//!
//! Section inputs come straight from a text field, so they can hold anything.
//! Before evaluation everything except digits, the four operators,
//! parentheses and the decimal point is dropped.

use lazy_static::lazy_static;
use regex::Regex;

/// Longest sanitized expression that will be evaluated.
///
/// The best-effort evaluator retries on shorter prefixes, so its worst case
/// is quadratic in the input length.
pub const MAX_EXPRESSION_LEN: usize = 256;

lazy_static! {
    /// Matches every character that can never be part of an expression.
    static ref NON_EXPRESSION_CHARS: Regex = Regex::new(r"[^0-9+\-*/().]").unwrap();

    /// Matches a trailing binary operator.
    static ref TRAILING_OPERATOR: Regex = Regex::new(r"[+\-*/]$").unwrap();
}

/// Strip every character that is not a digit, an operator, a parenthesis or a dot.
///
/// The result is capped at [`MAX_EXPRESSION_LEN`] characters.
pub fn sanitize(input: &str) -> String {
    let mut cleaned = NON_EXPRESSION_CHARS.replace_all(input, "").into_owned();
    // Only ASCII survives the filter, so byte truncation is safe.
    cleaned.truncate(MAX_EXPRESSION_LEN);
    cleaned
}

/// Check whether a sanitized expression is still being typed.
///
/// An expression is incomplete when it ends with an operator or an open
/// parenthesis, contains an empty `()` pair, or has unbalanced parentheses.
pub fn is_incomplete(expression: &str) -> bool {
    if TRAILING_OPERATOR.is_match(expression) || expression.ends_with('(') {
        return true;
    }

    if expression.contains("()") {
        return true;
    }

    let open = expression.chars().filter(|&c| c == '(').count();
    let close = expression.chars().filter(|&c| c == ')').count();
    open != close
}

/// Remove a single trailing operator, if there is one.
pub fn strip_trailing_operator(expression: &str) -> &str {
    match TRAILING_OPERATOR.find(expression) {
        Some(m) => &expression[..m.start()],
        None => expression,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stray_characters_removed() {
        assert_eq!(sanitize("abc5+3xyz"), "5+3");
        assert_eq!(sanitize(" 1 2 . 5 "), "12.5");
        assert_eq!(sanitize("2×3÷4"), "234");
        assert_eq!(sanitize("2^3%"), "23");
    }

    #[test]
    fn test_only_noise_becomes_empty() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("   "), "");
        assert_eq!(sanitize("hello"), "");
    }

    #[test]
    fn test_length_is_capped() {
        let long = "1+".repeat(MAX_EXPRESSION_LEN);
        assert_eq!(sanitize(&long).len(), MAX_EXPRESSION_LEN);
    }

    #[test]
    fn test_incomplete_expressions_detected() {
        assert!(is_incomplete("12+"));
        assert!(is_incomplete("12-"));
        assert!(is_incomplete("3*"));
        assert!(is_incomplete("3/"));
        assert!(is_incomplete("2*("));
        assert!(is_incomplete("2+()"));
        assert!(is_incomplete("(5+2"));
        assert!(is_incomplete("5+2)"));
    }

    #[test]
    fn test_complete_expressions_accepted() {
        assert!(!is_incomplete("12"));
        assert!(!is_incomplete("2*(3+4)"));
        assert!(!is_incomplete("(1)"));
        assert!(!is_incomplete("1."));
    }

    #[test]
    fn test_only_one_trailing_operator_stripped() {
        assert_eq!(strip_trailing_operator("12+3*"), "12+3");
        assert_eq!(strip_trailing_operator("5+-"), "5+");
        assert_eq!(strip_trailing_operator("(5+2"), "(5+2");
        assert_eq!(strip_trailing_operator("+"), "");
    }
}
