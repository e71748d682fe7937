//! Calculator module for evaluating section expressions.
//!
//! This module provides functionality to:
//! - Strip stray characters and detect half-typed expressions
//! - Evaluate expressions with a best-effort fallback
//! - Format totals for display and storage

mod evaluation;
mod format;
mod sanitize;

pub use evaluation::{evaluate, parse_expression};
pub use format::{format_plain, format_signed, format_two_decimals};
pub use sanitize::{MAX_EXPRESSION_LEN, is_incomplete, sanitize};
