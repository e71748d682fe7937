//! Expression evaluation for section inputs.
//!
//! The grammar is deliberately tiny: decimal numbers, `+ - * /`, unary signs
//! and parentheses. Strict parsing is available through [`parse_expression`];
//! [`evaluate`] is the forgiving variant used while the user is typing.

use std::fmt;

use tracing::trace;

use super::sanitize::{is_incomplete, sanitize, strip_trailing_operator};
use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Num(num) => write!(f, "{num}"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

fn tokenize(expression: &str) -> Result<Vec<Token>, ParseError> {
    let bytes = expression.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let token = match bytes[i] {
            b'0'..=b'9' | b'.' => {
                let start = i;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                if i < bytes.len() && bytes[i] == b'.' {
                    i += 1;
                    while i < bytes.len() && bytes[i].is_ascii_digit() {
                        i += 1;
                    }
                }
                let literal = &expression[start..i];
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| ParseError::InvalidNumber(literal.to_string()))?;
                tokens.push(Token::Num(value));
                continue;
            }
            // `++` and `--` are increment/decrement, never two signs.
            sign @ (b'+' | b'-') if bytes.get(i + 1) == Some(&sign) => {
                return Err(ParseError::DoubledSign(sign as char));
            }
            b'+' => Token::Plus,
            b'-' => Token::Minus,
            b'*' => Token::Star,
            b'/' => Token::Slash,
            b'(' => Token::LParen,
            b')' => Token::RParen,
            _ => {
                let ch = expression[i..].chars().next().unwrap_or_default();
                return Err(ParseError::UnexpectedChar { ch, offset: i });
            }
        };
        tokens.push(token);
        i += 1;
    }

    Ok(tokens)
}

/// Recursive-descent parser over a token slice.
///
/// ```text
/// expr    := term (('+' | '-') term)*
/// term    := unary (('*' | '/') unary)*
/// unary   := ('+' | '-') unary | primary
/// primary := number | '(' expr ')'
/// ```
struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    fn expression(&mut self) -> Result<f64, ParseError> {
        let mut value = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == Token::Plus {
                value + rhs
            } else {
                value - rhs
            };
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, ParseError> {
        let mut value = self.unary()?;
        while let Some(op @ (Token::Star | Token::Slash)) = self.peek() {
            self.pos += 1;
            let rhs = self.unary()?;
            value = if op == Token::Star {
                value * rhs
            } else {
                value / rhs
            };
        }
        Ok(value)
    }

    fn unary(&mut self) -> Result<f64, ParseError> {
        match self.peek() {
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary()
            }
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(-self.unary()?)
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<f64, ParseError> {
        match self.advance() {
            Some(Token::Num(value)) => Ok(value),
            Some(Token::LParen) => {
                let value = self.expression()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    Some(other) => Err(ParseError::UnexpectedToken(other.to_string())),
                    None => Err(ParseError::UnexpectedEnd),
                }
            }
            Some(other) => Err(ParseError::UnexpectedToken(other.to_string())),
            None => Err(ParseError::UnexpectedEnd),
        }
    }
}

/// Parse and evaluate an expression strictly.
///
/// The input is not sanitized. Any syntax error, as well as a result that is
/// infinite or NaN (division by zero), is reported as an error.
pub fn parse_expression(expression: &str) -> Result<f64, ParseError> {
    let tokens = tokenize(expression)?;
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut parser = Parser::new(&tokens);
    let value = parser.expression()?;
    if let Some(extra) = parser.peek() {
        return Err(ParseError::UnexpectedToken(extra.to_string()));
    }

    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParseError::NonFinite)
    }
}

/// Evaluate free-form section input, never failing.
///
/// Stray characters are stripped first. A half-typed expression (see
/// [`is_incomplete`]) has one trailing operator ignored; if what remains is
/// empty or still does not evaluate, the result is `0`. A complete
/// expression that does not evaluate is retried with its last character
/// dropped. Empty input yields `0`.
///
/// The result is always finite.
pub fn evaluate(input: &str) -> f64 {
    let sanitized = sanitize(input);
    let mut candidate = sanitized.as_str();

    while !candidate.is_empty() {
        if is_incomplete(candidate) {
            let valid_part = strip_trailing_operator(candidate);
            if valid_part.is_empty() {
                return 0.0;
            }
            return parse_expression(valid_part).unwrap_or_else(|err| {
                trace!(candidate, %err, "incomplete expression does not evaluate");
                0.0
            });
        }

        match parse_expression(candidate) {
            Ok(value) => return value,
            Err(err) => {
                trace!(candidate, %err, "retrying with last character removed");
                // Sanitized input is pure ASCII.
                candidate = &candidate[..candidate.len() - 1];
            }
        }
    }

    0.0
}
