//! Relaxed JSON parsing for hand-typed message payloads.
//!
//! Operators type payloads into a textarea, so this crate accepts a JSON
//! superset in the JSON5 style: comments, trailing commas, unquoted keys,
//! single-quoted strings and the extended number forms. Output is a plain
//! [`serde_json::Value`]; nothing downstream sees the relaxed syntax.
//!
//! Values the JSON data model cannot carry (`Infinity`, `NaN`, overflowing
//! floats) are rejected rather than silently coerced.

mod parser;

pub use serde_json::Value;

/// Maximum nesting depth for arrays and objects.
pub const MAX_DEPTH: usize = 128;

/// Error returned by [`parse`]. Positions are 1-based.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Input ended inside a value, string or comment.
    #[error("unexpected end of input at {line}:{column}")]
    UnexpectedEnd { line: usize, column: usize },
    /// A character that cannot start or continue the current construct.
    #[error("unexpected character {found:?} at {line}:{column}")]
    UnexpectedChar { found: char, line: usize, column: usize },
    /// A bare word that is not `true`, `false` or `null`.
    #[error("unknown literal `{word}` at {line}:{column}")]
    UnknownLiteral { word: String, line: usize, column: usize },
    /// Malformed numeric literal.
    #[error("invalid number at {line}:{column}")]
    InvalidNumber { line: usize, column: usize },
    /// `Infinity`, `NaN`, or a float that overflows to infinity.
    #[error("non-finite number at {line}:{column} has no JSON representation")]
    NonFinite { line: usize, column: usize },
    /// Malformed backslash escape inside a string.
    #[error("invalid escape sequence at {line}:{column}")]
    InvalidEscape { line: usize, column: usize },
    /// Arrays/objects nested deeper than [`MAX_DEPTH`].
    #[error("nesting deeper than {max} levels at {line}:{column}", max = MAX_DEPTH)]
    TooDeep { line: usize, column: usize },
}

impl ParseError {
    /// `(line, column)` of the offending input.
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        match self {
            Self::UnexpectedEnd { line, column }
            | Self::UnexpectedChar { line, column, .. }
            | Self::UnknownLiteral { line, column, .. }
            | Self::InvalidNumber { line, column }
            | Self::NonFinite { line, column }
            | Self::InvalidEscape { line, column }
            | Self::TooDeep { line, column } => (*line, *column),
        }
    }
}

/// Parse relaxed JSON text into a value.
///
/// The whole input must be exactly one value, optionally surrounded by
/// whitespace and comments.
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first problem found.
pub fn parse(input: &str) -> Result<Value, ParseError> {
    parser::Parser::new(input).parse_document()
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
