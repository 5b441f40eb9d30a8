//! Lexer error type.

use thiserror::Error;

/// An error raised while tokenizing.
///
/// Only unterminated quoted constructs and dotted quoted identifiers are
/// lexical errors; every other malformed input is turned into tokens and rejected by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} on line {line}")]
pub struct LexError {
    /// The error message.
    pub message: String,
    /// Line of the construct that failed to terminate.
    pub line: u32,
    /// Column of the construct that failed to terminate.
    pub column: u32,
}

impl LexError {
    /// Creates a new lexer error.
    #[must_use]
    pub fn new(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}
