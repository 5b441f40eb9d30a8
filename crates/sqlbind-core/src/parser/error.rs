//! Parser error types.

use thiserror::Error;

use crate::lexer::{LexError, Token};

/// What went wrong while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// The input holds no statement (empty, comments only, or an unknown
    /// leading word).
    NothingToDo,
    /// The select list is missing or malformed.
    ExpectedColumnsOrSetFunction,
    /// A token that does not fit the grammar.
    UnexpectedToken,
    /// The input ended in the middle of a statement.
    UnexpectedEnd,
    /// `NOT` outside of `IS NOT` / `NOT IN`.
    UnsupportedNegation,
    /// A recognized construct outside the supported subset.
    NotSupported,
    /// Unknown aggregate or wrong argument count.
    InvalidSetFunction,
    /// A LIMIT or OFFSET value outside the supported range.
    InvalidLimit,
    /// Subqueries or parentheses nested beyond the configured depth.
    TooDeeplyNested,
    /// The tokenizer rejected the input.
    Lex,
}

/// A parse error.
///
/// `Display` gives the one-line form (`"<message> on line <n>"`);
/// [`ParseError::render`] adds the source line and a caret.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} on line {line}")]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// The error message.
    pub message: String,
    /// Line of the offending token.
    pub line: u32,
    /// Column of the offending token.
    pub column: u32,
    /// Source text of the offending token; empty at end of input.
    pub offending_text: String,
}

impl ParseError {
    /// Creates a new parse error located at `token`.
    #[must_use]
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, token: &Token) -> Self {
        Self {
            kind,
            message: message.into(),
            line: token.line,
            column: token.column,
            offending_text: token.text.clone(),
        }
    }

    /// Creates the error for input holding no statement, located at `eof`.
    #[must_use]
    pub fn nothing_to_do(eof: &Token) -> Self {
        Self::new(ParseErrorKind::NothingToDo, "Nothing to do", eof)
    }

    /// Creates the error for a missing or malformed select list.
    #[must_use]
    pub fn expected_columns(token: &Token) -> Self {
        Self::new(
            ParseErrorKind::ExpectedColumnsOrSetFunction,
            "Expected columns or a set function",
            token,
        )
    }

    /// Creates an "unexpected token" error, or an "unexpected end of input"
    /// error when `found` is the end of input.
    #[must_use]
    pub fn unexpected(expected: &str, found: &Token) -> Self {
        if found.is_eof() {
            Self::new(
                ParseErrorKind::UnexpectedEnd,
                format!("Unexpected end of input, expected {expected}"),
                found,
            )
        } else {
            Self::new(
                ParseErrorKind::UnexpectedToken,
                format!("Unexpected '{}', expected {expected}", found.text),
                found,
            )
        }
    }

    /// Creates the error for a construct outside the supported subset.
    #[must_use]
    pub fn not_supported(construct: &str, token: &Token) -> Self {
        Self::new(
            ParseErrorKind::NotSupported,
            format!("{construct} is not supported"),
            token,
        )
    }

    /// Renders the error with the offending source line and a caret under
    /// the reported column.
    ///
    /// ```
    /// use sqlbind_core::parse;
    ///
    /// let err = parse("SELECT 1a").unwrap_err();
    /// assert_eq!(
    ///     err.render("SELECT 1a"),
    ///     "Expected columns or a set function on line 1\nSELECT 1a\n       ^"
    /// );
    /// ```
    #[must_use]
    pub fn render(&self, source: &str) -> String {
        let line_index = usize::try_from(self.line.saturating_sub(1)).unwrap_or(usize::MAX);
        let source_line = source.lines().nth(line_index).unwrap_or("");
        let width = usize::try_from(self.column.saturating_sub(1)).unwrap_or(0);

        let mut padding: String = source_line
            .chars()
            .take(width)
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();
        while padding.chars().count() < width {
            padding.push(' ');
        }

        format!("{self}\n{source_line}\n{padding}^")
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        Self {
            kind: ParseErrorKind::Lex,
            message: err.message,
            line: err.line,
            column: err.column,
            offending_text: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{Position, TokenKind};

    #[test]
    fn test_display_includes_line() {
        let token = Token::new(TokenKind::IntLiteral, "1", Position::new(1, 8));
        let err = ParseError::expected_columns(&token);
        assert_eq!(err.to_string(), "Expected columns or a set function on line 1");
        assert_eq!(err.offending_text, "1");
    }

    #[test]
    fn test_render_caret_at_end_of_input() {
        let eof = Token::new(TokenKind::EndOfInput, "", Position::new(1, 16));
        let err = ParseError::nothing_to_do(&eof);
        assert_eq!(
            err.render("-- Test Comment"),
            "Nothing to do on line 1\n-- Test Comment\n               ^"
        );
    }

    #[test]
    fn test_render_keeps_tabs() {
        let token = Token::new(TokenKind::Identifier, "x", Position::new(2, 3));
        let err = ParseError::unexpected("FROM", &token);
        assert_eq!(
            err.render("SELECT a\n\t x"),
            "Unexpected 'x', expected FROM on line 2\n\t x\n\t ^"
        );
    }

    #[test]
    fn test_unexpected_at_eof() {
        let eof = Token::new(TokenKind::EndOfInput, "", Position::new(1, 7));
        let err = ParseError::unexpected("a table name", &eof);
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEnd);
        assert_eq!(err.message, "Unexpected end of input, expected a table name");
    }

    #[test]
    fn test_from_lex_error() {
        let err: ParseError = LexError::new("Unterminated string literal", 2, 4).into();
        assert_eq!(err.kind, ParseErrorKind::Lex);
        assert_eq!((err.line, err.column), (2, 4));
    }
}
