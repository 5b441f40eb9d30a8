//! Token types for the SQL lexer.

use super::Position;

/// SQL keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // Statements
    Select,
    Insert,
    Update,
    Delete,

    // Clauses
    From,
    Where,
    Group,
    Order,
    By,
    Limit,
    Offset,
    Distinct,
    As,
    Into,
    Values,
    Set,

    // Joins
    Join,
    Inner,
    Left,
    Right,
    Full,
    Outer,
    Cross,
    Natural,
    On,
    Using,

    // Logical operators
    And,
    Or,
    Not,
    In,
    Is,
    Null,
    Like,

    // Ordering
    Asc,
    Desc,

    // Recognized only to be rejected
    Having,
    Union,
    With,
    Over,
    Exists,
}

impl Keyword {
    /// Attempts to parse a keyword from a string (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SELECT" => Some(Self::Select),
            "INSERT" => Some(Self::Insert),
            "UPDATE" => Some(Self::Update),
            "DELETE" => Some(Self::Delete),
            "FROM" => Some(Self::From),
            "WHERE" => Some(Self::Where),
            "GROUP" => Some(Self::Group),
            "ORDER" => Some(Self::Order),
            "BY" => Some(Self::By),
            "LIMIT" => Some(Self::Limit),
            "OFFSET" => Some(Self::Offset),
            "DISTINCT" => Some(Self::Distinct),
            "AS" => Some(Self::As),
            "INTO" => Some(Self::Into),
            "VALUES" => Some(Self::Values),
            "SET" => Some(Self::Set),
            "JOIN" => Some(Self::Join),
            "INNER" => Some(Self::Inner),
            "LEFT" => Some(Self::Left),
            "RIGHT" => Some(Self::Right),
            "FULL" => Some(Self::Full),
            "OUTER" => Some(Self::Outer),
            "CROSS" => Some(Self::Cross),
            "NATURAL" => Some(Self::Natural),
            "ON" => Some(Self::On),
            "USING" => Some(Self::Using),
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            "NOT" => Some(Self::Not),
            "IN" => Some(Self::In),
            "IS" => Some(Self::Is),
            "NULL" => Some(Self::Null),
            "LIKE" => Some(Self::Like),
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            "HAVING" => Some(Self::Having),
            "UNION" => Some(Self::Union),
            "WITH" => Some(Self::With),
            "OVER" => Some(Self::Over),
            "EXISTS" => Some(Self::Exists),
            _ => None,
        }
    }

    /// Returns the keyword as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::From => "FROM",
            Self::Where => "WHERE",
            Self::Group => "GROUP",
            Self::Order => "ORDER",
            Self::By => "BY",
            Self::Limit => "LIMIT",
            Self::Offset => "OFFSET",
            Self::Distinct => "DISTINCT",
            Self::As => "AS",
            Self::Into => "INTO",
            Self::Values => "VALUES",
            Self::Set => "SET",
            Self::Join => "JOIN",
            Self::Inner => "INNER",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Full => "FULL",
            Self::Outer => "OUTER",
            Self::Cross => "CROSS",
            Self::Natural => "NATURAL",
            Self::On => "ON",
            Self::Using => "USING",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::In => "IN",
            Self::Is => "IS",
            Self::Null => "NULL",
            Self::Like => "LIKE",
            Self::Asc => "ASC",
            Self::Desc => "DESC",
            Self::Having => "HAVING",
            Self::Union => "UNION",
            Self::With => "WITH",
            Self::Over => "OVER",
            Self::Exists => "EXISTS",
        }
    }
}

/// Operator symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// =
    Eq,
    /// <> or !=
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// *
    Star,
    /// -
    Minus,
}

impl Operator {
    /// Returns the canonical spelling of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Star => "*",
            Self::Minus => "-",
        }
    }
}

/// Punctuation characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Punct {
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
    /// .
    Dot,
    /// ;
    Semicolon,
    /// Any character the lexer has no other use for.
    Unknown(char),
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Identifier (e.g., column_name, `quoted name`)
    Identifier,
    /// SQL keyword
    Keyword(Keyword),
    /// Integer literal (e.g., 42)
    IntLiteral,
    /// Float literal (e.g., 3.14)
    FloatLiteral,
    /// String literal (e.g., 'hello')
    StringLiteral,
    /// Comparison or arithmetic symbol
    Operator(Operator),
    /// Delimiters and unknown characters
    Punctuation(Punct),
    /// End of input
    EndOfInput,
}

/// A token with its position in the source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The raw lexeme as written in the source.
    ///
    /// Quoted identifiers hold the unquoted name; every other token keeps
    /// the exact source slice, quotes included for string literals.
    pub text: String,
    /// Line of the first character.
    pub line: u32,
    /// Column of the first character.
    pub column: u32,
    /// Number of source characters the token spans.
    pub width: u32,
}

impl Token {
    /// Creates a new token.
    ///
    /// The width is the length of `text`; use [`Token::with_width`] when the
    /// source spelling is longer.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        let text = text.into();
        let width = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        Self {
            kind,
            text,
            line: position.line,
            column: position.column,
            width,
        }
    }

    /// Sets the number of source characters the token spans.
    #[must_use]
    pub const fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Returns the position of the token.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Returns true if this is the end-of-input token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::EndOfInput)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(kw) => Some(kw),
            _ => None,
        }
    }

    /// Returns true if `next` starts exactly where this token ends.
    ///
    /// Used to tell `1 a` (value and alias) apart from `1a`.
    #[must_use]
    pub fn is_adjacent_to(&self, next: &Self) -> bool {
        if self.text.contains('\n') || next.line != self.line {
            return false;
        }
        self.column.saturating_add(self.width) == next.column
    }

    /// Decodes a string literal lexeme into its value.
    ///
    /// Undoes doubled quotes (`''`) and backslash escapes (`\'`, `\\`).
    /// Returns `None` for tokens that are not string literals.
    #[must_use]
    pub fn string_value(&self) -> Option<String> {
        if self.kind != TokenKind::StringLiteral {
            return None;
        }
        let mut chars = self.text.chars();
        let quote = chars.next()?;
        let inner: Vec<char> = chars.collect();
        let body = inner.split_last().map_or(&[][..], |(_, rest)| rest);

        let mut value = String::with_capacity(body.len());
        let mut i = 0;
        while i < body.len() {
            let c = body[i];
            if c == '\\' && i + 1 < body.len() {
                value.push(body[i + 1]);
                i += 2;
            } else if c == quote && body.get(i + 1) == Some(&quote) {
                value.push(quote);
                i += 2;
            } else {
                value.push(c);
                i += 1;
            }
        }
        Some(value)
    }
}
