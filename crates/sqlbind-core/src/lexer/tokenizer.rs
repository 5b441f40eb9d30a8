//! SQL Tokenizer implementation.

use super::{Keyword, LexError, Operator, Position, Punct, Token, TokenKind};

/// Tokenizes the entire input, ending with an `EndOfInput` token.
///
/// # Errors
///
/// Returns a `LexError` for an unterminated string literal or quoted
/// identifier, or a quoted identifier containing `.`. Unknown characters
/// never fail here; they become `Punct::Unknown` tokens for the parser to
/// reject.
pub fn tokenize(sql: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(sql).tokenize()
}

/// A lexer that tokenizes SQL input.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The line/column of `pos`.
    position: Position,
    /// The byte position of the start of the current token.
    start: usize,
    /// The line/column of `start`.
    start_position: Position,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            position: Position::default(),
            start: 0,
            start_position: Position::default(),
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        self.position = self.position.advance(c);
        Some(c)
    }

    /// Skips the rest of the current line.
    fn skip_line(&mut self) {
        while self.peek().is_some_and(|c| c != '\n') {
            self.advance();
        }
    }

    /// Skips whitespace and comments.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            match (self.peek(), self.peek_next()) {
                (Some('-'), Some('-')) | (Some('#'), _) => self.skip_line(),
                (Some('/'), Some('*')) => {
                    self.advance();
                    self.advance();
                    loop {
                        match self.advance() {
                            Some('*') if self.peek() == Some('/') => {
                                self.advance();
                                break;
                            }
                            None => break,
                            _ => {}
                        }
                    }
                }
                _ => break,
            }
        }
    }

    /// Returns the source text of the current token.
    fn lexeme(&self) -> &'a str {
        &self.input[self.start..self.pos]
    }

    /// Creates a token spanning from the token start to the current position.
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.lexeme(), self.start_position)
    }

    fn error(&self, message: &str) -> LexError {
        LexError::new(message, self.start_position.line, self.start_position.column)
    }

    /// Scans an identifier or keyword.
    fn scan_identifier(&mut self) -> Token {
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.advance();
        }

        match Keyword::from_str(self.lexeme()) {
            Some(keyword) => self.make_token(TokenKind::Keyword(keyword)),
            None => self.make_token(TokenKind::Identifier),
        }
    }

    /// Scans a quoted identifier (e.g., "column name" or `column name`).
    fn scan_quoted_identifier(&mut self, quote: char) -> Result<Token, LexError> {
        self.advance();
        let mut name = String::new();

        loop {
            match self.peek() {
                Some(c) if c == quote => {
                    if self.peek_next() == Some(quote) {
                        name.push(quote);
                        self.advance();
                        self.advance();
                    } else {
                        break;
                    }
                }
                Some(c) => {
                    name.push(c);
                    self.advance();
                }
                None => return Err(self.error("Unterminated quoted identifier")),
            }
        }

        self.advance();
        // Names are qualified with '.', so a quoted part cannot hold one.
        if name.contains('.') {
            return Err(self.error("Quoted identifier contains '.'"));
        }
        let width = u32::try_from(self.lexeme().chars().count()).unwrap_or(u32::MAX);
        Ok(Token::new(TokenKind::Identifier, name, self.start_position).with_width(width))
    }

    /// Scans a number (integer or float).
    fn scan_number(&mut self) -> Token {
        let mut is_float = false;

        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        // An exponent needs digits, otherwise `1e` is a number and an identifier.
        if self.peek().is_some_and(|c| c == 'e' || c == 'E') && self.exponent_follows() {
            is_float = true;
            self.advance();
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        if is_float {
            self.make_token(TokenKind::FloatLiteral)
        } else {
            self.make_token(TokenKind::IntLiteral)
        }
    }

    fn exponent_follows(&self) -> bool {
        let mut chars = self.input[self.pos..].chars().skip(1);
        match chars.next() {
            Some('+' | '-') => chars.next().is_some_and(|c| c.is_ascii_digit()),
            Some(c) => c.is_ascii_digit(),
            None => false,
        }
    }

    /// Scans a string literal, keeping the quotes and escapes in the lexeme.
    fn scan_string(&mut self, quote: char) -> Result<Token, LexError> {
        self.advance();

        loop {
            match self.peek() {
                Some('\\') => {
                    self.advance();
                    if self.advance().is_none() {
                        return Err(self.error("Unterminated string literal"));
                    }
                }
                Some(c) if c == quote => {
                    if self.peek_next() == Some(quote) {
                        self.advance();
                        self.advance();
                    } else {
                        break;
                    }
                }
                Some(_) => {
                    self.advance();
                }
                None => return Err(self.error("Unterminated string literal")),
            }
        }

        self.advance();
        Ok(self.make_token(TokenKind::StringLiteral))
    }

    /// Scans the next token.
    ///
    /// # Errors
    ///
    /// Returns a `LexError` for unterminated quoted constructs.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments();
        self.start = self.pos;
        self.start_position = self.position;

        let Some(c) = self.peek() else {
            return Ok(self.make_token(TokenKind::EndOfInput));
        };

        match c {
            '\'' => return self.scan_string('\''),
            '"' | '`' => return self.scan_quoted_identifier(c),
            c if c.is_ascii_digit() => return Ok(self.scan_number()),
            c if c.is_alphabetic() || c == '_' => return Ok(self.scan_identifier()),
            _ => {}
        }

        self.advance();
        let kind = match c {
            '(' => TokenKind::Punctuation(Punct::LeftParen),
            ')' => TokenKind::Punctuation(Punct::RightParen),
            ',' => TokenKind::Punctuation(Punct::Comma),
            '.' => TokenKind::Punctuation(Punct::Dot),
            ';' => TokenKind::Punctuation(Punct::Semicolon),
            '*' => TokenKind::Operator(Operator::Star),
            '-' => TokenKind::Operator(Operator::Minus),
            '=' => TokenKind::Operator(Operator::Eq),
            '<' => match self.peek() {
                Some('=') => {
                    self.advance();
                    TokenKind::Operator(Operator::LtEq)
                }
                Some('>') => {
                    self.advance();
                    TokenKind::Operator(Operator::NotEq)
                }
                _ => TokenKind::Operator(Operator::Lt),
            },
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::Operator(Operator::GtEq)
                } else {
                    TokenKind::Operator(Operator::Gt)
                }
            }
            '!' if self.peek() == Some('=') => {
                self.advance();
                TokenKind::Operator(Operator::NotEq)
            }
            other => TokenKind::Punctuation(Punct::Unknown(other)),
        };
        Ok(self.make_token(kind))
    }

    /// Tokenizes the entire input and returns all tokens.
    ///
    /// # Errors
    ///
    /// Returns the first `LexError` encountered.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }
}
