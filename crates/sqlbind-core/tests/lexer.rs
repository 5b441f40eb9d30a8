//! Tests for the tokenizer.

use sqlbind_core::lexer::{Keyword, Operator, Punct, TokenKind, tokenize};

fn kinds(sql: &str) -> Vec<TokenKind> {
    tokenize(sql).unwrap().into_iter().map(|t| t.kind).collect()
}

#[test]
fn keywords_are_case_insensitive() {
    assert_eq!(
        kinds("select SeLeCt SELECT"),
        vec![
            TokenKind::Keyword(Keyword::Select),
            TokenKind::Keyword(Keyword::Select),
            TokenKind::Keyword(Keyword::Select),
            TokenKind::EndOfInput,
        ]
    );
}

#[test]
fn number_glued_to_letters_is_two_tokens() {
    let tokens = tokenize("SELECT 1a").unwrap();
    assert_eq!(tokens[1].kind, TokenKind::IntLiteral);
    assert_eq!(tokens[1].text, "1");
    assert_eq!((tokens[1].line, tokens[1].column), (1, 8));
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!((tokens[2].line, tokens[2].column), (1, 9));
}

#[test]
fn exponent_needs_digits() {
    assert_eq!(
        kinds("1e5 1e"),
        vec![
            TokenKind::FloatLiteral,
            TokenKind::IntLiteral,
            TokenKind::Identifier,
            TokenKind::EndOfInput,
        ]
    );
}

#[test]
fn comments_are_skipped_but_lines_are_counted() {
    let tokens = tokenize("-- first\n# second\n/* third\n */ x").unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].text, "x");
    assert_eq!((tokens[0].line, tokens[0].column), (4, 5));
}

#[test]
fn comment_only_input_ends_at_end_of_line() {
    let tokens = tokenize("-- Test Comment").unwrap();
    assert_eq!(tokens.len(), 1);
    assert!(tokens[0].is_eof());
    assert_eq!((tokens[0].line, tokens[0].column), (1, 16));
}

#[test]
fn string_literals_keep_escapes_in_text() {
    let tokens = tokenize(r"'it''s' 'a\'b'").unwrap();
    assert_eq!(tokens[0].text, "'it''s'");
    assert_eq!(tokens[0].string_value().as_deref(), Some("it's"));
    assert_eq!(tokens[1].string_value().as_deref(), Some("a'b"));
}

#[test]
fn quoted_identifiers() {
    let tokens = tokenize("`order` \"my col\"").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].text, "order");
    assert_eq!(tokens[1].text, "my col");
}

#[test]
fn operators_and_punctuation() {
    assert_eq!(
        kinds("= <> != < <= > >= * - ( ) , . ; @"),
        vec![
            TokenKind::Operator(Operator::Eq),
            TokenKind::Operator(Operator::NotEq),
            TokenKind::Operator(Operator::NotEq),
            TokenKind::Operator(Operator::Lt),
            TokenKind::Operator(Operator::LtEq),
            TokenKind::Operator(Operator::Gt),
            TokenKind::Operator(Operator::GtEq),
            TokenKind::Operator(Operator::Star),
            TokenKind::Operator(Operator::Minus),
            TokenKind::Punctuation(Punct::LeftParen),
            TokenKind::Punctuation(Punct::RightParen),
            TokenKind::Punctuation(Punct::Comma),
            TokenKind::Punctuation(Punct::Dot),
            TokenKind::Punctuation(Punct::Semicolon),
            TokenKind::Punctuation(Punct::Unknown('@')),
            TokenKind::EndOfInput,
        ]
    );
}

#[test]
fn unterminated_string_is_a_lex_error() {
    let err = tokenize("SELECT 'abc").unwrap_err();
    assert_eq!((err.line, err.column), (1, 8));
}
