//! # sqlbind-core
//!
//! A SQL front end: a tokenizer, a recursive descent parser and a
//! schema-aware compiler that binds statements to a catalog.
//!
//! This crate provides:
//! - A hand-written lexer producing tokens with line/column positions
//! - A recursive descent parser with Pratt parsing for `AND`/`OR`
//! - A semantic compiler that qualifies every column and rejects
//!   accidental cross joins
//! - A bound query model that renders back to canonical SQL
//!
//! ## Parsing
//!
//! ```rust
//! use sqlbind_core::ast::Ast;
//! use sqlbind_core::parse;
//!
//! let ast = parse("SELECT a, b FROM t WHERE a = 1").unwrap();
//! assert!(matches!(ast, Ast::Select(_)));
//! ```
//!
//! ## Compiling against a schema
//!
//! ```rust
//! use sqlbind_core::schema::{ColumnSchema, Schema, TableSchema};
//! use sqlbind_core::{Query, compile, parse};
//!
//! let schema = Schema::new().table(
//!     TableSchema::new("dog")
//!         .column(ColumnSchema::new("id").primary_key())
//!         .column(ColumnSchema::new("cat")),
//! );
//!
//! let query = compile(parse("select * from dog where cat <> 4").unwrap(), &schema).unwrap();
//! assert!(matches!(query, Query::Select(_)));
//! assert_eq!(query.to_sql(), "SELECT * FROM dog WHERE dog.cat <> 4");
//! ```

pub mod ast;
pub mod compiler;
pub mod lexer;
pub mod parser;
pub mod query;
pub mod schema;

pub use ast::{Ast, Expr, Leaf};
pub use compiler::{CompileError, Compiler, CompilerConfig, compile};
pub use lexer::{LexError, Lexer, Token, TokenKind, tokenize};
pub use parser::{ParseError, ParseErrorKind, Parser, ParserConfig};
pub use query::Query;
pub use schema::{Schema, SchemaCatalog};

/// Tokenizes and parses one statement.
///
/// # Errors
///
/// Returns a `ParseError` if the input does not tokenize or is not a
/// supported statement.
pub fn parse(sql: &str) -> Result<Ast, ParseError> {
    parse_with_config(sql, ParserConfig::default())
}

/// Tokenizes and parses one statement with explicit parser settings.
///
/// # Errors
///
/// Returns a `ParseError` if the input does not tokenize or is not a
/// supported statement.
pub fn parse_with_config(sql: &str, config: ParserConfig) -> Result<Ast, ParseError> {
    let tokens = tokenize(sql)?;
    Parser::with_config(tokens, config).parse_statement()
}
