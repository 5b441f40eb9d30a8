//! SQL Parser
//!
//! A hand-written recursive descent parser with Pratt parsing for the
//! `AND`/`OR` connectives. Comparisons and their negation flags are built by
//! [`build_node`].

mod error;
#[allow(clippy::module_inception)]
mod parser;
mod pratt;
mod tree;

pub use error::{ParseError, ParseErrorKind};
pub use parser::{Parser, ParserConfig, parse_statement};
pub use tree::build_node;
