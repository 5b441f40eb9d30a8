//! Schema-aware semantic compiler.
//!
//! Binds a parsed statement to a [`SchemaCatalog`](crate::schema::SchemaCatalog):
//! every table is checked, every column is qualified with the table or alias
//! it belongs to, and joins are checked for a condition relating the tables.

#[allow(clippy::module_inception)]
mod compiler;
mod error;
mod join;
mod scope;

pub use compiler::{Compiler, CompilerConfig, compile};
pub use error::CompileError;
