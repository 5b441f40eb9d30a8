//! Schema metadata.
//!
//! [`SchemaCatalog`] is the capability the compiler consults; [`Schema`] is an
//! in-memory implementation built with a builder API or read from JSON.

mod catalog;
mod table;

pub use catalog::{ForeignKey, SchemaCatalog};
pub use table::{ColumnSchema, Schema, TableSchema};
