//! The read-only schema capability consulted during compilation.

use serde::{Deserialize, Serialize};

/// A foreign key from a column of one table to a column of another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Referencing column.
    pub column: String,
    /// Referenced table.
    pub foreign_table: String,
    /// Referenced column.
    pub foreign_column: String,
}

impl ForeignKey {
    /// Creates a new foreign key.
    #[must_use]
    pub fn new(
        column: impl Into<String>,
        foreign_table: impl Into<String>,
        foreign_column: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            foreign_table: foreign_table.into(),
            foreign_column: foreign_column.into(),
        }
    }
}

/// Table, column and foreign-key metadata.
///
/// The compiler only borrows a catalog for the duration of one call and
/// never mutates it.
pub trait SchemaCatalog {
    /// Returns true if `name` is a known table.
    fn is_table(&self, name: &str) -> bool;

    /// Returns true if `table` has a column called `name`.
    fn is_column(&self, table: &str, name: &str) -> bool;

    /// Returns the primary-key column of `table`.
    fn primary_key(&self, table: &str) -> Option<String>;

    /// Returns the foreign keys declared on `table`.
    fn foreign_keys(&self, table: &str) -> Vec<ForeignKey>;

    /// Returns the columns of `table` in declaration order.
    fn columns(&self, table: &str) -> Vec<String>;

    /// Returns true if the database fills `column` when it is omitted.
    fn has_default(&self, _table: &str, _column: &str) -> bool {
        false
    }
}
