//! Compiler error types.

use thiserror::Error;

/// A semantic error found while binding a statement to a schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum CompileError {
    /// A table that the schema does not know.
    #[error("Table '{table}' does not exist")]
    TableNotFound {
        /// The table name.
        table: String,
    },

    /// A column that none of the candidate tables has.
    #[error("Column '{column}' not found in {}", table_list(.tables))]
    ColumnNotFound {
        /// The column as written.
        column: String,
        /// The tables that were searched.
        tables: Vec<String>,
    },

    /// A bare column present in more than one table of the FROM list.
    #[error("Column '{column}' is ambiguous between {}", table_list(.tables))]
    AmbiguousColumn {
        /// The column as written.
        column: String,
        /// The tables that have it.
        tables: Vec<String>,
    },

    /// A qualifier that is neither an alias nor a table of the statement.
    #[error("'{alias}' is neither a table nor an alias of the statement")]
    DanglingAlias {
        /// The qualifier.
        alias: String,
    },

    /// The same table name or alias declared twice in one FROM list.
    #[error("Table or alias '{name}' is declared more than once")]
    DuplicateTable {
        /// The repeated name.
        name: String,
    },

    /// A join without a condition relating the joined table to another one.
    #[error("Join with '{table}' has no condition relating it to another table")]
    AccidentalCrossJoin {
        /// The joined table, as written.
        table: String,
    },

    /// A natural join between tables without a foreign key between them.
    #[error("No foreign key relates '{table}' to the tables before it")]
    NoForeignKeyRelation {
        /// The joined table.
        table: String,
    },

    /// A construct the compiler recognizes but does not support.
    #[error("{construct} is not supported")]
    NotSupported {
        /// Description of the construct.
        construct: String,
    },

    /// A primary- or foreign-key column left empty without a default.
    #[error("Column '{column}' of '{table}' is required and has no default")]
    MissingRequiredField {
        /// The table.
        table: String,
        /// The column.
        column: String,
    },

    /// More values than target columns, or the other way round.
    #[error("{values} values supplied for {columns} columns")]
    ValueCountMismatch {
        /// Number of target columns.
        columns: usize,
        /// Number of values.
        values: usize,
    },

    /// Subqueries or groups nested beyond the configured depth.
    #[error("Statement is nested deeper than {max_depth} levels")]
    TooDeeplyNested {
        /// The configured limit.
        max_depth: usize,
    },
}

impl CompileError {
    /// Returns a stable reason code for the error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::TableNotFound { .. } => "table_not_found",
            Self::ColumnNotFound { .. } => "column_not_found",
            Self::AmbiguousColumn { .. } => "ambiguous_column",
            Self::DanglingAlias { .. } => "dangling_alias",
            Self::DuplicateTable { .. } => "duplicate_table",
            Self::AccidentalCrossJoin { .. } => "accidental_cross_join",
            Self::NoForeignKeyRelation { .. } => "no_foreign_key_relation",
            Self::NotSupported { .. } => "not_supported",
            Self::MissingRequiredField { .. } => "missing_required_field",
            Self::ValueCountMismatch { .. } => "value_count_mismatch",
            Self::TooDeeplyNested { .. } => "too_deeply_nested",
        }
    }

    pub(crate) fn not_supported(construct: impl Into<String>) -> Self {
        Self::NotSupported {
            construct: construct.into(),
        }
    }
}

fn table_list(tables: &[String]) -> String {
    if tables.is_empty() {
        return String::from("the statement");
    }
    tables
        .iter()
        .map(|t| format!("'{t}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
