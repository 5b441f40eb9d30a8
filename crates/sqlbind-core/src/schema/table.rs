//! In-memory schema catalog.

use serde::{Deserialize, Serialize};

use super::catalog::{ForeignKey, SchemaCatalog};

/// Schema definition for a column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Column name.
    pub name: String,
    /// Whether this column is the primary key.
    #[serde(default)]
    pub primary_key: bool,
    /// Whether this column auto-increments.
    #[serde(default)]
    pub auto_increment: bool,
    /// Default value as SQL text.
    #[serde(default)]
    pub default: Option<String>,
}

impl ColumnSchema {
    /// Creates a new column schema.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary_key: false,
            auto_increment: false,
            default: None,
        }
    }

    /// Sets the column as the primary key.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Sets the column to auto-increment.
    #[must_use]
    pub const fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Returns true if the database fills the column when it is omitted.
    #[must_use]
    pub const fn has_default(&self) -> bool {
        self.auto_increment || self.default.is_some()
    }
}

/// Schema definition for a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name.
    pub name: String,
    /// Column definitions, in declaration order.
    pub columns: Vec<ColumnSchema>,
    /// Foreign key definitions.
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,
}

impl TableSchema {
    /// Creates a new table schema.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    /// Adds a column to the table.
    #[must_use]
    pub fn column(mut self, column: ColumnSchema) -> Self {
        self.columns.push(column);
        self
    }

    /// Adds a foreign key from `column` to `foreign_table.foreign_column`.
    #[must_use]
    pub fn foreign_key(
        mut self,
        column: impl Into<String>,
        foreign_table: impl Into<String>,
        foreign_column: impl Into<String>,
    ) -> Self {
        self.foreign_keys
            .push(ForeignKey::new(column, foreign_table, foreign_column));
        self
    }

    /// Gets a column by name.
    #[must_use]
    pub fn get_column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// A set of tables, usable as a [`SchemaCatalog`].
///
/// ```
/// use sqlbind_core::schema::{ColumnSchema, Schema, SchemaCatalog, TableSchema};
///
/// let schema = Schema::new().table(
///     TableSchema::new("users")
///         .column(ColumnSchema::new("id").primary_key().auto_increment())
///         .column(ColumnSchema::new("name")),
/// );
/// assert!(schema.is_column("users", "name"));
/// assert_eq!(schema.primary_key("users").as_deref(), Some("id"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// All tables.
    pub tables: Vec<TableSchema>,
}

impl Schema {
    /// Creates a new empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table to the schema.
    #[must_use]
    pub fn table(mut self, table: TableSchema) -> Self {
        self.tables.push(table);
        self
    }

    /// Gets a table by name.
    #[must_use]
    pub fn get_table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Reads a schema from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if `json` is not a valid schema.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Writes the schema as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl SchemaCatalog for Schema {
    fn is_table(&self, name: &str) -> bool {
        self.get_table(name).is_some()
    }

    fn is_column(&self, table: &str, name: &str) -> bool {
        self.get_table(table)
            .is_some_and(|t| t.get_column(name).is_some())
    }

    fn primary_key(&self, table: &str) -> Option<String> {
        self.get_table(table)?
            .columns
            .iter()
            .find(|c| c.primary_key)
            .map(|c| c.name.clone())
    }

    fn foreign_keys(&self, table: &str) -> Vec<ForeignKey> {
        self.get_table(table)
            .map(|t| t.foreign_keys.clone())
            .unwrap_or_default()
    }

    fn columns(&self, table: &str) -> Vec<String> {
        self.get_table(table)
            .map(|t| t.columns.iter().map(|c| c.name.clone()).collect())
            .unwrap_or_default()
    }

    fn has_default(&self, table: &str, column: &str) -> bool {
        self.get_table(table)
            .and_then(|t| t.get_column(column))
            .is_some_and(ColumnSchema::has_default)
    }
}
