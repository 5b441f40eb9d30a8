//! SQL statement AST types.

use super::expression::{Expr, Leaf, SetFunctionCall};

/// Sort direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// How a table enters the FROM list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    /// `FROM a, b`: no condition of its own.
    Cross,
    /// `[INNER] JOIN ... ON`.
    Inner,
    /// `LEFT [OUTER] JOIN ... ON`.
    LeftOuter,
    /// `NATURAL JOIN`: condition synthesized from foreign keys.
    Natural,
    /// `RIGHT [OUTER] JOIN ... ON`, parsed but not supported.
    Right,
    /// `FULL [OUTER] JOIN ... ON`, parsed but not supported.
    Full,
    /// Explicit `CROSS JOIN`, parsed but not supported.
    CrossJoin,
}

impl JoinKind {
    /// Returns the SQL keyword sequence introducing the join.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cross => ",",
            Self::Inner => "INNER JOIN",
            Self::LeftOuter => "LEFT JOIN",
            Self::Natural => "NATURAL JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
            Self::CrossJoin => "CROSS JOIN",
        }
    }

    /// Returns true if the join is written with an ON clause.
    #[must_use]
    pub const fn takes_condition(&self) -> bool {
        matches!(self, Self::Inner | Self::LeftOuter | Self::Right | Self::Full)
    }
}

/// A table in the FROM list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRef {
    /// Table name.
    pub name: String,
    /// Alias.
    pub alias: Option<String>,
}

impl TableRef {
    /// Creates a table reference without alias.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    /// Adds an alias to this table reference.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Returns the name columns are qualified with: the alias if any.
    #[must_use]
    pub fn visible_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// A join of one more table onto the FROM list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JoinClause {
    /// The joined table.
    pub table: String,
    /// Alias of the joined table.
    pub alias: Option<String>,
    /// The kind of join.
    pub join_kind: JoinKind,
    /// The ON condition; `None` for comma and explicit cross joins, and for
    /// natural joins until compilation synthesizes one.
    pub condition: Option<Expr>,
}

impl JoinClause {
    /// Returns the joined table as a table reference.
    #[must_use]
    pub fn table_ref(&self) -> TableRef {
        TableRef {
            name: self.table.clone(),
            alias: self.alias.clone(),
        }
    }
}

/// A column in the select list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    /// The selected value: a column name, a literal or a subquery.
    pub expr: Leaf,
    /// Output name (`AS name`).
    pub alias: Option<String>,
}

impl ColumnRef {
    /// Creates a column reference to a named column.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            expr: Leaf::Ident(name.into()),
            alias: None,
        }
    }

    /// Creates a select column with an alias.
    #[must_use]
    pub fn with_alias(expr: Leaf, alias: impl Into<String>) -> Self {
        Self {
            expr,
            alias: Some(alias.into()),
        }
    }
}

/// LIMIT clause: rows to skip and rows to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Limit {
    /// Rows to skip.
    pub offset: u32,
    /// Rows to return.
    pub length: u32,
}

impl Limit {
    /// Creates a new limit.
    #[must_use]
    pub const fn new(offset: u32, length: u32) -> Self {
        Self { offset, length }
    }
}

/// A SELECT statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SelectAst {
    /// Whether DISTINCT was specified.
    pub distinct: bool,
    /// Plain columns; empty together with `set_functions` means `*`.
    pub columns: Vec<ColumnRef>,
    /// Aggregate calls of the select list.
    pub set_functions: Vec<SetFunctionCall>,
    /// Every table of the FROM list, joined ones included, in order.
    pub tables: Vec<TableRef>,
    /// One entry per table after the first.
    pub joins: Vec<JoinClause>,
    /// WHERE clause.
    pub where_expr: Option<Expr>,
    /// GROUP BY columns.
    pub group_by: Vec<String>,
    /// ORDER BY columns.
    pub sort_order: Vec<(String, SortDirection)>,
    /// LIMIT clause.
    pub limit: Option<Limit>,
}

/// An INSERT statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InsertAst {
    /// Table name.
    pub table: String,
    /// Column names; empty when omitted.
    pub columns: Vec<String>,
    /// Value tuples as written.
    pub values: Vec<Vec<Leaf>>,
}

/// An assignment in UPDATE SET.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Assignment {
    /// Column name.
    pub column: String,
    /// Value.
    pub value: Leaf,
}

/// An UPDATE statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UpdateAst {
    /// Table name.
    pub table: String,
    /// Alias.
    pub alias: Option<String>,
    /// SET assignments.
    pub assignments: Vec<Assignment>,
    /// WHERE clause.
    pub where_expr: Option<Expr>,
}

/// A DELETE statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeleteAst {
    /// Table name.
    pub table: String,
    /// WHERE clause.
    pub where_expr: Option<Expr>,
}

/// A parsed SQL statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ast {
    /// SELECT statement.
    Select(SelectAst),
    /// INSERT statement.
    Insert(InsertAst),
    /// UPDATE statement.
    Update(UpdateAst),
    /// DELETE statement.
    Delete(DeleteAst),
}

impl Ast {
    /// Returns the statement keyword.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Select(_) => "SELECT",
            Self::Insert(_) => "INSERT",
            Self::Update(_) => "UPDATE",
            Self::Delete(_) => "DELETE",
        }
    }
}
