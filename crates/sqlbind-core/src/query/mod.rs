//! Bound queries produced by the compiler.
//!
//! Every identifier in a bound query is qualified (`table.column`, or
//! `alias.column` when the table has an alias) and every table has been
//! checked against the schema. A query owns all of its data and does not
//! borrow from the AST or the schema it was compiled from.

mod display;

use crate::ast::{
    Assignment, ColumnRef, Expr, JoinClause, Leaf, Limit, SelectAst, SetFunctionCall,
    SortDirection, TableRef,
};

/// A plain SELECT.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Select {
    /// Whether DISTINCT was specified.
    pub distinct: bool,
    /// Plain columns; empty together with `set_functions` means `*`.
    pub columns: Vec<ColumnRef>,
    /// Aggregate calls of the select list.
    pub set_functions: Vec<SetFunctionCall>,
    /// Every table of the FROM list, in order.
    pub tables: Vec<TableRef>,
    /// One entry per table after the first, natural join conditions filled
    /// in.
    pub joins: Vec<JoinClause>,
    /// WHERE clause.
    pub where_expr: Option<Expr>,
    /// GROUP BY columns.
    pub group_by: Vec<String>,
    /// ORDER BY keys; output aliases stay unqualified.
    pub sort_order: Vec<(String, SortDirection)>,
    /// LIMIT clause.
    pub limit: Option<Limit>,
}

/// A SELECT whose only output is a single `count(...)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectCount {
    /// Whether DISTINCT was specified on the statement.
    pub distinct: bool,
    /// The count call.
    pub count: SetFunctionCall,
    /// Every table of the FROM list, in order.
    pub tables: Vec<TableRef>,
    /// Joins, as for [`Select`].
    pub joins: Vec<JoinClause>,
    /// WHERE clause.
    pub where_expr: Option<Expr>,
}

/// A SELECT that only asks whether a matching row exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectExist {
    /// Every table of the FROM list, in order.
    pub tables: Vec<TableRef>,
    /// Joins, as for [`Select`].
    pub joins: Vec<JoinClause>,
    /// WHERE clause.
    pub where_expr: Option<Expr>,
}

/// A single-row INSERT.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Insert {
    /// Target table.
    pub table: String,
    /// Target columns, always explicit.
    pub columns: Vec<String>,
    /// One value per column.
    pub values: Vec<Leaf>,
}

/// An UPDATE of one table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Update {
    /// Target table and its alias.
    pub table: TableRef,
    /// SET assignments; columns are bare names of the target table.
    pub assignments: Vec<Assignment>,
    /// WHERE clause.
    pub where_expr: Option<Expr>,
}

/// A DELETE from one table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Delete {
    /// Target table.
    pub table: String,
    /// WHERE clause.
    pub where_expr: Option<Expr>,
}

/// A compiled statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Query {
    /// Plain SELECT.
    Select(Select),
    /// `SELECT count(...)`.
    SelectCount(SelectCount),
    /// Existence check.
    SelectExist(SelectExist),
    /// INSERT.
    Insert(Insert),
    /// UPDATE.
    Update(Update),
    /// DELETE.
    Delete(Delete),
}

impl Query {
    /// Returns the name of the query kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Select(_) => "select",
            Self::SelectCount(_) => "select_count",
            Self::SelectExist(_) => "select_exist",
            Self::Insert(_) => "insert",
            Self::Update(_) => "update",
            Self::Delete(_) => "delete",
        }
    }

    /// Renders the query as canonical SQL.
    ///
    /// The rendering is deterministic, and compiling it again against the
    /// same schema yields an equal query.
    #[must_use]
    pub fn to_sql(&self) -> String {
        self.to_string()
    }
}

impl From<Select> for SelectAst {
    fn from(select: Select) -> Self {
        Self {
            distinct: select.distinct,
            columns: select.columns,
            set_functions: select.set_functions,
            tables: select.tables,
            joins: select.joins,
            where_expr: select.where_expr,
            group_by: select.group_by,
            sort_order: select.sort_order,
            limit: select.limit,
        }
    }
}
