//! Abstract Syntax Tree (AST) types for SQL statements.

mod display;
mod expression;
mod statement;

pub(crate) use display::SelectView;
pub use display::{quote_identifier, quote_text};
pub use expression::{CompareOp, Expr, Leaf, LogicalOp, SetFunctionArg, SetFunctionCall};
pub use statement::{
    Assignment, Ast, ColumnRef, DeleteAst, InsertAst, JoinClause, JoinKind, Limit, SelectAst,
    SortDirection, TableRef, UpdateAst,
};
