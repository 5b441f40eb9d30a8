//! Canonical SQL rendering of the AST.
//!
//! The output is deterministic: keywords upper case, one space between
//! tokens, identifiers quoted only when they would not lex back as the same
//! identifier. Parsing the output yields the same tree.

use core::fmt::{self, Display, Formatter};

use super::{
    Assignment, Ast, ColumnRef, CompareOp, DeleteAst, Expr, InsertAst, JoinClause, JoinKind, Leaf,
    Limit, SelectAst, SetFunctionArg, SetFunctionCall, SortDirection, TableRef, UpdateAst,
};
use crate::lexer::Keyword;

/// Quotes a possibly dotted identifier where needed.
///
/// ```
/// use sqlbind_core::ast::quote_identifier;
///
/// assert_eq!(quote_identifier("users.id"), "users.id");
/// assert_eq!(quote_identifier("order"), "`order`");
/// ```
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    name.split('.')
        .map(quote_part)
        .collect::<Vec<_>>()
        .join(".")
}

fn quote_part(part: &str) -> String {
    let plain = part
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && part.chars().all(|c| c.is_alphanumeric() || c == '_')
        && Keyword::from_str(part).is_none();
    if plain {
        part.to_string()
    } else {
        format!("`{}`", part.replace('`', "``"))
    }
}

/// Renders a string value as a single-quoted SQL literal.
#[must_use]
pub fn quote_text(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "''"))
}

fn write_list<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl Display for SetFunctionCall {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name.to_ascii_uppercase())?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        let args: Vec<String> = match &self.arg {
            SetFunctionArg::Single(name) => vec![quote_identifier(name)],
            SetFunctionArg::List(names) => names
                .iter()
                .map(|n| {
                    if n == "*" {
                        n.clone()
                    } else {
                        quote_identifier(n)
                    }
                })
                .collect(),
        };
        write!(f, "{})", args.join(", "))
    }
}

impl Display for Leaf {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(name) => f.write_str(&quote_identifier(name)),
            Self::IntVal(n) => write!(f, "{n}"),
            Self::FloatVal(text) => f.write_str(text),
            Self::TextVal(value) => f.write_str(&quote_text(value)),
            Self::Null => f.write_str("NULL"),
            Self::Command(select) => write!(f, "({select})"),
            Self::ValueList(items) => {
                f.write_str("(")?;
                write_list(f, items)?;
                f.write_str(")")
            }
            Self::SetFunction(call) => write!(f, "{call}"),
        }
    }
}

/// Binding strength of a rendered node, used to decide where parentheses
/// are needed for trees that were not produced by the parser.
const fn strength(expr: &Expr) -> u8 {
    match expr {
        Expr::Logical { op, .. } => op.precedence(),
        Expr::Comparison { .. } => 3,
        Expr::Subclause { .. } | Expr::Leaf(_) => 4,
    }
}

fn write_operand(f: &mut Formatter<'_>, expr: &Expr, needs_parens: bool) -> fmt::Result {
    if needs_parens {
        write!(f, "({expr})")
    } else {
        write!(f, "{expr}")
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comparison {
                left,
                op,
                negated,
                right,
            } => {
                write_operand(f, left, strength(left) <= 3)?;
                match (op, negated) {
                    (CompareOp::Is, true) => f.write_str(" IS NOT ")?,
                    (CompareOp::In, true) => f.write_str(" NOT IN ")?,
                    _ => write!(f, " {} ", op.as_str())?,
                }
                write_operand(f, right, strength(right) <= 3)
            }
            Self::Logical { .. } => {
                // Left-nested chains are collected first and written in a
                // loop. The walk stops at a left operand that needs
                // parentheses.
                let mut spine = Vec::new();
                let mut node = self;
                let mut parent = 0;
                while let Self::Logical { left, op, right } = node {
                    spine.push((*op, &**right));
                    parent = op.precedence();
                    node = &**left;
                    if strength(node) < parent {
                        break;
                    }
                }
                write_operand(f, node, strength(node) < parent)?;
                for (op, right) in spine.into_iter().rev() {
                    write!(f, " {} ", op.as_str())?;
                    write_operand(f, right, strength(right) <= op.precedence())?;
                }
                Ok(())
            }
            Self::Subclause { inner } => write!(f, "({inner})"),
            Self::Leaf(leaf) => write!(f, "{leaf}"),
        }
    }
}

impl Display for TableRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&quote_identifier(&self.name))?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {}", quote_identifier(alias))?;
        }
        Ok(())
    }
}

impl Display for JoinClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let table = self.table_ref();
        match self.join_kind {
            JoinKind::Cross => write!(f, ", {table}"),
            JoinKind::Natural | JoinKind::CrossJoin => {
                write!(f, " {} {table}", self.join_kind.as_str())
            }
            kind => {
                write!(f, " {} {table}", kind.as_str())?;
                if let Some(condition) = &self.condition {
                    write!(f, " ON {condition}")?;
                }
                Ok(())
            }
        }
    }
}

impl Display for ColumnRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {}", quote_identifier(alias))?;
        }
        Ok(())
    }
}

/// A borrowed view of the parts of a SELECT, shared by the AST and the
/// compiled query model so both render identically.
pub(crate) struct SelectView<'a> {
    pub distinct: bool,
    pub columns: &'a [ColumnRef],
    pub set_functions: &'a [SetFunctionCall],
    pub tables: &'a [TableRef],
    pub joins: &'a [JoinClause],
    pub where_expr: Option<&'a Expr>,
    pub group_by: &'a [String],
    pub sort_order: &'a [(String, SortDirection)],
    pub limit: Option<Limit>,
}

impl Display for SelectView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }

        let mut items: Vec<String> = self.columns.iter().map(ToString::to_string).collect();
        items.extend(self.set_functions.iter().map(|call| match &call.alias {
            Some(alias) => format!("{call} AS {}", quote_identifier(alias)),
            None => call.to_string(),
        }));
        if items.is_empty() {
            f.write_str("*")?;
        } else {
            f.write_str(&items.join(", "))?;
        }

        if let Some(first) = self.tables.first() {
            write!(f, " FROM {first}")?;
            for join in self.joins {
                write!(f, "{join}")?;
            }
        }

        if let Some(expr) = self.where_expr {
            write!(f, " WHERE {expr}")?;
        }

        if !self.group_by.is_empty() {
            let names: Vec<String> = self.group_by.iter().map(|g| quote_identifier(g)).collect();
            write!(f, " GROUP BY {}", names.join(", "))?;
        }

        if !self.sort_order.is_empty() {
            let keys: Vec<String> = self
                .sort_order
                .iter()
                .map(|(name, direction)| match direction {
                    SortDirection::Asc => quote_identifier(name),
                    SortDirection::Desc => format!("{} DESC", quote_identifier(name)),
                })
                .collect();
            write!(f, " ORDER BY {}", keys.join(", "))?;
        }

        if let Some(limit) = self.limit {
            write!(f, " LIMIT {}", limit.length)?;
            if limit.offset > 0 {
                write!(f, " OFFSET {}", limit.offset)?;
            }
        }
        Ok(())
    }
}

impl<'a> From<&'a SelectAst> for SelectView<'a> {
    fn from(select: &'a SelectAst) -> Self {
        Self {
            distinct: select.distinct,
            columns: &select.columns,
            set_functions: &select.set_functions,
            tables: &select.tables,
            joins: &select.joins,
            where_expr: select.where_expr.as_ref(),
            group_by: &select.group_by,
            sort_order: &select.sort_order,
            limit: select.limit,
        }
    }
}

impl Display for SelectAst {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&SelectView::from(self), f)
    }
}

impl Display for InsertAst {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "INSERT INTO {}", quote_identifier(&self.table))?;
        if !self.columns.is_empty() {
            let names: Vec<String> = self.columns.iter().map(|c| quote_identifier(c)).collect();
            write!(f, " ({})", names.join(", "))?;
        }
        f.write_str(" VALUES ")?;
        for (i, row) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str("(")?;
            write_list(f, row)?;
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", quote_identifier(&self.column), self.value)
    }
}

impl Display for UpdateAst {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "UPDATE {}", quote_identifier(&self.table))?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {}", quote_identifier(alias))?;
        }
        f.write_str(" SET ")?;
        write_list(f, &self.assignments)?;
        if let Some(expr) = &self.where_expr {
            write!(f, " WHERE {expr}")?;
        }
        Ok(())
    }
}

impl Display for DeleteAst {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "DELETE FROM {}", quote_identifier(&self.table))?;
        if let Some(expr) = &self.where_expr {
            write!(f, " WHERE {expr}")?;
        }
        Ok(())
    }
}

impl Display for Ast {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(s) => Display::fmt(s, f),
            Self::Insert(i) => Display::fmt(i, f),
            Self::Update(u) => Display::fmt(u, f),
            Self::Delete(d) => Display::fmt(d, f),
        }
    }
}
