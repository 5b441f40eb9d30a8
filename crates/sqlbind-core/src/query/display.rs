//! Canonical SQL rendering of bound queries.

use core::fmt::{self, Display, Formatter};
use core::slice;

use super::{Delete, Insert, Query, Select, SelectCount, SelectExist, Update};
use crate::ast::{ColumnRef, Leaf, Limit, SelectView, quote_identifier};

impl<'a> From<&'a Select> for SelectView<'a> {
    fn from(select: &'a Select) -> Self {
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

impl Display for Select {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&SelectView::from(self), f)
    }
}

impl Display for SelectCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let view = SelectView {
            distinct: self.distinct,
            columns: &[],
            set_functions: slice::from_ref(&self.count),
            tables: &self.tables,
            joins: &self.joins,
            where_expr: self.where_expr.as_ref(),
            group_by: &[],
            sort_order: &[],
            limit: None,
        };
        Display::fmt(&view, f)
    }
}

impl Display for SelectExist {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let one = [ColumnRef {
            expr: Leaf::IntVal(1),
            alias: None,
        }];
        let view = SelectView {
            distinct: false,
            columns: &one,
            set_functions: &[],
            tables: &self.tables,
            joins: &self.joins,
            where_expr: self.where_expr.as_ref(),
            group_by: &[],
            sort_order: &[],
            limit: Some(Limit::new(0, 1)),
        };
        Display::fmt(&view, f)
    }
}

impl Display for Insert {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let columns: Vec<String> = self.columns.iter().map(|c| quote_identifier(c)).collect();
        let values: Vec<String> = self.values.iter().map(ToString::to_string).collect();
        write!(
            f,
            "INSERT INTO {} ({}) VALUES ({})",
            quote_identifier(&self.table),
            columns.join(", "),
            values.join(", ")
        )
    }
}

impl Display for Update {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let assignments: Vec<String> = self.assignments.iter().map(ToString::to_string).collect();
        write!(f, "UPDATE {} SET {}", self.table, assignments.join(", "))?;
        if let Some(expr) = &self.where_expr {
            write!(f, " WHERE {expr}")?;
        }
        Ok(())
    }
}

impl Display for Delete {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "DELETE FROM {}", quote_identifier(&self.table))?;
        if let Some(expr) = &self.where_expr {
            write!(f, " WHERE {expr}")?;
        }
        Ok(())
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(q) => Display::fmt(q, f),
            Self::SelectCount(q) => Display::fmt(q, f),
            Self::SelectExist(q) => Display::fmt(q, f),
            Self::Insert(q) => Display::fmt(q, f),
            Self::Update(q) => Display::fmt(q, f),
            Self::Delete(q) => Display::fmt(q, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Assignment, Expr, SetFunctionCall, TableRef};

    #[test]
    fn test_select_count_display() {
        let query = Query::SelectCount(SelectCount {
            distinct: false,
            count: SetFunctionCall::count_all(),
            tables: vec![TableRef::new("t")],
            joins: vec![],
            where_expr: Some(Expr::ident("t.a").gt(Expr::int(3))),
        });
        assert_eq!(query.to_sql(), "SELECT COUNT(*) FROM t WHERE t.a > 3");
    }

    #[test]
    fn test_select_exist_display() {
        let query = Query::SelectExist(SelectExist {
            tables: vec![TableRef::new("t")],
            joins: vec![],
            where_expr: Some(Expr::ident("t.id").eq(Expr::int(7))),
        });
        assert_eq!(query.to_sql(), "SELECT 1 FROM t WHERE t.id = 7 LIMIT 1");
    }

    #[test]
    fn test_insert_display() {
        let query = Query::Insert(Insert {
            table: String::from("t"),
            columns: vec![String::from("id"), String::from("name")],
            values: vec![Leaf::IntVal(1), Leaf::TextVal(String::from("it's"))],
        });
        assert_eq!(query.to_sql(), "INSERT INTO t (id, name) VALUES (1, 'it''s')");
    }

    #[test]
    fn test_update_display_keeps_alias() {
        let query = Query::Update(Update {
            table: TableRef::new("t").alias("x"),
            assignments: vec![Assignment {
                column: String::from("name"),
                value: Leaf::Null,
            }],
            where_expr: Some(Expr::ident("x.id").eq(Expr::int(1))),
        });
        assert_eq!(query.to_sql(), "UPDATE t AS x SET name = NULL WHERE x.id = 1");
    }

    #[test]
    fn test_delete_display() {
        let query = Query::Delete(Delete {
            table: String::from("t"),
            where_expr: None,
        });
        assert_eq!(query.to_sql(), "DELETE FROM t");
        assert_eq!(query.kind(), "delete");
    }
}
