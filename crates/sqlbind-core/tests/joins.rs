//! Tests for join compilation.

mod common;
use common::*;

use sqlbind_core::ast::{ColumnRef, Expr, JoinKind};
use sqlbind_core::query::Select;
use sqlbind_core::{CompileError, Query};

fn compile_select(sql: &str) -> Select {
    match compile_ok(sql) {
        Query::Select(select) => select,
        other => panic!("Expected a select, got {other:?}"),
    }
}

#[test]
fn inner_join_qualifies_columns() {
    let select = compile_select("select x, d from b inner join c on b.a = c.a");
    assert_eq!(select.columns, vec![ColumnRef::named("b.x"), ColumnRef::named("c.d")]);
    assert_eq!(select.joins[0].join_kind, JoinKind::Inner);
    assert_eq!(
        select.joins[0].condition,
        Some(Expr::ident("b.a").eq(Expr::ident("c.a")))
    );
}

#[test]
fn shared_column_is_ambiguous() {
    let err = compile_err("select a, d from b inner join c on b.a = c.a");
    assert_eq!(
        err,
        CompileError::AmbiguousColumn {
            column: String::from("a"),
            tables: vec![String::from("b"), String::from("c")],
        }
    );
    assert_eq!(err.to_string(), "Column 'a' is ambiguous between 'b', 'c'");
}

#[test]
fn self_referencing_condition_is_an_accidental_cross_join() {
    let err = compile_err("SELECT * FROM ft JOIN t ON ft.ftid = ft.ftid");
    assert_eq!(
        err,
        CompileError::AccidentalCrossJoin {
            table: String::from("t"),
        }
    );
}

#[test]
fn condition_without_column_comparison_is_rejected() {
    let err = compile_err("SELECT * FROM users JOIN orders ON orders.total = 3");
    assert!(matches!(err, CompileError::AccidentalCrossJoin { .. }));
}

#[test]
fn correlating_comparison_may_sit_inside_and() {
    compile_ok(
        "SELECT * FROM users JOIN orders ON orders.total > 3 AND (orders.user_id = users.id)",
    );
}

#[test]
fn correlating_comparison_under_or_does_not_count() {
    let err = compile_err(
        "SELECT * FROM users JOIN orders ON orders.user_id = users.id OR orders.total > 3",
    );
    assert!(matches!(err, CompileError::AccidentalCrossJoin { .. }));
}

#[test]
fn comma_join_needs_a_correlating_where() {
    let err = compile_err("SELECT * FROM ft, t");
    assert_eq!(
        err,
        CompileError::AccidentalCrossJoin {
            table: String::from("t"),
        }
    );

    let select = compile_select("SELECT v FROM ft, t WHERE ft.ftid = t.ftid");
    assert_eq!(select.joins[0].join_kind, JoinKind::Cross);
    assert_eq!(select.joins[0].condition, None);

    let err = compile_err("SELECT v FROM ft, t WHERE ft.ftid = t.ftid OR t.v = 1");
    assert!(matches!(err, CompileError::AccidentalCrossJoin { .. }));
}

#[test]
fn comma_join_must_connect_every_table() {
    let err = compile_err("SELECT dog.name FROM dog, b, c WHERE b.a = c.a");
    assert_eq!(
        err,
        CompileError::AccidentalCrossJoin {
            table: String::from("dog"),
        }
    );

    let err = compile_err("SELECT x FROM b, c, dog WHERE b.a = c.a AND dog.cat = 1");
    assert_eq!(
        err,
        CompileError::AccidentalCrossJoin {
            table: String::from("dog"),
        }
    );

    compile_ok("SELECT dog.name FROM dog, b, c WHERE b.a = c.a AND dog.cat = c.a");
    compile_ok("SELECT v FROM ft JOIN t ON t.ftid = ft.ftid, i WHERE i.id = t.id");
}

#[test]
fn join_condition_cannot_reach_a_later_table() {
    let err = compile_err(
        "SELECT sku FROM users JOIN orders ON orders.id = items.order_id \
         JOIN items ON items.order_id = orders.id",
    );
    assert_eq!(
        err,
        CompileError::DanglingAlias {
            alias: String::from("items"),
        }
    );

    compile_ok(
        "SELECT sku FROM users JOIN orders ON orders.user_id = users.id \
         JOIN items ON items.order_id = orders.id",
    );
}

#[test]
fn join_condition_must_reach_an_earlier_table() {
    let err = compile_err(
        "SELECT o.total FROM orders o \
         WHERE 1 < (SELECT count(*) FROM items JOIN dog ON dog.id = o.id)",
    );
    assert_eq!(
        err,
        CompileError::AccidentalCrossJoin {
            table: String::from("dog"),
        }
    );
}

#[test]
fn left_join() {
    let select = compile_select("SELECT name, total FROM users LEFT JOIN orders ON user_id = users.id");
    assert_eq!(select.joins[0].join_kind, JoinKind::LeftOuter);
    assert_eq!(
        select.joins[0].condition,
        Some(Expr::ident("orders.user_id").eq(Expr::ident("users.id")))
    );
    assert_eq!(
        select.columns,
        vec![ColumnRef::named("users.name"), ColumnRef::named("orders.total")]
    );
}

#[test]
fn aliases_qualify_columns() {
    let select = compile_select("SELECT o.total, name FROM users u JOIN orders o ON o.user_id = u.id");
    assert_eq!(
        select.columns,
        vec![ColumnRef::named("o.total"), ColumnRef::named("u.name")]
    );
}

#[test]
fn table_name_reaches_aliased_table() {
    let select = compile_select("SELECT orders.total FROM users u JOIN orders o ON o.user_id = u.id");
    assert_eq!(select.columns, vec![ColumnRef::named("o.total")]);
}

#[test]
fn self_join_with_aliases() {
    compile_ok("SELECT p.name FROM dog p JOIN dog q ON p.id = q.cat");
}

#[test]
fn duplicate_table_is_rejected() {
    let err = compile_err("SELECT * FROM dog JOIN dog ON dog.id = dog.cat");
    assert_eq!(
        err,
        CompileError::DuplicateTable {
            name: String::from("dog"),
        }
    );
}

#[test]
fn unknown_join_table() {
    let err = compile_err("SELECT * FROM dog JOIN cats ON dog.id = cats.id");
    assert_eq!(
        err,
        CompileError::TableNotFound {
            table: String::from("cats"),
        }
    );
}

#[test]
fn natural_join_synthesizes_foreign_key_condition() {
    let select = compile_select("SELECT v FROM ft NATURAL JOIN t");
    assert_eq!(select.joins[0].join_kind, JoinKind::Natural);
    assert_eq!(
        select.joins[0].condition,
        Some(Expr::ident("t.ftid").eq(Expr::ident("ft.ftid")))
    );

    let select = compile_select("SELECT v FROM t NATURAL JOIN ft");
    assert_eq!(
        select.joins[0].condition,
        Some(Expr::ident("t.ftid").eq(Expr::ident("ft.ftid")))
    );
}

#[test]
fn natural_join_chain() {
    let select = compile_select("SELECT sku FROM users NATURAL JOIN orders NATURAL JOIN items");
    assert_eq!(
        select.joins[0].condition,
        Some(Expr::ident("orders.user_id").eq(Expr::ident("users.id")))
    );
    assert_eq!(
        select.joins[1].condition,
        Some(Expr::ident("items.order_id").eq(Expr::ident("orders.id")))
    );
}

#[test]
fn natural_join_uses_aliases() {
    let select = compile_select("SELECT o.total FROM users u NATURAL JOIN orders o");
    assert_eq!(
        select.joins[0].condition,
        Some(Expr::ident("o.user_id").eq(Expr::ident("u.id")))
    );
}

#[test]
fn natural_join_without_relation_fails() {
    let err = compile_err("SELECT * FROM dog NATURAL JOIN b");
    assert_eq!(
        err,
        CompileError::NoForeignKeyRelation {
            table: String::from("b"),
        }
    );
}

#[test]
fn unsupported_join_kinds() {
    let cases = [
        ("SELECT * FROM users RIGHT JOIN orders ON orders.user_id = users.id", "RIGHT JOIN"),
        ("SELECT * FROM users FULL JOIN orders ON orders.user_id = users.id", "FULL JOIN"),
        ("SELECT * FROM users CROSS JOIN orders", "CROSS JOIN"),
    ];
    for (sql, construct) in cases {
        let err = compile_err(sql);
        assert_eq!(
            err,
            CompileError::NotSupported {
                construct: String::from(construct),
            },
            "{sql}"
        );
        assert_eq!(err.code(), "not_supported");
    }
}
