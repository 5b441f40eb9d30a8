#![allow(dead_code)]

use sqlbind_core::ast::{Ast, DeleteAst, InsertAst, SelectAst, UpdateAst};
use sqlbind_core::schema::{ColumnSchema, Schema, TableSchema};
use sqlbind_core::{CompileError, ParseError, Query, compile, parse};

/// Schema shared by the compiler tests.
///
/// - `dog(id, cat, name)`
/// - `b(a, x)` and `c(a, d)`, which share column `a`
/// - `ft(ftid)` and `t(id, ftid -> ft.ftid, v)`
/// - `i(id)` with a plain primary key
/// - `users(id, name, email)`, `orders(id, user_id -> users.id, total)`,
///   `items(id, order_id -> orders.id, sku)`
pub fn schema() -> Schema {
    Schema::new()
        .table(
            TableSchema::new("dog")
                .column(ColumnSchema::new("id").primary_key().auto_increment())
                .column(ColumnSchema::new("cat"))
                .column(ColumnSchema::new("name")),
        )
        .table(
            TableSchema::new("b")
                .column(ColumnSchema::new("a"))
                .column(ColumnSchema::new("x")),
        )
        .table(
            TableSchema::new("c")
                .column(ColumnSchema::new("a"))
                .column(ColumnSchema::new("d")),
        )
        .table(TableSchema::new("ft").column(ColumnSchema::new("ftid").primary_key()))
        .table(
            TableSchema::new("t")
                .column(ColumnSchema::new("id").primary_key().auto_increment())
                .column(ColumnSchema::new("ftid"))
                .column(ColumnSchema::new("v"))
                .foreign_key("ftid", "ft", "ftid"),
        )
        .table(TableSchema::new("i").column(ColumnSchema::new("id").primary_key()))
        .table(
            TableSchema::new("users")
                .column(ColumnSchema::new("id").primary_key().auto_increment())
                .column(ColumnSchema::new("name"))
                .column(ColumnSchema::new("email").default("''")),
        )
        .table(
            TableSchema::new("orders")
                .column(ColumnSchema::new("id").primary_key().auto_increment())
                .column(ColumnSchema::new("user_id"))
                .column(ColumnSchema::new("total"))
                .foreign_key("user_id", "users", "id"),
        )
        .table(
            TableSchema::new("items")
                .column(ColumnSchema::new("id").primary_key().auto_increment())
                .column(ColumnSchema::new("order_id"))
                .column(ColumnSchema::new("sku"))
                .foreign_key("order_id", "orders", "id"),
        )
}

pub fn parse_ok(sql: &str) -> Ast {
    parse(sql).unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    parse(sql).expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn parse_select(sql: &str) -> SelectAst {
    match parse_ok(sql) {
        Ast::Select(s) => s,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

pub fn parse_insert(sql: &str) -> InsertAst {
    match parse_ok(sql) {
        Ast::Insert(i) => i,
        other => panic!("Expected INSERT, got {other:?}"),
    }
}

pub fn parse_update(sql: &str) -> UpdateAst {
    match parse_ok(sql) {
        Ast::Update(u) => u,
        other => panic!("Expected UPDATE, got {other:?}"),
    }
}

pub fn parse_delete(sql: &str) -> DeleteAst {
    match parse_ok(sql) {
        Ast::Delete(d) => d,
        other => panic!("Expected DELETE, got {other:?}"),
    }
}

pub fn compile_ok(sql: &str) -> Query {
    compile(parse_ok(sql), &schema())
        .unwrap_or_else(|e| panic!("Failed to compile: {sql}\nError: {e:?}"))
}

pub fn compile_err(sql: &str) -> CompileError {
    compile(parse_ok(sql), &schema()).expect_err(&format!("Expected compile error for: {sql}"))
}

/// Verifies that the canonical rendering of a compiled query compiles back
/// to the same query, and that rendering is a fixed point.
pub fn round_trip(sql: &str) -> Query {
    let first = compile_ok(sql);
    let rendered = first.to_sql();
    let second = compile_ok(&rendered);
    assert_eq!(
        first, second,
        "Round-trip failed.\n  Input:    {sql}\n  Rendered: {rendered}"
    );
    assert_eq!(rendered, second.to_sql());
    first
}
