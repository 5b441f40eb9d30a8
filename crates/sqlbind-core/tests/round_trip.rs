//! Canonical rendering of compiled queries compiles back to the same query.

mod common;
use common::*;

#[test]
fn round_trip_selects() {
    for sql in [
        "select * from dog where cat <> 4",
        "SELECT DISTINCT cat AS c FROM dog ORDER BY c DESC LIMIT 10, 5",
        "SELECT cat, count(*) AS n FROM dog GROUP BY cat ORDER BY n",
        "SELECT 1, cat FROM dog WHERE name IS NOT NULL AND cat NOT IN (1, 2, 3)",
        "SELECT name FROM dog WHERE name LIKE 'it''s%' OR cat = -1",
        "SELECT d.name FROM dog d WHERE d.cat = 1 AND (d.id = 2 OR d.id = 3)",
        "SELECT x FROM b WHERE (a = 1 OR a = 2) AND x = 3",
        "SELECT cat FROM dog WHERE cat = 1.5",
    ] {
        round_trip(sql);
    }
}

#[test]
fn round_trip_kinds() {
    assert_eq!(round_trip("SELECT count(*) FROM dog WHERE cat > 1").kind(), "select_count");
    assert_eq!(round_trip("SELECT 1 FROM dog WHERE cat = 3").kind(), "select_exist");
    assert_eq!(round_trip("SELECT count(cat) AS n FROM dog").kind(), "select_count");
}

#[test]
fn round_trip_joins() {
    for sql in [
        "select x, d from b inner join c on b.a = c.a",
        "SELECT o.total FROM users u JOIN orders o ON o.user_id = u.id AND o.total > 3",
        "SELECT name FROM users LEFT OUTER JOIN orders ON user_id = users.id",
        "SELECT v FROM ft, t WHERE ft.ftid = t.ftid",
        "SELECT sku FROM users NATURAL JOIN orders NATURAL JOIN items",
        "SELECT o.total FROM users u NATURAL JOIN orders o",
    ] {
        round_trip(sql);
    }
}

#[test]
fn round_trip_subqueries() {
    for sql in [
        "SELECT name FROM users WHERE id IN (SELECT user_id FROM orders WHERE total > 3)",
        "SELECT name FROM users u WHERE 1 < (SELECT count(*) FROM orders WHERE user_id = u.id)",
        "SELECT (SELECT max(total) FROM orders) AS top FROM users",
    ] {
        round_trip(sql);
    }
}

#[test]
fn round_trip_writes() {
    for sql in [
        "INSERT INTO dog (cat, name) VALUES (3, 'Rex')",
        "INSERT INTO i VALUES (7)",
        "INSERT INTO orders (user_id, total) VALUES ((SELECT max(id) FROM users), NULL)",
        "UPDATE dog d SET d.name = cat, cat = 4 WHERE d.id = 1",
        "UPDATE users SET email = 'x@y' WHERE id IN (SELECT user_id FROM orders)",
        "DELETE FROM dog WHERE cat = 4 OR name IS NULL",
        "DELETE FROM dog",
    ] {
        round_trip(sql);
    }
}

#[test]
fn reserved_names_are_quoted() {
    let schema = sqlbind_core::schema::Schema::new().table(
        sqlbind_core::schema::TableSchema::new("order")
            .column(sqlbind_core::schema::ColumnSchema::new("select")),
    );
    let ast = parse_ok("SELECT `select` FROM `order`");
    let query = sqlbind_core::compile(ast, &schema).unwrap();
    let rendered = query.to_sql();
    assert_eq!(rendered, "SELECT `order`.`select` FROM `order`");
    let again = sqlbind_core::compile(parse_ok(&rendered), &schema).unwrap();
    assert_eq!(again, query);
}
