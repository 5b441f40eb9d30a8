//! Join validation and natural join conditions.

use core::cmp::Reverse;

use super::error::CompileError;
use super::scope::ScopeTable;
use crate::ast::{CompareOp, Expr, Leaf};
use crate::schema::SchemaCatalog;

/// Returns the pairs of tables compared column to column in `condition`.
///
/// Only conjuncts count: a comparison under an OR does not hold for every
/// row the join produces. `condition` must already be qualified.
pub(super) fn links(condition: &Expr) -> Vec<(&str, &str)> {
    condition
        .conjuncts()
        .into_iter()
        .filter_map(|conjunct| {
            let Expr::Comparison {
                left, op, right, ..
            } = conjunct
            else {
                return None;
            };
            if matches!(op, CompareOp::Is | CompareOp::In | CompareOp::Like) {
                return None;
            }
            let (l, r) = (qualifier_of(left)?, qualifier_of(right)?);
            (l != r).then_some((l, r))
        })
        .collect()
}

/// Returns true if `condition` compares a column of `joined` with a column
/// of one of the `earlier` tables.
pub(super) fn correlates(condition: &Expr, joined: &str, earlier: &[ScopeTable]) -> bool {
    let is_earlier = |name: &str| earlier.iter().any(|t| t.visible == name);
    links(condition)
        .into_iter()
        .any(|(l, r)| (l == joined && is_earlier(r)) || (r == joined && is_earlier(l)))
}

/// Returns a table that `links` leave unrelated to the rest of the FROM
/// list, or `None` when every table is connected.
///
/// The largest group of linked tables is taken as the query; on a tie the
/// group holding the first table wins. The first table outside it is
/// returned. Links naming tables outside `tables` are ignored.
pub(super) fn unconnected<'t>(
    tables: &'t [ScopeTable],
    links: &[(&str, &str)],
) -> Option<&'t ScopeTable> {
    let index_of = |name: &str| tables.iter().position(|t| t.visible == name);
    let edges: Vec<(usize, usize)> = links
        .iter()
        .filter_map(|&(l, r)| Some((index_of(l)?, index_of(r)?)))
        .collect();

    let mut group: Vec<Option<usize>> = vec![None; tables.len()];
    let mut sizes = Vec::new();
    for start in 0..tables.len() {
        if group[start].is_some() {
            continue;
        }
        let id = sizes.len();
        group[start] = Some(id);
        let mut size = 0_usize;
        let mut stack = vec![start];
        while let Some(index) = stack.pop() {
            size += 1;
            for &(l, r) in &edges {
                let other = if l == index {
                    r
                } else if r == index {
                    l
                } else {
                    continue;
                };
                if group[other].is_none() {
                    group[other] = Some(id);
                    stack.push(other);
                }
            }
        }
        sizes.push(size);
    }

    let (main, _) = sizes
        .iter()
        .enumerate()
        .max_by_key(|&(id, &size)| (size, Reverse(id)))?;
    group
        .iter()
        .position(|&g| g != Some(main))
        .map(|index| &tables[index])
}

fn qualifier_of(expr: &Expr) -> Option<&str> {
    match expr.as_leaf()? {
        Leaf::Ident(name) => name.split_once('.').map(|(qualifier, _)| qualifier),
        _ => None,
    }
}

/// Builds the condition of a natural join.
///
/// One equality per foreign key between `joined` and any table in
/// `earlier`, in either direction, chained with AND on the left. For each
/// earlier table the keys declared on `joined` come first.
pub(super) fn natural_condition(
    joined: &ScopeTable,
    earlier: &[ScopeTable],
    schema: &dyn SchemaCatalog,
) -> Result<Expr, CompileError> {
    let joined_keys = schema.foreign_keys(&joined.name);
    let mut equalities = Vec::new();

    for table in earlier {
        for fk in joined_keys.iter().filter(|fk| fk.foreign_table == table.name) {
            equalities.push(column_eq(
                joined,
                &fk.column,
                table,
                &fk.foreign_column,
            ));
        }
        for fk in schema
            .foreign_keys(&table.name)
            .iter()
            .filter(|fk| fk.foreign_table == joined.name)
        {
            equalities.push(column_eq(
                table,
                &fk.column,
                joined,
                &fk.foreign_column,
            ));
        }
    }

    equalities
        .into_iter()
        .reduce(Expr::and)
        .ok_or_else(|| CompileError::NoForeignKeyRelation {
            table: joined.name.clone(),
        })
}

fn column_eq(left: &ScopeTable, left_column: &str, right: &ScopeTable, right_column: &str) -> Expr {
    Expr::ident(format!("{}.{left_column}", left.visible))
        .eq(Expr::ident(format!("{}.{right_column}", right.visible)))
}
