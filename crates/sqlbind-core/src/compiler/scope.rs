//! Name resolution scopes.
//!
//! One scope per statement or subquery. Bare names resolve in the innermost
//! scope that has them; qualifiers are looked up the same way, which is what
//! lets a subquery refer to the tables of its enclosing statement.

use tracing::trace;

use super::error::CompileError;
use crate::ast::TableRef;
use crate::schema::SchemaCatalog;

/// A table declared in a FROM list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ScopeTable {
    /// Table name in the schema.
    pub name: String,
    /// Name columns are qualified with.
    pub visible: String,
}

#[derive(Debug)]
pub(super) struct Scope<'a> {
    tables: Vec<ScopeTable>,
    parent: Option<&'a Scope<'a>>,
}

impl<'a> Scope<'a> {
    pub const fn new(parent: Option<&'a Scope<'a>>) -> Self {
        Self {
            tables: Vec::new(),
            parent,
        }
    }

    /// Adds a table, checking it exists and its visible name is free.
    pub fn declare(
        &mut self,
        table: &TableRef,
        schema: &dyn SchemaCatalog,
    ) -> Result<(), CompileError> {
        if !schema.is_table(&table.name) {
            return Err(CompileError::TableNotFound {
                table: table.name.clone(),
            });
        }
        let visible = table.visible_name();
        if self.tables.iter().any(|t| t.visible == visible) {
            return Err(CompileError::DuplicateTable {
                name: visible.to_string(),
            });
        }
        self.tables.push(ScopeTable {
            name: table.name.clone(),
            visible: visible.to_string(),
        });
        Ok(())
    }

    pub fn tables(&self) -> &[ScopeTable] {
        &self.tables
    }

    /// Finds the table a qualifier refers to, innermost scope first.
    ///
    /// Visible names are searched through every enclosing scope before an
    /// aliased table may answer to its schema name, so an outer `orders`
    /// is never captured by an inner `orders AS o2`.
    pub fn find_qualifier(&self, qualifier: &str) -> Option<&ScopeTable> {
        self.find_in_chain(|t| t.visible == qualifier)
            .or_else(|| self.find_in_chain(|t| t.name == qualifier))
    }

    fn find_in_chain(&self, matches: impl Fn(&ScopeTable) -> bool) -> Option<&ScopeTable> {
        let mut scope = Some(self);
        while let Some(current) = scope {
            if let Some(found) = current.tables.iter().find(|&t| matches(t)) {
                return Some(found);
            }
            scope = current.parent;
        }
        None
    }

    /// Qualifies a column reference as `visible.column`.
    pub fn resolve(&self, name: &str, schema: &dyn SchemaCatalog) -> Result<String, CompileError> {
        if let Some((qualifier, column)) = name.split_once('.') {
            let table =
                self.find_qualifier(qualifier)
                    .ok_or_else(|| CompileError::DanglingAlias {
                        alias: qualifier.to_string(),
                    })?;
            if !schema.is_column(&table.name, column) {
                return Err(CompileError::ColumnNotFound {
                    column: column.to_string(),
                    tables: vec![table.name.clone()],
                });
            }
            let qualified = format!("{}.{column}", table.visible);
            trace!(column = name, %qualified, "resolved column");
            return Ok(qualified);
        }

        let mut scope = Some(self);
        while let Some(current) = scope {
            let matches: Vec<&ScopeTable> = current
                .tables
                .iter()
                .filter(|t| schema.is_column(&t.name, name))
                .collect();
            match matches.as_slice() {
                [] => scope = current.parent,
                [table] => {
                    let qualified = format!("{}.{name}", table.visible);
                    trace!(column = name, %qualified, "resolved column");
                    return Ok(qualified);
                }
                _ => {
                    return Err(CompileError::AmbiguousColumn {
                        column: name.to_string(),
                        tables: matches.iter().map(|t| t.visible.clone()).collect(),
                    });
                }
            }
        }

        Err(CompileError::ColumnNotFound {
            column: name.to_string(),
            tables: self.visible_names(),
        })
    }

    /// Visible names of every table in reach, innermost first.
    fn visible_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        let mut scope = Some(self);
        while let Some(current) = scope {
            names.extend(current.tables.iter().map(|t| t.visible.clone()));
            scope = current.parent;
        }
        names
    }
}
