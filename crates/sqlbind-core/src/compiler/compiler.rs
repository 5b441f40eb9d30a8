//! Semantic compiler implementation.

use tracing::{debug, trace};

use super::error::CompileError;
use super::join::{correlates, links, natural_condition, unconnected};
use super::scope::Scope;
use crate::ast::{
    Assignment, Ast, ColumnRef, DeleteAst, Expr, InsertAst, JoinClause, JoinKind, Leaf,
    SelectAst, SetFunctionArg, SetFunctionCall, TableRef, UpdateAst,
};
use crate::query::{Delete, Insert, Query, Select, SelectCount, SelectExist, Update};
use crate::schema::SchemaCatalog;

/// Compiler settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompilerConfig {
    /// Maximum nesting of subqueries and parenthesized groups.
    pub max_depth: usize,
}

impl CompilerConfig {
    /// Default nesting limit.
    pub const DEFAULT_MAX_DEPTH: usize = 50;

    /// Sets the nesting limit.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Compiles a statement against `schema` with the default settings.
///
/// # Errors
///
/// Returns a `CompileError` if the statement does not fit the schema or uses
/// an unsupported construct.
pub fn compile(ast: Ast, schema: &dyn SchemaCatalog) -> Result<Query, CompileError> {
    Compiler::new(schema).compile(ast)
}

/// Binds ASTs to a schema.
pub struct Compiler<'s> {
    schema: &'s dyn SchemaCatalog,
    config: CompilerConfig,
}

impl<'s> Compiler<'s> {
    /// Creates a compiler over `schema`.
    #[must_use]
    pub fn new(schema: &'s dyn SchemaCatalog) -> Self {
        Self::with_config(schema, CompilerConfig::default())
    }

    /// Creates a compiler with explicit settings.
    #[must_use]
    pub const fn with_config(schema: &'s dyn SchemaCatalog, config: CompilerConfig) -> Self {
        Self { schema, config }
    }

    /// Compiles one statement.
    ///
    /// # Errors
    ///
    /// Returns a `CompileError` if the statement does not fit the schema or
    /// uses an unsupported construct.
    pub fn compile(&self, ast: Ast) -> Result<Query, CompileError> {
        let tables = match &ast {
            Ast::Select(select) => select.tables.len(),
            Ast::Insert(_) | Ast::Update(_) | Ast::Delete(_) => 1,
        };
        debug!(statement = ast.kind(), tables, "compiling statement");
        let query = match ast {
            Ast::Select(select) => classify(self.compile_select(select, None, 0)?),
            Ast::Insert(insert) => Query::Insert(self.compile_insert(insert)?),
            Ast::Update(update) => Query::Update(self.compile_update(update)?),
            Ast::Delete(delete) => Query::Delete(self.compile_delete(delete)?),
        };
        debug!(kind = query.kind(), "compiled statement");
        Ok(query)
    }

    const fn check_depth(&self, depth: usize) -> Result<(), CompileError> {
        if depth > self.config.max_depth {
            return Err(CompileError::TooDeeplyNested {
                max_depth: self.config.max_depth,
            });
        }
        Ok(())
    }

    /// Compiles a SELECT in its own scope.
    ///
    /// Subqueries come through here too; they always stay plain selects.
    fn compile_select(
        &self,
        select: SelectAst,
        parent: Option<&Scope<'_>>,
        depth: usize,
    ) -> Result<Select, CompileError> {
        self.check_depth(depth)?;

        if select.joins.len() != select.tables.len().saturating_sub(1) {
            return Err(CompileError::not_supported(
                "A join list that does not match the FROM list",
            ));
        }

        // Tables are declared one join at a time: an ON condition sees its
        // own table and the ones before it, never a later one.
        let mut scope = Scope::new(parent);
        if let Some(first) = select.tables.first() {
            scope.declare(first, self.schema)?;
        }
        let mut joins = Vec::with_capacity(select.joins.len());
        for (join, table) in select.joins.into_iter().zip(select.tables.iter().skip(1)) {
            scope.declare(table, self.schema)?;
            joins.push(self.compile_join(join, &scope, depth)?);
        }

        let where_expr = select
            .where_expr
            .map(|expr| self.qualify_expr(expr, &scope, depth))
            .transpose()?;

        let related: Vec<(&str, &str)> = joins
            .iter()
            .filter_map(|join| join.condition.as_ref())
            .chain(where_expr.as_ref())
            .flat_map(links)
            .collect();
        if let Some(table) = unconnected(scope.tables(), &related) {
            return Err(CompileError::AccidentalCrossJoin {
                table: table.name.clone(),
            });
        }

        let columns = select
            .columns
            .into_iter()
            .map(|column| {
                Ok(ColumnRef {
                    expr: self.qualify_leaf(column.expr, &scope, depth)?,
                    alias: column.alias,
                })
            })
            .collect::<Result<Vec<_>, CompileError>>()?;

        let set_functions = select
            .set_functions
            .into_iter()
            .map(|call| self.qualify_set_function(call, &scope))
            .collect::<Result<Vec<_>, _>>()?;

        let group_by = select
            .group_by
            .iter()
            .map(|name| scope.resolve(name, self.schema))
            .collect::<Result<Vec<_>, _>>()?;

        let output_aliases: Vec<&str> = columns
            .iter()
            .filter_map(|c| c.alias.as_deref())
            .chain(set_functions.iter().filter_map(|c| c.alias.as_deref()))
            .collect();
        let sort_order = select
            .sort_order
            .into_iter()
            .map(|(name, direction)| {
                if output_aliases.contains(&name.as_str()) {
                    Ok((name, direction))
                } else {
                    Ok((scope.resolve(&name, self.schema)?, direction))
                }
            })
            .collect::<Result<Vec<_>, CompileError>>()?;

        Ok(Select {
            distinct: select.distinct,
            columns,
            set_functions,
            tables: select.tables,
            joins,
            where_expr,
            group_by,
            sort_order,
            limit: select.limit,
        })
    }

    /// Validates a join and fills in its condition.
    ///
    /// The joined table is the last one declared in `scope`.
    fn compile_join(
        &self,
        join: JoinClause,
        scope: &Scope<'_>,
        depth: usize,
    ) -> Result<JoinClause, CompileError> {
        let JoinClause {
            table,
            alias,
            join_kind,
            condition,
        } = join;
        let Some((joined, earlier)) = scope.tables().split_last() else {
            return Err(CompileError::TableNotFound { table });
        };

        let condition = match join_kind {
            JoinKind::Right | JoinKind::Full | JoinKind::CrossJoin => {
                return Err(CompileError::not_supported(join_kind.as_str()));
            }
            JoinKind::Cross => {
                if condition.is_some() {
                    return Err(CompileError::not_supported("An ON condition on a comma join"));
                }
                None
            }
            JoinKind::Inner | JoinKind::LeftOuter => {
                let Some(condition) = condition else {
                    return Err(CompileError::AccidentalCrossJoin { table });
                };
                let condition = self.qualify_expr(condition, scope, depth)?;
                if !correlates(&condition, &joined.visible, earlier) {
                    return Err(CompileError::AccidentalCrossJoin { table });
                }
                Some(condition)
            }
            JoinKind::Natural => {
                let condition = natural_condition(joined, earlier, self.schema)?;
                trace!(table = %joined.name, %condition, "synthesized natural join condition");
                Some(condition)
            }
        };

        Ok(JoinClause {
            table,
            alias,
            join_kind,
            condition,
        })
    }

    /// Rewrites every column of an expression to its qualified form.
    fn qualify_expr(
        &self,
        expr: Expr,
        scope: &Scope<'_>,
        depth: usize,
    ) -> Result<Expr, CompileError> {
        Ok(match expr {
            Expr::Comparison {
                left,
                op,
                negated,
                right,
            } => {
                if negated && !op.supports_negation() {
                    return Err(CompileError::not_supported(format!("NOT {}", op.as_str())));
                }
                Expr::Comparison {
                    left: Box::new(self.qualify_expr(*left, scope, depth)?),
                    op,
                    negated,
                    right: Box::new(self.qualify_expr(*right, scope, depth)?),
                }
            }
            Expr::Logical { left, op, right } => {
                // Walk the left spine in a loop; long AND/OR chains are
                // nested on the left and would otherwise recurse per term.
                let mut rights = vec![(op, *right)];
                let mut leftmost = *left;
                while let Expr::Logical { left, op, right } = leftmost {
                    rights.push((op, *right));
                    leftmost = *left;
                }
                let mut qualified = self.qualify_expr(leftmost, scope, depth)?;
                for (op, right) in rights.into_iter().rev() {
                    qualified = qualified.logical(op, self.qualify_expr(right, scope, depth)?);
                }
                qualified
            }
            Expr::Subclause { inner } => {
                self.check_depth(depth + 1)?;
                Expr::Subclause {
                    inner: Box::new(self.qualify_expr(*inner, scope, depth + 1)?),
                }
            }
            Expr::Leaf(leaf) => Expr::Leaf(self.qualify_leaf(leaf, scope, depth)?),
        })
    }

    fn qualify_leaf(
        &self,
        leaf: Leaf,
        scope: &Scope<'_>,
        depth: usize,
    ) -> Result<Leaf, CompileError> {
        Ok(match leaf {
            Leaf::Ident(name) => Leaf::Ident(scope.resolve(&name, self.schema)?),
            Leaf::Command(select) => {
                let subquery = self.compile_select(*select, Some(scope), depth + 1)?;
                Leaf::Command(Box::new(subquery.into()))
            }
            Leaf::ValueList(items) => Leaf::ValueList(
                items
                    .into_iter()
                    .map(|item| self.qualify_leaf(item, scope, depth))
                    .collect::<Result<_, _>>()?,
            ),
            Leaf::SetFunction(call) => Leaf::SetFunction(self.qualify_set_function(call, scope)?),
            literal => literal,
        })
    }

    fn qualify_set_function(
        &self,
        call: SetFunctionCall,
        scope: &Scope<'_>,
    ) -> Result<SetFunctionCall, CompileError> {
        let resolve = |name: String| {
            if name == "*" {
                Ok(name)
            } else {
                scope.resolve(&name, self.schema)
            }
        };
        let arg = match call.arg {
            SetFunctionArg::Single(name) => SetFunctionArg::Single(resolve(name)?),
            SetFunctionArg::List(names) => {
                SetFunctionArg::List(names.into_iter().map(resolve).collect::<Result<_, _>>()?)
            }
        };
        Ok(SetFunctionCall { arg, ..call })
    }

    /// Compiles a single-row INSERT.
    fn compile_insert(&self, insert: InsertAst) -> Result<Insert, CompileError> {
        let InsertAst {
            table,
            columns,
            values,
        } = insert;

        if !self.schema.is_table(&table) {
            return Err(CompileError::TableNotFound { table });
        }

        let row = match <[Vec<Leaf>; 1]>::try_from(values) {
            Ok([row]) => row,
            Err(rows) if rows.is_empty() => {
                return Err(CompileError::not_supported("An INSERT without values"));
            }
            Err(_) => return Err(CompileError::not_supported("Multiple VALUES lists")),
        };

        let columns = if columns.is_empty() {
            let declared = self.schema.columns(&table);
            if row.len() > declared.len() {
                return Err(CompileError::ValueCountMismatch {
                    columns: declared.len(),
                    values: row.len(),
                });
            }
            declared.into_iter().take(row.len()).collect()
        } else {
            if let Some(unknown) = columns.iter().find(|c| !self.schema.is_column(&table, c)) {
                return Err(CompileError::ColumnNotFound {
                    column: unknown.clone(),
                    tables: vec![table],
                });
            }
            if columns.len() != row.len() {
                return Err(CompileError::ValueCountMismatch {
                    columns: columns.len(),
                    values: row.len(),
                });
            }
            columns
        };

        let scope = Scope::new(None);
        let values = row
            .into_iter()
            .map(|value| self.qualify_leaf(value, &scope, 0))
            .collect::<Result<Vec<_>, _>>()?;

        for required in self.required_columns(&table) {
            let supplied = columns
                .iter()
                .position(|c| *c == required)
                .and_then(|index| values.get(index));
            let empty = matches!(supplied, None | Some(Leaf::Null));
            if empty && !self.schema.has_default(&table, &required) {
                return Err(CompileError::MissingRequiredField {
                    table,
                    column: required,
                });
            }
        }

        Ok(Insert {
            table,
            columns,
            values,
        })
    }

    /// Compiles an UPDATE of one table.
    fn compile_update(&self, update: UpdateAst) -> Result<Update, CompileError> {
        let UpdateAst {
            table,
            alias,
            assignments,
            where_expr,
        } = update;
        let table = TableRef { name: table, alias };

        let mut scope = Scope::new(None);
        scope.declare(&table, self.schema)?;
        let required = self.required_columns(&table.name);

        let assignments = assignments
            .into_iter()
            .map(|assignment| {
                let qualified = scope.resolve(&assignment.column, self.schema)?;
                let column = qualified
                    .split_once('.')
                    .map_or_else(|| qualified.clone(), |(_, column)| column.to_string());
                let value = self.qualify_leaf(assignment.value, &scope, 0)?;
                if value == Leaf::Null
                    && required.contains(&column)
                    && !self.schema.has_default(&table.name, &column)
                {
                    return Err(CompileError::MissingRequiredField {
                        table: table.name.clone(),
                        column,
                    });
                }
                Ok(Assignment { column, value })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let where_expr = where_expr
            .map(|expr| self.qualify_expr(expr, &scope, 0))
            .transpose()?;

        Ok(Update {
            table,
            assignments,
            where_expr,
        })
    }

    /// Compiles a DELETE from one table.
    fn compile_delete(&self, delete: DeleteAst) -> Result<Delete, CompileError> {
        let DeleteAst { table, where_expr } = delete;

        let mut scope = Scope::new(None);
        scope.declare(&TableRef::new(table.clone()), self.schema)?;

        let where_expr = where_expr
            .map(|expr| self.qualify_expr(expr, &scope, 0))
            .transpose()?;

        Ok(Delete { table, where_expr })
    }

    /// Primary-key and foreign-key columns of `table`.
    fn required_columns(&self, table: &str) -> Vec<String> {
        let mut required: Vec<String> = self.schema.primary_key(table).into_iter().collect();
        for fk in self.schema.foreign_keys(table) {
            if !required.contains(&fk.column) {
                required.push(fk.column);
            }
        }
        required
    }
}

/// Picks the query kind for a compiled top-level SELECT.
fn classify(mut select: Select) -> Query {
    let single_count =
        select.set_functions.len() == 1 && select.set_functions[0].name == "count";
    if single_count
        && select.columns.is_empty()
        && select.group_by.is_empty()
        && select.sort_order.is_empty()
        && select.limit.is_none()
    {
        let count = select.set_functions.remove(0);
        return Query::SelectCount(SelectCount {
            distinct: select.distinct,
            count,
            tables: select.tables,
            joins: select.joins,
            where_expr: select.where_expr,
        });
    }

    let existence_check = !select.tables.is_empty()
        && select.set_functions.is_empty()
        && !select.columns.is_empty()
        && select.columns.iter().all(|c| c.expr.is_literal())
        && select.group_by.is_empty();
    if existence_check {
        return Query::SelectExist(SelectExist {
            tables: select.tables,
            joins: select.joins,
            where_expr: select.where_expr,
        });
    }

    Query::Select(select)
}
