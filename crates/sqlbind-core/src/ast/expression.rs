//! Expression AST types.
//!
//! WHERE and ON clauses are trees of comparisons joined by `AND`/`OR`.
//! Negation is never a node of its own: `IS NOT` and `NOT IN` set the
//! `negated` flag on the comparison they modify.

use super::SelectAst;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// =
    Eq,
    /// <>
    NotEq,
    /// <
    Lt,
    /// >
    Gt,
    /// <=
    LtEq,
    /// >=
    GtEq,
    /// IS
    Is,
    /// IN
    In,
    /// LIKE
    Like,
}

impl CompareOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::Is => "IS",
            Self::In => "IN",
            Self::Like => "LIKE",
        }
    }

    /// Returns true if the operator may carry `negated = true`.
    #[must_use]
    pub const fn supports_negation(&self) -> bool {
        matches!(self, Self::Is | Self::In)
    }
}

/// Logical connectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    /// AND
    And,
    /// OR
    Or,
}

impl LogicalOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }

    /// Returns the precedence of the operator (higher = binds tighter).
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
        }
    }
}

/// Argument of a set function.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SetFunctionArg {
    /// A single column, used by `max`, `min`, `sum` and `avg`.
    Single(String),
    /// The argument list of `count`, kept as a list even with one entry.
    ///
    /// `count(*)` is `List(["*"])`, `count()` is `List([])`.
    List(Vec<String>),
}

impl SetFunctionArg {
    /// Returns the argument names in order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::Single(name) => vec![name.as_str()],
            Self::List(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

/// An aggregate call such as `count(DISTINCT a)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SetFunctionCall {
    /// The function name, lower case.
    pub name: String,
    /// Whether DISTINCT was specified.
    pub distinct: bool,
    /// The argument(s).
    pub arg: SetFunctionArg,
    /// Output alias, when used in a select list.
    pub alias: Option<String>,
}

impl SetFunctionCall {
    /// Creates a `count(*)` call.
    #[must_use]
    pub fn count_all() -> Self {
        Self {
            name: String::from("count"),
            distinct: false,
            arg: SetFunctionArg::List(vec![String::from("*")]),
            alias: None,
        }
    }

    /// Creates a single-argument call such as `max(price)`.
    #[must_use]
    pub fn single(name: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            distinct: false,
            arg: SetFunctionArg::Single(column.into()),
            alias: None,
        }
    }

    /// Sets the output alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// A typed leaf value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Leaf {
    /// A column name, possibly dotted (`table.column`).
    Ident(String),
    /// An integer literal.
    IntVal(i64),
    /// A float literal, kept as written.
    FloatVal(String),
    /// A string literal, unescaped.
    TextVal(String),
    /// NULL.
    Null,
    /// A scalar or row subquery.
    Command(Box<SelectAst>),
    /// A parenthesized value list, as in `IN (1, 2, 3)`.
    ValueList(Vec<Leaf>),
    /// An aggregate call used as a value.
    SetFunction(SetFunctionCall),
}

impl Leaf {
    /// Returns true for literal values (numbers, strings and NULL).
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(
            self,
            Self::IntVal(_) | Self::FloatVal(_) | Self::TextVal(_) | Self::Null
        )
    }
}

/// A boolean expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// `left op right`, with `negated` only for IS and IN.
    Comparison {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: CompareOp,
        /// `IS NOT` / `NOT IN`.
        negated: bool,
        /// Right operand.
        right: Box<Expr>,
    },

    /// `left AND right` or `left OR right`.
    Logical {
        /// Left operand, holding everything accumulated so far.
        left: Box<Expr>,
        /// Operator.
        op: LogicalOp,
        /// Right operand.
        right: Box<Expr>,
    },

    /// A parenthesized group used as an operand.
    Subclause {
        /// The grouped expression.
        inner: Box<Expr>,
    },

    /// A value.
    Leaf(Leaf),
}

impl Expr {
    /// Creates an identifier leaf.
    #[must_use]
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Leaf(Leaf::Ident(name.into()))
    }

    /// Creates an integer leaf.
    #[must_use]
    pub const fn int(value: i64) -> Self {
        Self::Leaf(Leaf::IntVal(value))
    }

    /// Creates a string leaf.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Leaf(Leaf::TextVal(value.into()))
    }

    /// Creates a NULL leaf.
    #[must_use]
    pub const fn null() -> Self {
        Self::Leaf(Leaf::Null)
    }

    /// Creates a comparison node.
    #[must_use]
    pub fn compare(self, op: CompareOp, right: Self) -> Self {
        Self::Comparison {
            left: Box::new(self),
            op,
            negated: false,
            right: Box::new(right),
        }
    }

    /// Creates an equality comparison.
    #[must_use]
    pub fn eq(self, right: Self) -> Self {
        self.compare(CompareOp::Eq, right)
    }

    /// Creates an inequality comparison.
    #[must_use]
    pub fn not_eq(self, right: Self) -> Self {
        self.compare(CompareOp::NotEq, right)
    }

    /// Creates a `<` comparison.
    #[must_use]
    pub fn lt(self, right: Self) -> Self {
        self.compare(CompareOp::Lt, right)
    }

    /// Creates a `>` comparison.
    #[must_use]
    pub fn gt(self, right: Self) -> Self {
        self.compare(CompareOp::Gt, right)
    }

    /// Creates a LIKE comparison.
    #[must_use]
    pub fn like(self, right: Self) -> Self {
        self.compare(CompareOp::Like, right)
    }

    /// Creates an IS NULL comparison.
    #[must_use]
    pub fn is_null(self) -> Self {
        self.compare(CompareOp::Is, Self::null())
    }

    /// Creates an IS NOT NULL comparison.
    #[must_use]
    pub fn is_not_null(self) -> Self {
        Self::Comparison {
            left: Box::new(self),
            op: CompareOp::Is,
            negated: true,
            right: Box::new(Self::null()),
        }
    }

    /// Creates an IN comparison over a value list.
    #[must_use]
    pub fn in_list(self, list: Vec<Leaf>) -> Self {
        self.compare(CompareOp::In, Self::Leaf(Leaf::ValueList(list)))
    }

    /// Creates a NOT IN comparison over a value list.
    #[must_use]
    pub fn not_in_list(self, list: Vec<Leaf>) -> Self {
        Self::Comparison {
            left: Box::new(self),
            op: CompareOp::In,
            negated: true,
            right: Box::new(Self::Leaf(Leaf::ValueList(list))),
        }
    }

    /// Creates a logical node.
    #[must_use]
    pub fn logical(self, op: LogicalOp, right: Self) -> Self {
        Self::Logical {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }

    /// Creates an AND node.
    #[must_use]
    pub fn and(self, right: Self) -> Self {
        self.logical(LogicalOp::And, right)
    }

    /// Creates an OR node.
    #[must_use]
    pub fn or(self, right: Self) -> Self {
        self.logical(LogicalOp::Or, right)
    }

    /// Wraps the expression in a subclause.
    #[must_use]
    pub fn grouped(self) -> Self {
        Self::Subclause {
            inner: Box::new(self),
        }
    }

    /// Removes subclause wrappers around the whole expression.
    ///
    /// A predicate that is nothing but a parenthesized group does not keep
    /// the group node.
    #[must_use]
    pub fn without_outer_subclause(self) -> Self {
        let mut expr = self;
        while let Self::Subclause { inner } = expr {
            expr = *inner;
        }
        expr
    }

    /// Returns the leaf if this expression is one.
    #[must_use]
    pub const fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    /// Returns the conjuncts reachable through AND and subclause nodes.
    ///
    /// Comparisons under an OR are not returned: they do not hold for
    /// every row the predicate accepts.
    #[must_use]
    pub fn conjuncts(&self) -> Vec<&Self> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(expr) = stack.pop() {
            match expr {
                Self::Logical {
                    left,
                    op: LogicalOp::And,
                    right,
                } => {
                    stack.push(right);
                    stack.push(left);
                }
                Self::Subclause { inner } => stack.push(inner),
                other => out.push(other),
            }
        }
        out
    }
}
