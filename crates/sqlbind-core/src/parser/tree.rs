//! Expression tree builder shared by WHERE, ON and UPDATE predicates.

use super::error::{ParseError, ParseErrorKind};
use super::pratt::{token_to_compare_op, token_to_logical_op};
use crate::ast::Expr;
use crate::lexer::Token;

/// Joins two operands with the operator spelled by `op_token`.
///
/// Comparison tokens produce a [`Expr::Comparison`], `AND`/`OR` produce a
/// [`Expr::Logical`] node. `negated` is only accepted together with `IS`
/// and `IN`; negation never becomes a node of its own.
///
/// # Errors
///
/// Returns `UnsupportedNegation` when `negated` is set for an operator that
/// cannot carry it, and `UnexpectedToken` when `op_token` is no operator.
pub fn build_node(
    left: Expr,
    op_token: &Token,
    negated: bool,
    right: Expr,
) -> Result<Expr, ParseError> {
    if let Some(op) = token_to_compare_op(&op_token.kind) {
        if negated && !op.supports_negation() {
            return Err(ParseError::new(
                ParseErrorKind::UnsupportedNegation,
                format!("NOT cannot be applied to {}", op.as_str()),
                op_token,
            ));
        }
        return Ok(Expr::Comparison {
            left: Box::new(left),
            op,
            negated,
            right: Box::new(right),
        });
    }

    match token_to_logical_op(&op_token.kind) {
        Some(_) if negated => Err(ParseError::new(
            ParseErrorKind::UnsupportedNegation,
            "NOT is only supported as IS NOT or NOT IN",
            op_token,
        )),
        Some(op) => Ok(left.logical(op, right)),
        None => Err(ParseError::unexpected("an operator", op_token)),
    }
}
