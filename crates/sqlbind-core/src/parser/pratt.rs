//! Pratt binding powers for boolean connectives.
//!
//! Comparisons are not chained, so the only infix operators that take part
//! in precedence climbing are `AND` and `OR`.

use crate::ast::{CompareOp, LogicalOp};
use crate::lexer::{Keyword, Operator, TokenKind};

/// Returns the infix binding power of a logical operator.
///
/// Returns `(left_bp, right_bp)` where:
/// - Higher binding power = binds tighter
/// - Left associative: left_bp < right_bp
#[must_use]
pub const fn infix_binding_power(op: LogicalOp) -> (u8, u8) {
    match op {
        // Logical OR (lowest precedence)
        LogicalOp::Or => (1, 2),
        // Logical AND
        LogicalOp::And => (3, 4),
    }
}

/// Converts a token to a logical operator.
#[must_use]
pub const fn token_to_logical_op(kind: &TokenKind) -> Option<LogicalOp> {
    match kind {
        TokenKind::Keyword(Keyword::And) => Some(LogicalOp::And),
        TokenKind::Keyword(Keyword::Or) => Some(LogicalOp::Or),
        _ => None,
    }
}

/// Converts a token to a comparison operator.
#[must_use]
pub const fn token_to_compare_op(kind: &TokenKind) -> Option<CompareOp> {
    match kind {
        TokenKind::Operator(Operator::Eq) => Some(CompareOp::Eq),
        TokenKind::Operator(Operator::NotEq) => Some(CompareOp::NotEq),
        TokenKind::Operator(Operator::Lt) => Some(CompareOp::Lt),
        TokenKind::Operator(Operator::LtEq) => Some(CompareOp::LtEq),
        TokenKind::Operator(Operator::Gt) => Some(CompareOp::Gt),
        TokenKind::Operator(Operator::GtEq) => Some(CompareOp::GtEq),
        TokenKind::Keyword(Keyword::Is) => Some(CompareOp::Is),
        TokenKind::Keyword(Keyword::In) => Some(CompareOp::In),
        TokenKind::Keyword(Keyword::Like) => Some(CompareOp::Like),
        _ => None,
    }
}
