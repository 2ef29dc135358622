//! Operator precedence for the expression parser.

use crate::ast::BinaryOp;
use crate::lexer::TokenKind;

/// Binding power of the binary operator starting at `kind`, or None when
/// the token is not a binary operator.
///
/// Multiplicative operators bind at 2. Additive operators and every
/// comparison share level 1: a comparison cannot take a sum as an operand
/// without parentheses. That is how the language is defined, not an
/// oversight.
pub fn binary_precedence(kind: &TokenKind) -> Option<u8> {
    match kind {
        TokenKind::Star | TokenKind::Slash => Some(2),
        TokenKind::Plus
        | TokenKind::Minus
        | TokenKind::Less
        | TokenKind::Greater
        | TokenKind::LessEqual
        | TokenKind::GreaterEqual
        | TokenKind::EqualEqual
        | TokenKind::BangEqual => Some(1),
        _ => None,
    }
}

/// The AST operator for a binary operator token.
pub fn binary_operator(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Subtract),
        TokenKind::Star => Some(BinaryOp::Multiply),
        TokenKind::Slash => Some(BinaryOp::Divide),
        TokenKind::Less => Some(BinaryOp::Less),
        TokenKind::Greater => Some(BinaryOp::Greater),
        TokenKind::LessEqual => Some(BinaryOp::LessEqual),
        TokenKind::GreaterEqual => Some(BinaryOp::GreaterEqual),
        TokenKind::EqualEqual => Some(BinaryOp::Equal),
        TokenKind::BangEqual => Some(BinaryOp::NotEqual),
        _ => None,
    }
}
