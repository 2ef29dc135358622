//! Expression parsing using precedence climbing.

use crate::ast::*;
use crate::error::ParserError;
use crate::lexer::TokenKind;

use super::core::{ParseResult, Parser};
use super::precedence::{binary_operator, binary_precedence};

impl Parser {
    pub(crate) fn expression(&mut self) -> ParseResult<Expr> {
        self.parse_precedence(0)
    }

    /// Precedence climbing: consume binary operators whose precedence is at
    /// least `min_precedence`, recursing with `precedence + 1` for the rhs
    /// so every operator is left-associative.
    pub(crate) fn parse_precedence(&mut self, min_precedence: u8) -> ParseResult<Expr> {
        let mut left = self.parse_primary()?;

        while let Some(precedence) = binary_precedence(&self.peek().kind) {
            if precedence < min_precedence {
                break;
            }

            let Some(operator) = binary_operator(&self.peek().kind) else {
                break;
            };
            self.advance();

            let right = self.parse_precedence(precedence + 1)?;
            let span = left.span.merge(&right.span);

            left = Expr::new(
                ExprKind::Binary {
                    left: Box::new(left),
                    operator,
                    right: Box::new(right),
                },
                span,
            );
        }

        Ok(left)
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let token = self.advance();
        let start_span = token.span;

        match &token.kind {
            TokenKind::Number(n) => Ok(Expr::new(ExprKind::Number(*n), start_span)),

            TokenKind::Str(s) => Ok(Expr::new(ExprKind::Str(s.clone()), start_span)),

            // The machine is integral and the AST carries no boolean node,
            // so boolean literals lower to 1 and 0 here.
            TokenKind::True => Ok(Expr::new(ExprKind::Number(1.0), start_span)),
            TokenKind::False => Ok(Expr::new(ExprKind::Number(0.0), start_span)),

            TokenKind::Identifier(name) => {
                if self.check(&TokenKind::LeftParen) {
                    self.parse_call(name.clone(), start_span)
                } else {
                    Ok(Expr::new(ExprKind::Variable(name.clone()), start_span))
                }
            }

            TokenKind::LeftParen => {
                let expr = self.expression()?;
                self.expect(&TokenKind::RightParen)?;
                Ok(expr)
            }

            TokenKind::Fn => {
                let decl = self.function_signature(String::new(), start_span)?;
                let span = decl.span;
                Ok(Expr::new(ExprKind::Function(decl), span))
            }

            _ => Err(ParserError::unexpected_token(
                "expression",
                format!("{}", token.kind),
                token.span,
            )),
        }
    }

    fn parse_call(&mut self, callee: String, start_span: crate::span::Span) -> ParseResult<Expr> {
        self.expect(&TokenKind::LeftParen)?;
        let arguments = self.parse_arguments()?;
        self.expect(&TokenKind::RightParen)?;
        let span = start_span.merge(&self.previous_span());

        Ok(Expr::new(ExprKind::Call { callee, arguments }, span))
    }

    /// Parse a comma-separated argument list. The caller consumes the
    /// surrounding parentheses. Empty lists are permitted.
    pub(crate) fn parse_arguments(&mut self) -> ParseResult<Vec<Expr>> {
        let mut arguments = Vec::new();

        if !self.check(&TokenKind::RightParen) {
            loop {
                arguments.push(self.expression()?);
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
        }

        Ok(arguments)
    }
}
