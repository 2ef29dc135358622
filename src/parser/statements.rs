//! Statement parsing: dispatch, if statements, blocks, assignments.

use crate::ast::*;
use crate::error::ParserError;
use crate::lexer::TokenKind;

use super::core::{ParseResult, Parser};

impl Parser {
    pub(crate) fn statement(&mut self) -> ParseResult<Stmt> {
        match &self.peek().kind {
            TokenKind::If => self.if_statement(),
            TokenKind::Return => self.return_statement(),
            TokenKind::LeftBrace => self.block_statement(false),
            TokenKind::Special(name) => {
                let name = name.clone();
                self.special_statement(&name)
            }
            TokenKind::Identifier(_) => {
                // An identifier starts an assignment only when the next
                // token is '=' or a compound-assign operator; anything else
                // is an expression statement.
                match self.peek_nth(1).kind {
                    TokenKind::Equal => self.assignment_statement(),
                    TokenKind::PlusEqual
                    | TokenKind::MinusEqual
                    | TokenKind::StarEqual
                    | TokenKind::SlashEqual => self.compound_assignment_statement(),
                    _ => self.expression_statement(),
                }
            }
            _ => self.expression_statement(),
        }
    }

    /// Dispatch on an @-annotation: @comptime prefixes a let declaration,
    /// @profile prefixes a block. Anything else is rejected.
    fn special_statement(&mut self, name: &str) -> ParseResult<Stmt> {
        match name {
            "@comptime" => {
                self.advance();
                self.let_declaration(true)
            }
            "@profile" => {
                self.advance();
                self.block_statement(true)
            }
            _ => Err(ParserError::unknown_annotation(name, self.current_span())),
        }
    }

    fn if_statement(&mut self) -> ParseResult<Stmt> {
        let start_span = self.current_span();
        self.expect(&TokenKind::If)?;

        self.expect(&TokenKind::LeftParen)?;
        let condition = self.expression()?;
        self.expect(&TokenKind::RightParen)?;

        let then_branch = Box::new(self.block_statement(false)?);

        let else_branch = if self.match_token(&TokenKind::Else) {
            if self.check(&TokenKind::If) {
                // else-if chains nest as the else branch.
                Some(Box::new(self.if_statement()?))
            } else {
                Some(Box::new(self.block_statement(false)?))
            }
        } else {
            None
        };

        let span = start_span.merge(&self.previous_span());

        Ok(Stmt::new(
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            },
            span,
        ))
    }

    fn return_statement(&mut self) -> ParseResult<Stmt> {
        let start_span = self.current_span();
        self.expect(&TokenKind::Return)?;

        let value = if !self.check(&TokenKind::Semicolon) {
            Some(self.expression()?)
        } else {
            None
        };

        self.expect(&TokenKind::Semicolon)?;
        let span = start_span.merge(&self.previous_span());

        Ok(Stmt::new(StmtKind::Return(value), span))
    }

    pub(crate) fn block_statement(&mut self, profiled: bool) -> ParseResult<Stmt> {
        let start_span = self.current_span();
        self.expect(&TokenKind::LeftBrace)?;

        let mut statements = Vec::new();
        while !self.check(&TokenKind::RightBrace) {
            if self.is_at_end() {
                return Err(ParserError::unexpected_eof(self.current_span()));
            }
            statements.push(self.declaration()?);
        }

        self.expect(&TokenKind::RightBrace)?;
        let span = start_span.merge(&self.previous_span());

        Ok(Stmt::new(
            StmtKind::Block {
                profiled,
                statements,
            },
            span,
        ))
    }

    fn assignment_statement(&mut self) -> ParseResult<Stmt> {
        let start_span = self.current_span();
        let name = self.expect_identifier()?;
        self.expect(&TokenKind::Equal)?;
        let value = self.expression()?;
        self.expect(&TokenKind::Semicolon)?;
        let span = start_span.merge(&self.previous_span());

        Ok(Stmt::new(StmtKind::Assign { name, value }, span))
    }

    fn compound_assignment_statement(&mut self) -> ParseResult<Stmt> {
        let start_span = self.current_span();
        let name = self.expect_identifier()?;

        let op = match self.advance().kind {
            TokenKind::PlusEqual => BinaryOp::Add,
            TokenKind::MinusEqual => BinaryOp::Subtract,
            TokenKind::StarEqual => BinaryOp::Multiply,
            TokenKind::SlashEqual => BinaryOp::Divide,
            kind => {
                return Err(ParserError::unexpected_token(
                    "compound assignment operator",
                    format!("{}", kind),
                    self.previous_span(),
                ));
            }
        };

        let value = self.expression()?;
        self.expect(&TokenKind::Semicolon)?;
        let span = start_span.merge(&self.previous_span());

        Ok(Stmt::new(StmtKind::CompoundAssign { name, op, value }, span))
    }

    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let start_span = self.current_span();
        let expr = self.expression()?;

        // The trailing semicolon is optional for expression statements.
        self.match_token(&TokenKind::Semicolon);
        let span = start_span.merge(&self.previous_span());

        Ok(Stmt::new(StmtKind::Expression(expr), span))
    }
}
