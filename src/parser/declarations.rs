//! Declaration parsing: functions, externs, variables.

use crate::ast::*;
use crate::lexer::TokenKind;
use crate::span::Span;

use super::core::{ParseResult, Parser};

impl Parser {
    pub(crate) fn declaration(&mut self) -> ParseResult<Stmt> {
        if self.check(&TokenKind::Extern) {
            self.extern_declaration()
        } else if self.check(&TokenKind::Fn) {
            self.function_declaration()
        } else if self.check(&TokenKind::Let) {
            self.let_declaration(false)
        } else {
            self.statement()
        }
    }

    /// Parse a named function declaration: fn name(params) -> type { ... }
    fn function_declaration(&mut self) -> ParseResult<Stmt> {
        let start_span = self.current_span();
        self.expect(&TokenKind::Fn)?;
        let name = self.expect_identifier()?;

        let decl = self.function_signature(name, start_span)?;
        let span = decl.span;

        Ok(Stmt::new(StmtKind::Function(decl), span))
    }

    /// Parse the parameter list, return type, and body shared by named
    /// functions and lambdas. The name (possibly empty for a lambda) and the
    /// span of the `fn` keyword come from the caller.
    pub(crate) fn function_signature(
        &mut self,
        name: String,
        start_span: Span,
    ) -> ParseResult<FunctionDecl> {
        self.expect(&TokenKind::LeftParen)?;
        let params = self.parse_parameters()?;
        self.expect(&TokenKind::RightParen)?;

        let return_type = if self.match_token(&TokenKind::Arrow) {
            Some(self.parse_type()?)
        } else {
            None
        };

        let body = Box::new(self.block_statement(false)?);
        let span = start_span.merge(&self.previous_span());

        Ok(FunctionDecl {
            name,
            params,
            return_type,
            body,
            span,
        })
    }

    /// Parse an extern prototype: extern fn name(params) -> type;
    fn extern_declaration(&mut self) -> ParseResult<Stmt> {
        let start_span = self.current_span();
        self.expect(&TokenKind::Extern)?;
        self.expect(&TokenKind::Fn)?;
        let name = self.expect_identifier()?;

        self.expect(&TokenKind::LeftParen)?;
        let params = self.parse_parameters()?;
        self.expect(&TokenKind::RightParen)?;

        let return_type = if self.match_token(&TokenKind::Arrow) {
            Some(self.parse_type()?)
        } else {
            None
        };

        self.expect(&TokenKind::Semicolon)?;
        let span = start_span.merge(&self.previous_span());

        Ok(Stmt::new(
            StmtKind::ExternFunction(ExternDecl {
                name,
                params,
                return_type,
                span,
            }),
            span,
        ))
    }

    /// Parse a variable declaration: let name (: type)? = initializer;
    ///
    /// The initializer is mandatory. `comptime` is set when the caller
    /// consumed a leading @comptime annotation.
    pub(crate) fn let_declaration(&mut self, comptime: bool) -> ParseResult<Stmt> {
        let start_span = self.current_span();
        self.expect(&TokenKind::Let)?;
        let name = self.expect_identifier()?;

        let type_annotation = if self.match_token(&TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };

        self.expect(&TokenKind::Equal)?;
        let initializer = self.expression()?;
        self.expect(&TokenKind::Semicolon)?;
        let span = start_span.merge(&self.previous_span());

        Ok(Stmt::new(
            StmtKind::Let {
                name,
                type_annotation,
                initializer,
                comptime,
            },
            span,
        ))
    }

    /// Parse zero or more `name : type-name` parameters, comma separated.
    pub(crate) fn parse_parameters(&mut self) -> ParseResult<Vec<Parameter>> {
        let mut params = Vec::new();

        if !self.check(&TokenKind::RightParen) {
            loop {
                let param_span = self.current_span();
                let name = self.expect_identifier()?;
                self.expect(&TokenKind::Colon)?;
                let type_annotation = self.parse_type()?;

                params.push(Parameter {
                    name,
                    type_annotation,
                    span: param_span.merge(&self.previous_span()),
                });

                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
        }

        Ok(params)
    }
}
