//! Statement AST nodes.

use crate::ast::expr::{BinaryOp, Expr};
use crate::ast::types::TypeAnnotation;
use crate::span::Span;

/// A statement in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Statement variants.
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// Expression statement: expr;
    Expression(Expr),

    /// Variable declaration: let x: int = expr;
    ///
    /// `comptime` is set when the declaration carries the @comptime
    /// annotation, asking the compiler to fold the initializer.
    Let {
        name: String,
        type_annotation: Option<TypeAnnotation>,
        initializer: Expr,
        comptime: bool,
    },

    /// Assignment: x = expr;
    Assign { name: String, value: Expr },

    /// Compound assignment: x += expr; (also -=, *=, /=)
    ///
    /// `op` is always one of the four arithmetic operators.
    CompoundAssign {
        name: String,
        op: BinaryOp,
        value: Expr,
    },

    /// Block: { statements }, optionally prefixed with @profile.
    Block {
        profiled: bool,
        statements: Vec<Stmt>,
    },

    /// Named function declaration.
    Function(FunctionDecl),

    /// External function prototype: extern fn name(params) -> type;
    ExternFunction(ExternDecl),

    /// Return statement: return expr?;
    Return(Option<Expr>),

    /// If statement: if (cond) { ... } else { ... }
    ///
    /// `then_branch` is always a Block; `else_branch` is a Block or a
    /// nested If (for else-if chains).
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
}

/// Function declaration, shared by named prototypes and lambdas.
///
/// An empty name marks a lambda; lambdas only ever appear wrapped in
/// `ExprKind::Function`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<Parameter>,
    pub return_type: Option<TypeAnnotation>,
    pub body: Box<Stmt>,
    pub span: Span,
}

impl FunctionDecl {
    pub fn is_lambda(&self) -> bool {
        self.name.is_empty()
    }
}

/// Function parameter: name : type-name.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub type_annotation: TypeAnnotation,
    pub span: Span,
}

/// External function prototype, consumed by backends other than the VM.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternDecl {
    pub name: String,
    pub params: Vec<Parameter>,
    pub return_type: Option<TypeAnnotation>,
    pub span: Span,
}
