//! Abstract Syntax Tree for Juno.

pub mod expr;
pub mod stmt;
pub mod types;

pub use expr::{BinaryOp, Expr, ExprKind};
pub use stmt::{ExternDecl, FunctionDecl, Parameter, Stmt, StmtKind};
pub use types::{TypeAnnotation, TypeKind};
