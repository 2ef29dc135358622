//! Type annotation AST nodes.

use crate::span::Span;

/// A type annotation in the source code.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAnnotation {
    pub kind: TypeKind,
    pub span: Span,
}

impl TypeAnnotation {
    pub fn new(kind: TypeKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn simple(name: impl Into<String>, span: Span) -> Self {
        Self::new(TypeKind::Simple(name.into()), span)
    }
}

/// The kinds of types that can be expressed in source.
///
/// The parser only produces Simple today; the remaining kinds are carried
/// for the solver and future surface syntax.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// Primitive types: int, double, bool, string, void
    Simple(String),
    /// Generic type: List<T>
    Generic {
        name: String,
        args: Vec<TypeAnnotation>,
    },
    /// Function type: (int) -> int
    Function {
        params: Vec<TypeAnnotation>,
        return_type: Box<TypeAnnotation>,
    },
    /// Array type: int[]
    Array(Box<TypeAnnotation>),
    /// Optional type: int?
    Optional(Box<TypeAnnotation>),
}

impl std::fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            TypeKind::Simple(name) => write!(f, "{}", name),
            TypeKind::Generic { name, args } => {
                write!(f, "{}<", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ">")
            }
            TypeKind::Function {
                params,
                return_type,
            } => {
                write!(f, "(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, ") -> {}", return_type)
            }
            TypeKind::Array(inner) => write!(f, "{}[]", inner),
            TypeKind::Optional(inner) => write!(f, "{}?", inner),
        }
    }
}
