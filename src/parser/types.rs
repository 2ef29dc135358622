//! Type annotation parsing.

use crate::ast::*;

use super::core::{ParseResult, Parser};

impl Parser {
    /// Parse a type annotation. Only simple named types appear in source
    /// today (int, double, bool, string, void); the richer kinds in
    /// `TypeKind` have no surface syntax yet.
    pub(crate) fn parse_type(&mut self) -> ParseResult<TypeAnnotation> {
        let start_span = self.current_span();
        let name = self.expect_identifier()?;

        Ok(TypeAnnotation::simple(name, start_span))
    }
}
