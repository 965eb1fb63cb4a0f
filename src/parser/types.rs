//! Type annotation parsing.
//!
//! Annotations are plain type names (`Integer`, `String`, ...); they are
//! resolved against the scope chain later by the type system.

use crate::{
    ast::expressions::TypeAnnotation,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

pub fn parse_type(parser: &mut Parser) -> Result<TypeAnnotation, Error> {
    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().value.clone(),
            message: String::from("expected a type name"),
        },
        parser.get_position(),
    );
    let token = parser.expect_error(TokenKind::Identifier, Some(error))?;

    Ok(TypeAnnotation {
        name: token.value,
        position: token.span.start,
    })
}
