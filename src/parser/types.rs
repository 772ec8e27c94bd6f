//! Type annotation parsing.
//!
//! Type annotations in this language are bare names (`int`, `bool`, `char`,
//! or any other identifier — the vocabulary is open). The parser records
//! the name; the type checker turns it into a concrete type.

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

pub fn parse_type(parser: &mut Parser) -> Result<String, Error> {
    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().value.clone(),
            message: String::from("expected a type name"),
        },
        parser.get_position(),
    );

    Ok(parser.expect_error(TokenKind::Identifier, Some(error))?.value)
}
