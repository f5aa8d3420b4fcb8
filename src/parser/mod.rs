//! Recursive-descent parsing (spec.md §4.4, §4.5): turns a mode-tagged token
//! stream into a [`Value`] tree.

pub mod bracket;
pub mod cursor;
pub mod indentation;

use crate::config::DocumentMode;
use crate::error::{ErrorKind, FlexConfError};
use crate::lexer::token::{Literal, Token, TokenKind};
use crate::lexer::TokenStream;
use crate::source::SourceBuffer;
use crate::value::{Key, Value};
use cursor::Cursor;

/// Parses a full token stream into the document root, dispatching on the
/// frozen document mode (spec.md §4.7 "Document-mode automaton").
pub fn parse(stream: &TokenStream, buffer: &SourceBuffer) -> Result<Value, FlexConfError> {
    let mut cursor = Cursor::new(&stream.tokens, buffer);
    match stream.mode {
        DocumentMode::Indentation => indentation::parse_document(&mut cursor),
        DocumentMode::Bracket => bracket::parse_document(&mut cursor),
    }
}

/// Builds a `Key` from an already-consumed `IDENT` token.
pub(crate) fn key_from_token(tok: &Token) -> Key {
    match &tok.value {
        Some(Literal::Str(s)) => Key::new(s.clone()),
        _ => unreachable!("IDENT tokens always carry a decoded string value"),
    }
}

/// Builds a scalar `Value` from a primitive literal token.
pub(crate) fn scalar_value(tok: &Token, buffer: &SourceBuffer) -> Result<Value, FlexConfError> {
    match (tok.kind, &tok.value) {
        (TokenKind::Str, Some(Literal::Str(s))) => Ok(Value::Str(s.clone())),
        (TokenKind::Int, Some(Literal::Int(i))) => Ok(Value::Int(*i)),
        (TokenKind::Int, Some(Literal::BigInt(s))) => Ok(Value::BigInt(s.clone())),
        (TokenKind::Float, Some(Literal::Float(f))) => Ok(Value::Float(*f)),
        (TokenKind::Bool, Some(Literal::Bool(b))) => Ok(Value::Bool(*b)),
        (TokenKind::Null, _) => Ok(Value::Null),
        _ => Err(buffer.error(
            ErrorKind::SyntaxError,
            format!("expected a value, found {:?}", tok.kind),
            tok.span,
        )),
    }
}
