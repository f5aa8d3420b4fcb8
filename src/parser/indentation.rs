//! Parser, Indentation Mode (spec.md §4.4).
//!
//!     A block's shape is decided once from its first token and never
//!     revisited (the "Block-shape automaton", spec.md §4.7). A Keyed block
//!     nested under a key (spec.md §4.4 item 2, "nested-container entry")
//!     additionally tracks blank-line separators: the lexer emits a
//!     freestanding `NEWLINE` between two data lines at the same level only
//!     for an actual blank line in the source (`indent.rs`'s `pending_blank`),
//!     so a bare `NEWLINE` where a key is otherwise expected means "close the
//!     current anonymous map, start the next one" rather than "end of block".
//!     A block that never sees one behaves like an ordinary single map (S1);
//!     one that does becomes a sequence of maps (S3). Blank-line grouping is
//!     scoped to these nested values only: spec.md §4.3 ties the freestanding
//!     `NEWLINE` to "anonymous-map boundaries inside lists", not to ordinary
//!     maps, so the document root never groups on a blank line; a root-level
//!     blank line between entries is insignificant, and a duplicate key still
//!     fails with `KeyError` regardless of blank lines around it.

use crate::builder;
use crate::error::FlexConfError;
use crate::lexer::token::TokenKind;
use crate::value::{Map, Value};

use super::cursor::Cursor;
use super::{key_from_token, scalar_value};

pub fn parse_document(cursor: &mut Cursor) -> Result<Value, FlexConfError> {
    let value = parse_block(cursor, TokenKind::Eof, false)?;
    cursor.expect(TokenKind::Eof)?;
    Ok(value)
}

/// Parses one block, stopping at (without consuming) `terminal`. `group`
/// controls whether a Keyed block may split into anonymous-map groups on a
/// blank line; it is true only for blocks reached as the value of a key.
fn parse_block(cursor: &mut Cursor, terminal: TokenKind, group: bool) -> Result<Value, FlexConfError> {
    if cursor.peek_kind() == terminal {
        return Ok(Value::Map(Map::new()));
    }
    let keyed = cursor.peek_kind() == TokenKind::Ident && cursor.peek2_kind() == TokenKind::KvSep;
    if keyed {
        parse_keyed_block(cursor, terminal, group)
    } else {
        parse_positional_block(cursor, terminal)
    }
}

fn parse_keyed_block(cursor: &mut Cursor, terminal: TokenKind, group: bool) -> Result<Value, FlexConfError> {
    let mut groups: Vec<Map> = vec![Map::new()];

    while cursor.peek_kind() != terminal {
        if cursor.peek_kind() == TokenKind::Newline {
            cursor.advance();
            if group && !groups.last().unwrap().is_empty() {
                groups.push(Map::new());
            }
            continue;
        }
        if cursor.peek_kind() != TokenKind::Ident {
            return Err(cursor.syntax_error(format!(
                "expected a key, found {:?}",
                cursor.peek_kind()
            )));
        }

        let key_tok = cursor.advance();
        let key_span = key_tok.span;
        let key = key_from_token(&key_tok);
        cursor.expect(TokenKind::KvSep)?;

        let value = if cursor.peek_kind() == TokenKind::Newline {
            cursor.advance();
            cursor.expect(TokenKind::Indent)?;
            let nested = parse_block(cursor, TokenKind::Dedent, true)?;
            cursor.expect(TokenKind::Dedent)?;
            nested
        } else {
            let tok = cursor.advance();
            let v = scalar_value(&tok, cursor.buffer())?;
            cursor.expect(TokenKind::Newline)?;
            v
        };

        builder::insert_unique(groups.last_mut().unwrap(), key, value, key_span, cursor.buffer())?;
    }

    if groups.len() == 1 {
        Ok(builder::finalize_map(groups.pop().unwrap()))
    } else {
        Ok(Value::Seq(groups.into_iter().map(builder::finalize_map).collect()))
    }
}

fn parse_positional_block(cursor: &mut Cursor, terminal: TokenKind) -> Result<Value, FlexConfError> {
    let mut items = Vec::new();

    while cursor.peek_kind() != terminal {
        if cursor.peek_kind() == TokenKind::Ident && cursor.peek2_kind() == TokenKind::KvSep {
            return Err(cursor.syntax_error("mixed keyed and positional items in one block"));
        }
        let tok = cursor.advance();
        let value = scalar_value(&tok, cursor.buffer())?;
        cursor.expect(TokenKind::Newline)?;
        items.push(value);
    }

    Ok(Value::Seq(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LexerConfig;
    use crate::lexer;
    use crate::source::SourceBuffer;

    fn parse(src: &str) -> Value {
        let buffer = SourceBuffer::new(src.as_bytes()).unwrap();
        let cfg = LexerConfig::default();
        let stream = lexer::tokenize(&buffer, &cfg, 0).unwrap();
        let mut cursor = Cursor::new(&stream.tokens, &buffer);
        parse_document(&mut cursor).unwrap()
    }

    #[test]
    fn s1_nested_map() {
        let value = parse("server:\n    host: \"localhost\"\n    port: 8080\n");
        let root = value.as_map().unwrap();
        let server = root.get(&"server".into()).unwrap().as_map().unwrap();
        assert_eq!(server.get(&"host".into()).unwrap().as_str(), Some("localhost"));
    }

    #[test]
    fn s3_blank_line_anonymous_maps() {
        let value = parse(
            "protocols:\n    name: \"http\"\n    port: 8080\n\n    name: \"https\"\n    port: 443\n",
        );
        let root = value.as_map().unwrap();
        let protocols = root.get(&"protocols".into()).unwrap().as_seq().unwrap();
        assert_eq!(protocols.len(), 2);
        assert_eq!(
            protocols[0].as_map().unwrap().get(&"name".into()).unwrap().as_str(),
            Some("http")
        );
        assert_eq!(
            protocols[1].as_map().unwrap().get(&"name".into()).unwrap().as_str(),
            Some("https")
        );
    }

    #[test]
    fn plain_scalar_list() {
        let value = parse("items:\n    1\n    2\n    3\n");
        let items = value.as_map().unwrap().get(&"items".into()).unwrap().as_seq().unwrap();
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn mixed_keyed_and_positional_errors() {
        use crate::error::ErrorKind;
        let buffer = SourceBuffer::new(b"items:\n    1\n    a: 2\n").unwrap();
        let stream = lexer::tokenize(&buffer, &LexerConfig::default(), 0).unwrap();
        let mut cursor = Cursor::new(&stream.tokens, &buffer);
        let err = parse_document(&mut cursor).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SyntaxError);
    }

    #[test]
    fn duplicate_key_errors() {
        use crate::error::ErrorKind;
        let buffer = SourceBuffer::new(b"a: 1\na: 2\n").unwrap();
        let stream = lexer::tokenize(&buffer, &LexerConfig::default(), 0).unwrap();
        let mut cursor = Cursor::new(&stream.tokens, &buffer);
        let err = parse_document(&mut cursor).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::KeyError);
    }

    #[test]
    fn root_blank_line_stays_a_single_map() {
        let value = parse("a: 1\n\nb: 2\n");
        let root = value.as_map().unwrap();
        assert_eq!(root.get(&"a".into()), Some(&Value::Int(1)));
        assert_eq!(root.get(&"b".into()), Some(&Value::Int(2)));
    }

    #[test]
    fn root_duplicate_key_across_blank_line_still_errors() {
        use crate::error::ErrorKind;
        let buffer = SourceBuffer::new(b"a: 1\n\na: 2\n").unwrap();
        let stream = lexer::tokenize(&buffer, &LexerConfig::default(), 0).unwrap();
        let mut cursor = Cursor::new(&stream.tokens, &buffer);
        let err = parse_document(&mut cursor).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::KeyError);
    }
}
