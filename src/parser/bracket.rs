//! Parser, Bracket Mode (spec.md §4.5).

use crate::builder;
use crate::error::FlexConfError;
use crate::lexer::token::TokenKind;
use crate::value::{Map, Value};

use super::cursor::Cursor;
use super::{key_from_token, scalar_value};

pub fn parse_document(cursor: &mut Cursor) -> Result<Value, FlexConfError> {
    let value = parse_value(cursor)?;
    cursor.expect(TokenKind::Eof)?;
    Ok(value)
}

fn parse_value(cursor: &mut Cursor) -> Result<Value, FlexConfError> {
    if cursor.peek_kind() == TokenKind::BlockOpen {
        parse_block(cursor)
    } else {
        let tok = cursor.advance();
        scalar_value(&tok, cursor.buffer())
    }
}

fn parse_block(cursor: &mut Cursor) -> Result<Value, FlexConfError> {
    cursor.expect(TokenKind::BlockOpen)?;

    if cursor.peek_kind() == TokenKind::BlockClose {
        cursor.advance();
        return Ok(builder::finalize_map(Map::new()));
    }

    let keyed = cursor.peek_kind() == TokenKind::Ident && cursor.peek2_kind() == TokenKind::KvSep;
    let value = if keyed {
        parse_keyed_items(cursor)?
    } else {
        parse_positional_items(cursor)?
    };

    expect_close(cursor)?;
    Ok(value)
}

fn parse_keyed_items(cursor: &mut Cursor) -> Result<Value, FlexConfError> {
    let mut map = Map::new();
    loop {
        let key_tok = cursor.expect(TokenKind::Ident)?;
        let key_span = key_tok.span;
        let key = key_from_token(&key_tok);
        cursor.expect(TokenKind::KvSep)?;
        let value = parse_value(cursor)?;
        builder::insert_unique(&mut map, key, value, key_span, cursor.buffer())?;

        if cursor.peek_kind() == TokenKind::ItemSep {
            cursor.advance();
            if cursor.peek_kind() == TokenKind::BlockClose {
                break;
            }
            continue;
        }
        break;
    }
    Ok(builder::finalize_map(map))
}

fn parse_positional_items(cursor: &mut Cursor) -> Result<Value, FlexConfError> {
    let mut items = Vec::new();
    loop {
        if cursor.peek_kind() == TokenKind::Ident && cursor.peek2_kind() == TokenKind::KvSep {
            return Err(cursor.syntax_error("mixed keyed and positional items in one block"));
        }
        items.push(parse_value(cursor)?);

        if cursor.peek_kind() == TokenKind::ItemSep {
            cursor.advance();
            if cursor.peek_kind() == TokenKind::BlockClose {
                break;
            }
            continue;
        }
        break;
    }
    Ok(Value::Seq(items))
}

fn expect_close(cursor: &mut Cursor) -> Result<(), FlexConfError> {
    if cursor.peek_kind() == TokenKind::BlockClose {
        cursor.advance();
        Ok(())
    } else {
        Err(cursor.syntax_error("unmatched brace"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LexerConfig;
    use crate::error::ErrorKind;
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
    fn s2_double_brace_list_of_maps() {
        let value = parse(
            r#"{ protocols: { { name: "http", port: 8080 }, { name: "https", port: 443 } } }"#,
        );
        let protocols = value.as_map().unwrap().get(&"protocols".into()).unwrap().as_seq().unwrap();
        assert_eq!(protocols.len(), 2);
        assert_eq!(
            protocols[0].as_map().unwrap().get(&"name".into()).unwrap().as_str(),
            Some("http")
        );
    }

    #[test]
    fn empty_block_is_empty_map() {
        let value = parse("{}");
        assert!(value.as_map().unwrap().is_empty());
    }

    #[test]
    fn trailing_item_sep_permitted() {
        let value = parse("{a: 1, b: 2,}");
        assert_eq!(value.as_map().unwrap().len(), 2);
    }

    #[test]
    fn s5_duplicate_key_errors() {
        let buffer = SourceBuffer::new(b"{a: 1, a: 2}").unwrap();
        let stream = lexer::tokenize(&buffer, &LexerConfig::default(), 0).unwrap();
        let mut cursor = Cursor::new(&stream.tokens, &buffer);
        let err = parse_document(&mut cursor).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::KeyError);
    }

    #[test]
    fn unmatched_brace_errors() {
        let buffer = SourceBuffer::new(b"{a: 1").unwrap();
        let stream = lexer::tokenize(&buffer, &LexerConfig::default(), 0).unwrap();
        let mut cursor = Cursor::new(&stream.tokens, &buffer);
        let err = parse_document(&mut cursor).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SyntaxError);
    }

    #[test]
    fn whitespace_idempotence() {
        let a = parse("{a: 1, b: 2}");
        let b = parse("{ a : 1 ,\n b : 2 }");
        assert_eq!(a, b);
    }
}
