//! Container construction: duplicate-key rejection and the integer-keyed-map
//! → sequence promotion (spec.md §4.6, §9 "Unified container model").
//!
//!     Neither parser actually builds an intermediate integer-keyed `Map` for
//!     lists; both build a `Vec<Value>` directly, so `finalize_map` only
//!     ever promotes a genuinely integer-keyed user map (bare keys `0`, `1`,
//!     `2`, …). It still exists as a distinct step so the promotion rule has
//!     one place to live, matching the design note that the two
//!     representations must be indistinguishable once built.

use crate::error::{ErrorKind, FlexConfError, Span};
use crate::source::SourceBuffer;
use crate::value::{Key, Map, Value};

/// Inserts `key` → `value`, rejecting a key already present at this level.
pub fn insert_unique(
    map: &mut Map,
    key: Key,
    value: Value,
    key_span: Span,
    buffer: &SourceBuffer,
) -> Result<(), FlexConfError> {
    if map.contains_key(&key) {
        return Err(buffer.error(
            ErrorKind::KeyError,
            format!("duplicate key `{key}`"),
            key_span,
        ));
    }
    map.push(key, value);
    Ok(())
}

/// Promotes a completed Keyed block's map to a `Seq` if its keys form the
/// canonical `0`, `1`, `2`, … sequence; an empty map stays a `Map` per the
/// adopted default for `{}` (spec.md §9 Open Questions).
pub fn finalize_map(map: Map) -> Value {
    if !map.is_empty() && map.is_integer_keyed_sequence() {
        Value::Seq(map.into_seq_values())
    } else {
        Value::Map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceBuffer;

    fn buf() -> SourceBuffer {
        SourceBuffer::new(b"x").unwrap()
    }

    #[test]
    fn rejects_duplicate_key() {
        let buffer = buf();
        let mut map = Map::new();
        insert_unique(&mut map, Key::new("a"), Value::Int(1), buffer.span(0, 1), &buffer).unwrap();
        let err = insert_unique(&mut map, Key::new("a"), Value::Int(2), buffer.span(0, 1), &buffer).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::KeyError);
    }

    #[test]
    fn empty_map_is_not_promoted() {
        assert!(matches!(finalize_map(Map::new()), Value::Map(_)));
    }

    #[test]
    fn integer_keyed_map_promotes_to_seq() {
        let mut map = Map::new();
        map.push(Key::new("0"), Value::Str("a".into()));
        map.push(Key::new("1"), Value::Str("b".into()));
        let value = finalize_map(map);
        assert_eq!(value.as_seq().unwrap().len(), 2);
    }

    #[test]
    fn non_sequential_keys_stay_a_map() {
        let mut map = Map::new();
        map.push(Key::new("0"), Value::Int(1));
        map.push(Key::new("2"), Value::Int(2));
        assert!(matches!(finalize_map(map), Value::Map(_)));
    }
}
