//! The data model FlexConf documents parse into (spec.md §3 "Value", "Key").

use serde::{Deserialize, Serialize};
use std::fmt;

/// A FlexConf map or list key. Canonical form is a UTF-8 string; equality is
/// byte-exact on that string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Key(pub String);

impl Key {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::new(s)
    }
}

/// Order-preserving key→value mapping.
///
/// Backed by a `Vec` rather than a hash map: FlexConf documents are small
/// enough that linear key lookup is not a bottleneck, and a `Vec` makes
/// preserving source insertion order (spec.md §3, §8 "Order preservation")
/// free instead of something to maintain on top of a hash map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Map {
    entries: Vec<(Key, Value)>,
}

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Inserts `key`/`value`. Callers are responsible for the duplicate-key
    /// check (spec.md §4.6) before calling this; it always appends.
    pub fn push(&mut self, key: Key, value: Value) {
        self.entries.push((key, value));
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Key, Value)> {
        self.entries.iter()
    }

    pub fn into_iter(self) -> impl Iterator<Item = (Key, Value)> {
        self.entries.into_iter()
    }

    /// True if every key is a decimal integer literal `0`, `1`, `2`, … in
    /// strictly ascending order starting at zero; this is the shape the
    /// builder promotes to a `Seq` (spec.md §4.6, §9 "Unified container model").
    pub fn is_integer_keyed_sequence(&self) -> bool {
        self.entries
            .iter()
            .enumerate()
            .all(|(i, (k, _))| k.as_str() == i.to_string())
    }

    pub fn into_seq_values(self) -> Vec<Value> {
        self.entries.into_iter().map(|(_, v)| v).collect()
    }
}

/// FlexConf's tagged value union (spec.md §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    /// Arbitrary-precision fallback for integer literals outside `i64`
    /// range, stored as the canonical decimal digit string (spec.md §4.3, §9).
    BigInt(String),
    Float(f64),
    Str(String),
    Map(Map),
    Seq(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}
