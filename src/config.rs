//! Lexer configuration and document mode.
//!
//!     The Lexer Config (spec.md §3) is mutable only while the pragma
//!     preprocessor runs; it is frozen before the first data token and
//!     threaded by reference through every subsequent classification site
//!     instead of baking delimiters in as constants (spec.md §9).

use once_cell::sync::Lazy;
use std::collections::HashSet;

static RESERVED_CHARS: Lazy<HashSet<char>> = Lazy::new(|| ['#', '"', '\'', '\\', '`'].into_iter().collect());

/// The delimiter and separator set a document's lexer operates under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerConfig {
    pub block_open: char,
    pub block_close: char,
    pub kv_sep: char,
    pub bracket_item_sep: char,
    pub line_comment: char,
    pub pragma_prefix: &'static str,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            block_open: '{',
            block_close: '}',
            kv_sep: ':',
            bracket_item_sep: ',',
            line_comment: '#',
            pragma_prefix: "#?>",
        }
    }
}

impl LexerConfig {
    /// Characters that can never be used as a delimiter, regardless of what
    /// pragma tries to assign: comment marker, the two quote characters, the
    /// escape character, and the backtick used for quoted keys.
    pub fn is_reserved(c: char) -> bool {
        RESERVED_CHARS.contains(&c)
    }

    /// Every delimiter currently configured, used to reject a pragma that
    /// would collide two configured delimiters with each other.
    pub fn active_delimiters(&self) -> [char; 4] {
        [
            self.block_open,
            self.block_close,
            self.kv_sep,
            self.bracket_item_sep,
        ]
    }
}

/// The two mutually exclusive surface syntaxes (spec.md §3 "Document Mode").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentMode {
    Indentation,
    Bracket,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_chars_cannot_be_reassigned() {
        assert!(LexerConfig::is_reserved('"'));
        assert!(LexerConfig::is_reserved('`'));
        assert!(!LexerConfig::is_reserved('['));
    }
}
