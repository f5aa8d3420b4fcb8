//! Tokenization entry point: mode detection plus dispatch to the
//! indentation or bracket driver (spec.md §4.3).

pub mod bracket;
pub mod common;
pub mod indent;
pub mod number;
pub mod raw;
pub mod string;
pub mod token;

use crate::config::{DocumentMode, LexerConfig};
use crate::error::FlexConfError;
use crate::source::SourceBuffer;
use token::Token;

/// The result of tokenizing a whole document: which mode was frozen, and the
/// full token stream under it (always terminated by `Eof`).
pub struct TokenStream {
    pub mode: DocumentMode,
    pub tokens: Vec<Token>,
}

/// Tokenizes `buffer` starting at `start` (the offset just past pragma
/// preprocessing): detects the document mode from the first significant
/// code point, then dispatches to the matching driver.
pub fn tokenize(buffer: &SourceBuffer, cfg: &LexerConfig, start: usize) -> Result<TokenStream, FlexConfError> {
    let mode = detect_mode(buffer, cfg, start);
    let tokens = match mode {
        DocumentMode::Bracket => bracket::tokenize(buffer, cfg, start)?,
        DocumentMode::Indentation => indent::tokenize(buffer, cfg, start)?,
    };
    Ok(TokenStream { mode, tokens })
}

/// Skips whitespace and comment lines from `start` and inspects the first
/// significant code point: `block_open` means Bracket mode, anything else
/// (including end of input) means Indentation mode (spec.md §4.3 "Mode
/// detection").
fn detect_mode(buffer: &SourceBuffer, cfg: &LexerConfig, start: usize) -> DocumentMode {
    let text = buffer.text();
    let mut pos = start;
    loop {
        let Some(ch) = text[pos..].chars().next() else {
            return DocumentMode::Indentation;
        };
        if ch == ' ' || ch == '\t' || ch == '\n' {
            pos += ch.len_utf8();
            continue;
        }
        if ch == cfg.line_comment {
            pos = text[pos..].find('\n').map(|i| pos + i).unwrap_or(text.len());
            continue;
        }
        return if ch == cfg.block_open {
            DocumentMode::Bracket
        } else {
            DocumentMode::Indentation
        };
    }
}
