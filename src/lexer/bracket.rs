//! Bracket-mode tokenization (spec.md §4.3 "Bracket-mode token stream").
//!
//!     Whitespace, including newlines, is insignificant outside strings, so
//!     this driver is a straight loop over [`common::scan_one`] with
//!     `newline_is_whitespace = true` and no indent bookkeeping at all;
//!     the counterpart complexity lives entirely in `indent.rs`.

use crate::config::{DocumentMode, LexerConfig};
use crate::error::FlexConfError;
use crate::lexer::common::{scan_one, ScanOutcome};
use crate::lexer::token::{Token, TokenKind};
use crate::source::SourceBuffer;

pub fn tokenize(
    buffer: &SourceBuffer,
    cfg: &LexerConfig,
    start: usize,
) -> Result<Vec<Token>, FlexConfError> {
    let text = buffer.text();
    let mut tokens = Vec::new();
    let mut pos = start;

    loop {
        match scan_one(text, pos, cfg, buffer, true, DocumentMode::Bracket)? {
            ScanOutcome::Token(tok, new_pos) => {
                tokens.push(tok);
                pos = new_pos;
            }
            ScanOutcome::Skip(new_pos) => pos = new_pos,
            ScanOutcome::Eof => break,
        }
    }

    tokens.push(Token::new(TokenKind::Eof, buffer.span(text.len(), 0)));
    Ok(tokens)
}
