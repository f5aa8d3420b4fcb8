//! A peekable, non-backtracking token cursor (spec.md §9 "Look-ahead budget").
//!
//!     Both parsers need at most two tokens of look-ahead, so a simple index
//!     into the already-materialized token slice is enough; neither parser
//!     ever needs to rewind.

use crate::error::{ErrorKind, FlexConfError};
use crate::lexer::token::{Token, TokenKind};
use crate::source::SourceBuffer;

pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
    buffer: &'a SourceBuffer,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [Token], buffer: &'a SourceBuffer) -> Self {
        Self { tokens, pos: 0, buffer }
    }

    pub fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    /// The kind of the token one past the current one; `Eof`'s kind if the
    /// stream ends before then (the stream always ends in a real `Eof`
    /// token, so this never indexes out of bounds).
    pub fn peek2_kind(&self) -> TokenKind {
        self.tokens
            .get(self.pos + 1)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    pub fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos.min(self.tokens.len() - 1)].clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, FlexConfError> {
        if self.peek_kind() == kind {
            Ok(self.advance())
        } else {
            let tok = self.peek().clone();
            Err(self.buffer.error(
                ErrorKind::SyntaxError,
                format!("expected {kind:?}, found {:?}", tok.kind),
                tok.span,
            ))
        }
    }

    pub fn syntax_error(&self, message: impl Into<String>) -> FlexConfError {
        self.buffer.error(ErrorKind::SyntaxError, message, self.peek().span)
    }

    pub fn buffer(&self) -> &'a SourceBuffer {
        self.buffer
    }
}
