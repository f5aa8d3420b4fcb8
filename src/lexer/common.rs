//! Single-token scanning shared by the indentation and bracket drivers.
//!
//!     Both document modes agree on everything except how whitespace,
//!     newlines, and the dynamic punctuation classify; that difference is
//!     threaded in explicitly via `newline_is_whitespace` and
//!     [`DocumentMode`], rather than duplicating the literal-decoding logic
//!     in two places.

use crate::config::{DocumentMode, LexerConfig};
use crate::error::{ErrorKind, FlexConfError};
use crate::lexer::raw::{self, RawToken};
use crate::lexer::string;
use crate::lexer::token::{Literal, Token, TokenKind};
use crate::source::SourceBuffer;

pub enum ScanOutcome {
    Token(Token, usize),
    Skip(usize),
    Eof,
}

/// Scans a single token (or a run of insignificant input) at `pos`.
pub fn scan_one(
    text: &str,
    pos: usize,
    cfg: &LexerConfig,
    buffer: &SourceBuffer,
    newline_is_whitespace: bool,
    mode: DocumentMode,
) -> Result<ScanOutcome, FlexConfError> {
    if pos >= text.len() {
        return Ok(ScanOutcome::Eof);
    }
    let ch = text[pos..].chars().next().unwrap();

    if ch == ' ' || ch == '\t' {
        return Ok(ScanOutcome::Skip(pos + ch.len_utf8()));
    }
    if ch == '\n' {
        return if newline_is_whitespace {
            Ok(ScanOutcome::Skip(pos + 1))
        } else {
            Ok(ScanOutcome::Eof)
        };
    }
    if ch == cfg.line_comment {
        let end = text[pos..].find('\n').map(|i| pos + i).unwrap_or(text.len());
        return Ok(ScanOutcome::Skip(end));
    }

    let Some((raw, range)) = raw::next_one(text, pos) else {
        return Err(buffer.error(
            ErrorKind::SyntaxError,
            format!("unexpected character `{ch}`"),
            buffer.span(pos, ch.len_utf8()),
        ));
    };

    let (kind_and_value, new_end) = decode_raw(text, &raw, &range, buffer)?;
    let span = buffer.span(range.start, new_end - range.start);
    let token = match kind_and_value {
        RawDecoded::Plain(kind) => Token::new(kind, span),
        RawDecoded::Literal(kind, value) => Token::with_value(kind, value, span),
        RawDecoded::Symbol(c) => {
            let kind = classify_symbol(c, cfg, mode)
                .map_err(|(kind, msg)| buffer.error(kind, msg, span))?;
            Token::new(kind, span)
        }
    };
    Ok(ScanOutcome::Token(token, new_end))
}

enum RawDecoded {
    Plain(TokenKind),
    Literal(TokenKind, Literal),
    Symbol(char),
}

fn decode_raw(
    text: &str,
    raw: &RawToken,
    range: &std::ops::Range<usize>,
    buffer: &SourceBuffer,
) -> Result<(RawDecoded, usize), FlexConfError> {
    use crate::lexer::number::{decode_decimal, decode_radix, Radix};

    let number_err = |e: String| buffer.error(ErrorKind::NumberError, e, buffer.span(range.start, range.len()));
    let syntax_err = |e: String| buffer.error(ErrorKind::SyntaxError, e, buffer.span(range.start, range.len()));

    let (decoded, end) = match raw {
        RawToken::Ident(s) => (
            RawDecoded::Literal(TokenKind::Ident, Literal::Str(s.clone())),
            range.end,
        ),
        RawToken::True => (RawDecoded::Literal(TokenKind::Bool, Literal::Bool(true)), range.end),
        RawToken::False => (RawDecoded::Literal(TokenKind::Bool, Literal::Bool(false)), range.end),
        RawToken::Null => (RawDecoded::Plain(TokenKind::Null), range.end),
        RawToken::PosInf => (
            RawDecoded::Literal(TokenKind::Float, Literal::Float(f64::INFINITY)),
            range.end,
        ),
        RawToken::NegInf => (
            RawDecoded::Literal(TokenKind::Float, Literal::Float(f64::NEG_INFINITY)),
            range.end,
        ),
        RawToken::Nan => (
            RawDecoded::Literal(TokenKind::Float, Literal::Float(f64::NAN)),
            range.end,
        ),
        RawToken::DecimalNumber(s) => {
            let lit = decode_decimal(s).map_err(number_err)?;
            (RawDecoded::Literal(literal_kind(&lit), lit), range.end)
        }
        RawToken::HexNumber(s) => {
            let lit = decode_radix(s, Radix::Hex).map_err(number_err)?;
            (RawDecoded::Literal(literal_kind(&lit), lit), range.end)
        }
        RawToken::OctNumber(s) => {
            let lit = decode_radix(s, Radix::Octal).map_err(number_err)?;
            (RawDecoded::Literal(literal_kind(&lit), lit), range.end)
        }
        RawToken::BinNumber(s) => {
            let lit = decode_radix(s, Radix::Binary).map_err(number_err)?;
            (RawDecoded::Literal(literal_kind(&lit), lit), range.end)
        }
        RawToken::MultiBasicQuote => {
            let (s, end) = string::scan_multiline_basic(text, range.end).map_err(syntax_err)?;
            (RawDecoded::Literal(TokenKind::Str, Literal::Str(s)), end)
        }
        RawToken::MultiLiteralQuote => {
            let (s, end) = string::scan_multiline_literal(text, range.end).map_err(syntax_err)?;
            (RawDecoded::Literal(TokenKind::Str, Literal::Str(s)), end)
        }
        RawToken::BasicQuote => {
            let (s, end) = string::scan_basic(text, range.end).map_err(syntax_err)?;
            (RawDecoded::Literal(TokenKind::Str, Literal::Str(s)), end)
        }
        RawToken::LiteralQuote => {
            let (s, end) = string::scan_literal(text, range.end).map_err(syntax_err)?;
            (RawDecoded::Literal(TokenKind::Str, Literal::Str(s)), end)
        }
        RawToken::Backtick => {
            let (s, end) = string::scan_backtick_key(text, range.end).map_err(syntax_err)?;
            (RawDecoded::Literal(TokenKind::Ident, Literal::Str(s)), end)
        }
        RawToken::Symbol(c) => (RawDecoded::Symbol(*c), range.end),
    };
    Ok((decoded, end))
}

fn literal_kind(lit: &Literal) -> TokenKind {
    match lit {
        Literal::Int(_) | Literal::BigInt(_) => TokenKind::Int,
        Literal::Float(_) => TokenKind::Float,
        Literal::Bool(_) => TokenKind::Bool,
        Literal::Str(_) => TokenKind::Str,
    }
}

fn classify_symbol(
    c: char,
    cfg: &LexerConfig,
    mode: DocumentMode,
) -> Result<TokenKind, (ErrorKind, String)> {
    if c == cfg.kv_sep {
        return Ok(TokenKind::KvSep);
    }
    match mode {
        DocumentMode::Bracket => {
            if c == cfg.block_open {
                Ok(TokenKind::BlockOpen)
            } else if c == cfg.block_close {
                Ok(TokenKind::BlockClose)
            } else if c == cfg.bracket_item_sep {
                Ok(TokenKind::ItemSep)
            } else {
                Err((ErrorKind::SyntaxError, format!("unexpected character `{c}`")))
            }
        }
        DocumentMode::Indentation => {
            if c == cfg.block_open || c == cfg.block_close {
                Err((
                    ErrorKind::ModeMismatchError,
                    format!("`{c}` is a bracket-mode delimiter; this document uses indentation mode"),
                ))
            } else {
                Err((ErrorKind::SyntaxError, format!("unexpected character `{c}`")))
            }
        }
    }
}
