//! Core tokenization via `logos`.
//!
//!     FlexConf's punctuation is partly dynamic (`block_open`, `block_close`,
//!     `kv_sep`, `bracket_item_sep` are pragma-configurable) and partly fixed
//!     (identifiers, literals, quote characters, the comment marker). `logos`
//!     only handles the fixed, regular part well; a derive-time regex can't
//!     see a runtime [`LexerConfig`](crate::config::LexerConfig), so the
//!     dynamic delimiters fall through to [`RawToken::Symbol`] and get their
//!     meaning assigned by the config-aware classification stage
//!     (`indent::reindent`, `bracket::tokenize`) instead of by the lexer
//!     itself. This keeps delimiter handling threaded through the config at
//!     every classification site, per spec.md §9, rather than hardcoded.
//!
//!     String bodies are *not* matched by regex: `logos` only recognizes the
//!     opening delimiter, and [`crate::lexer::string`] takes over from there
//!     with a hand-written scanner, since triple-quoted multiline forms with
//!     escapes are not practical to express as a single regular expression.

use logos::Logos;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t]+")]
#[logos(skip r"#[^\n]*")]
pub enum RawToken {
    #[regex(r"[A-Za-z_][A-Za-z0-9_.-]*", |lex| lex.slice().to_string(), priority = 4)]
    Ident(String),

    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,
    #[token("+inf")]
    PosInf,
    #[token("-inf")]
    NegInf,
    #[token("nan")]
    Nan,

    #[regex(r"[+-]?[0-9_]+(\.[0-9_]+)?([eE][+-]?[0-9_]+)?", |lex| lex.slice().to_string(), priority = 3)]
    DecimalNumber(String),
    #[regex(r"0[xX][0-9A-Fa-f_]+", |lex| lex.slice().to_string())]
    HexNumber(String),
    #[regex(r"0[oO][0-7_]+", |lex| lex.slice().to_string())]
    OctNumber(String),
    #[regex(r"0[bB][01_]+", |lex| lex.slice().to_string())]
    BinNumber(String),

    #[token("\"\"\"")]
    MultiBasicQuote,
    #[token("'''")]
    MultiLiteralQuote,
    #[token("\"")]
    BasicQuote,
    #[token("'")]
    LiteralQuote,
    #[token("`")]
    Backtick,

    #[regex(r".", |lex| lex.slice().chars().next().unwrap(), priority = 0)]
    Symbol(char),
}

/// Scans exactly one raw token starting at `pos`. Used by the mode-specific
/// drivers, which need to interleave indentation and string-literal handling
/// between individual tokens rather than consuming a whole stream at once.
pub fn next_one(text: &str, pos: usize) -> Option<(RawToken, std::ops::Range<usize>)> {
    let (res, range) = RawToken::lexer(&text[pos..]).spanned().next()?;
    let tok = res.ok()?;
    Some((tok, (range.start + pos)..(range.end + pos)))
}

/// Runs the raw lexer over `text`, returning `(token, byte_range)` pairs.
/// `base_offset` is added to every byte range so slices of a larger buffer
/// (one physical line, in indentation mode) still report absolute offsets.
pub fn tokenize(text: &str, base_offset: usize) -> Vec<(RawToken, std::ops::Range<usize>)> {
    RawToken::lexer(text)
        .spanned()
        .filter_map(|(res, range)| {
            res.ok()
                .map(|tok| (tok, (range.start + base_offset)..(range.end + base_offset)))
        })
        .collect()
}
