//! Pragma preprocessor.
//!
//!     Scans the leading run of blank and comment lines for `#?>` directives
//!     and folds them into a [`LexerConfig`]. Stops at the first line that is
//!     neither blank nor a comment; everything after that is opaque to this
//!     stage (spec.md §4.2).

use crate::config::LexerConfig;
use crate::error::{ErrorKind, FlexConfError};
use crate::source::SourceBuffer;

/// Applies every leading `#?>` directive in `buffer` and returns the
/// resulting config together with the byte offset where pragma/comment
/// scanning stopped (the start of the first data line, or the end of input).
pub fn preprocess(buffer: &SourceBuffer) -> Result<(LexerConfig, usize), FlexConfError> {
    let mut cfg = LexerConfig::default();
    let text = buffer.text();
    let mut offset = 0;

    for line in SourceLines::new(text) {
        let trimmed = line.content.trim();

        if trimmed.is_empty() {
            offset = line.end;
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix(cfg.pragma_prefix) {
            apply_directive(&mut cfg, rest, buffer, line.start)?;
            offset = line.end;
            continue;
        }

        if trimmed.starts_with(cfg.line_comment) {
            offset = line.end;
            continue;
        }

        // First data line: pragma phase is over.
        return Ok((cfg, line.start));
    }

    Ok((cfg, offset.max(text.len())))
}

fn apply_directive(
    cfg: &mut LexerConfig,
    rest: &str,
    buffer: &SourceBuffer,
    line_start: usize,
) -> Result<(), FlexConfError> {
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    let pragma_err = |msg: String| buffer.error(ErrorKind::PragmaError, msg, buffer.span(line_start, 0));

    let Some(&verb) = tokens.first() else {
        return Err(pragma_err("empty pragma directive".into()));
    };

    match verb {
        "SET" => apply_set(cfg, &tokens[1..], buffer, line_start),
        other => Err(pragma_err(format!("unknown pragma verb `{other}`"))),
    }
}

fn apply_set(
    cfg: &mut LexerConfig,
    args: &[&str],
    buffer: &SourceBuffer,
    line_start: usize,
) -> Result<(), FlexConfError> {
    let pragma_err = |msg: String| buffer.error(ErrorKind::PragmaError, msg, buffer.span(line_start, 0));

    let Some(&target) = args.first() else {
        return Err(pragma_err("SET directive missing a target".into()));
    };

    match target {
        "BLOCKIDENTIFIER" => {
            let [open, close] = parse_n_args::<2>(&args[1..], &pragma_err)?;
            validate_delim(open, cfg, &[], &pragma_err)?;
            validate_delim(close, cfg, &[open], &pragma_err)?;
            if open == close {
                return Err(pragma_err("block open and close delimiters must differ".into()));
            }
            cfg.block_open = open;
            cfg.block_close = close;
            Ok(())
        }
        "KVSEP" => {
            let [sep] = parse_n_args::<1>(&args[1..], &pragma_err)?;
            validate_delim(sep, cfg, &[], &pragma_err)?;
            cfg.kv_sep = sep;
            Ok(())
        }
        "SPLITER" => {
            let [sep] = parse_n_args::<1>(&args[1..], &pragma_err)?;
            validate_delim(sep, cfg, &[], &pragma_err)?;
            cfg.bracket_item_sep = sep;
            Ok(())
        }
        other => Err(pragma_err(format!("unknown SET target `{other}`"))),
    }
}

fn parse_n_args<const N: usize>(
    args: &[&str],
    pragma_err: &impl Fn(String) -> FlexConfError,
) -> Result<[char; N], FlexConfError> {
    if args.len() != N {
        return Err(pragma_err(format!(
            "expected {N} quoted character argument(s), found {}",
            args.len()
        )));
    }
    let mut out = ['\0'; N];
    for (i, raw) in args.iter().enumerate() {
        out[i] = parse_quoted_char(raw, pragma_err)?;
    }
    Ok(out)
}

fn parse_quoted_char(
    raw: &str,
    pragma_err: &impl Fn(String) -> FlexConfError,
) -> Result<char, FlexConfError> {
    let inner = raw
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .ok_or_else(|| pragma_err(format!("argument `{raw}` must be single-quoted")))?;
    let mut chars = inner.chars();
    let c = chars
        .next()
        .ok_or_else(|| pragma_err("quoted argument must contain exactly one code point".into()))?;
    if chars.next().is_some() {
        return Err(pragma_err(
            "quoted argument must contain exactly one code point".into(),
        ));
    }
    Ok(c)
}

/// Rejects a delimiter that collides with a reserved character or with any
/// currently active delimiter other than the ones listed in `excluding`
/// (the delimiter(s) this same directive is replacing).
fn validate_delim(
    c: char,
    cfg: &LexerConfig,
    excluding: &[char],
    pragma_err: &impl Fn(String) -> FlexConfError,
) -> Result<(), FlexConfError> {
    if LexerConfig::is_reserved(c) {
        return Err(pragma_err(format!(
            "delimiter `{c}` collides with a reserved character"
        )));
    }
    for active in cfg.active_delimiters() {
        if active == c && !excluding.contains(&active) {
            return Err(pragma_err(format!(
                "delimiter `{c}` collides with an already configured delimiter"
            )));
        }
    }
    Ok(())
}

struct SourceLines<'a> {
    text: &'a str,
    pos: usize,
}

struct Line<'a> {
    content: &'a str,
    start: usize,
    end: usize,
}

impl<'a> SourceLines<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl<'a> Iterator for SourceLines<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Line<'a>> {
        if self.pos >= self.text.len() {
            return None;
        }
        let start = self.pos;
        let rest = &self.text[start..];
        let (content, advance) = match rest.find('\n') {
            Some(nl) => (rest[..nl].trim_end_matches('\r'), nl + 1),
            None => (rest, rest.len()),
        };
        self.pos = start + advance;
        Some(Line {
            content,
            start,
            end: self.pos,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_pragma_yields_defaults() {
        let buf = SourceBuffer::new(b"a: 1\n").unwrap();
        let (cfg, offset) = preprocess(&buf).unwrap();
        assert_eq!(cfg, LexerConfig::default());
        assert_eq!(offset, 0);
    }

    #[test]
    fn set_block_identifier_pragma() {
        let buf = SourceBuffer::new(b"#?> SET BLOCKIDENTIFIER '[' ']'\n[ a: 1 ]\n").unwrap();
        let (cfg, offset) = preprocess(&buf).unwrap();
        assert_eq!(cfg.block_open, '[');
        assert_eq!(cfg.block_close, ']');
        assert_eq!(&buf.text()[offset..offset + 1], "[");
    }

    #[test]
    fn unknown_verb_is_pragma_error() {
        let buf = SourceBuffer::new(b"#?> FROB 'x'\na: 1\n").unwrap();
        let err = preprocess(&buf).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PragmaError);
    }

    #[test]
    fn collision_with_reserved_char_is_rejected() {
        let buf = SourceBuffer::new(b"#?> SET KVSEP '#'\na: 1\n").unwrap();
        let err = preprocess(&buf).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PragmaError);
    }

    #[test]
    fn leading_comments_and_blanks_are_skipped() {
        let buf = SourceBuffer::new(b"# just a comment\n\na: 1\n").unwrap();
        let (_, offset) = preprocess(&buf).unwrap();
        assert_eq!(&buf.text()[offset..], "a: 1\n");
    }
}
