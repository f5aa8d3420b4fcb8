//! Indentation-mode tokenization: the indent stack and blank-line semantics
//! (spec.md §4.3, §4.7 "Indent stack transitions").
//!
//!     Indentation is tracked with an explicit `Vec<usize>` stack rather than
//!     recursion, so error recovery and the EOF unwind stay simple and the
//!     recursion depth of the later parser is decoupled from nesting depth
//!     (spec.md §9).

use crate::config::{DocumentMode, LexerConfig};
use crate::error::{ErrorKind, FlexConfError};
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
    let mut stack: Vec<usize> = vec![0];
    let mut base_unit: Option<usize> = None;
    let mut pending_blank = false;
    let mut last_emitted: Option<TokenKind> = None;
    let mut pos = start;

    while pos < text.len() {
        let (width, content_start) = measure_indent(text, pos, buffer)?;

        let blank_or_comment = content_start >= text.len()
            || text[content_start..].starts_with('\n')
            || text[content_start..].chars().next() == Some(cfg.line_comment);

        if blank_or_comment {
            let line_end = text[content_start..]
                .find('\n')
                .map(|i| content_start + i)
                .unwrap_or(text.len());
            pos = if line_end < text.len() { line_end + 1 } else { text.len() };
            pending_blank = true;
            continue;
        }

        let top = *stack.last().unwrap();
        if width > top {
            match base_unit {
                None => base_unit = Some(width),
                Some(unit) => {
                    if (width - top) % unit != 0 {
                        return Err(buffer.error(
                            ErrorKind::IndentationError,
                            format!(
                                "indent width {width} is not a multiple of the base indent unit ({unit})"
                            ),
                            buffer.span(content_start, 0),
                        ));
                    }
                }
            }
            stack.push(width);
            tokens.push(Token::new(TokenKind::Indent, buffer.span(content_start, 0)));
            last_emitted = Some(TokenKind::Indent);
            pending_blank = false;
        } else if width < top {
            pending_blank = false;
            while *stack.last().unwrap() > width {
                stack.pop();
                tokens.push(Token::new(TokenKind::Dedent, buffer.span(content_start, 0)));
                last_emitted = Some(TokenKind::Dedent);
            }
            if *stack.last().unwrap() != width {
                return Err(buffer.error(
                    ErrorKind::IndentationError,
                    "unindent does not match any outer indentation level".to_string(),
                    buffer.span(content_start, 0),
                ));
            }
        } else if pending_blank {
            match last_emitted {
                None | Some(TokenKind::Indent) => {}
                _ => {
                    tokens.push(Token::new(TokenKind::Newline, buffer.span(content_start, 0)));
                    last_emitted = Some(TokenKind::Newline);
                }
            }
            pending_blank = false;
        }

        pos = tokenize_line(text, content_start, cfg, buffer, &mut tokens)?;
        last_emitted = tokens.last().map(|t| t.kind);
    }

    while stack.len() > 1 {
        stack.pop();
        tokens.push(Token::new(TokenKind::Dedent, buffer.span(text.len(), 0)));
    }
    tokens.push(Token::new(TokenKind::Eof, buffer.span(text.len(), 0)));

    Ok(tokens)
}

/// Scans leading spaces, rejecting tabs. Returns the indent width and the
/// byte offset of the first non-space character (which may be `\n` or EOF).
fn measure_indent(text: &str, pos: usize, buffer: &SourceBuffer) -> Result<(usize, usize), FlexConfError> {
    let mut width = 0;
    let mut idx = pos;
    for ch in text[pos..].chars() {
        match ch {
            ' ' => {
                width += 1;
                idx += 1;
            }
            '\t' => {
                return Err(buffer.error(
                    ErrorKind::IndentationError,
                    "tab not allowed in indentation".to_string(),
                    buffer.span(idx, 1),
                ));
            }
            _ => break,
        }
    }
    Ok((width, idx))
}

/// Tokenizes the content of one logical line, starting right after its
/// leading indentation, up to and including its terminating newline.
/// Returns the byte offset of the start of the next physical line.
fn tokenize_line(
    text: &str,
    mut pos: usize,
    cfg: &LexerConfig,
    buffer: &SourceBuffer,
    tokens: &mut Vec<Token>,
) -> Result<usize, FlexConfError> {
    loop {
        match scan_one(text, pos, cfg, buffer, false, DocumentMode::Indentation)? {
            ScanOutcome::Token(tok, new_pos) => {
                tokens.push(tok);
                pos = new_pos;
            }
            ScanOutcome::Skip(new_pos) => pos = new_pos,
            ScanOutcome::Eof => {
                let newline_here = text[pos..].starts_with('\n');
                let span = buffer.span(pos, if newline_here { 1 } else { 0 });
                tokens.push(Token::new(TokenKind::Newline, span));
                return Ok(if newline_here { pos + 1 } else { text.len() });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LexerConfig;

    fn toks(src: &str) -> Vec<TokenKind> {
        let buffer = SourceBuffer::new(src.as_bytes()).unwrap();
        let cfg = LexerConfig::default();
        tokenize(&buffer, &cfg, 0).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn simple_scalar_map() {
        use TokenKind::*;
        let kinds = toks("a: 1\nb: 2\n");
        assert_eq!(kinds, vec![Ident, KvSep, Int, Newline, Ident, KvSep, Int, Newline, Eof]);
    }

    #[test]
    fn nested_map_produces_indent_dedent() {
        use TokenKind::*;
        let kinds = toks("server:\n    host: \"x\"\n");
        assert_eq!(
            kinds,
            vec![Ident, KvSep, Newline, Indent, Ident, KvSep, Str, Newline, Dedent, Eof]
        );
    }

    #[test]
    fn tab_in_indentation_errors() {
        let buffer = SourceBuffer::new(b"a:\n\thost: 1\n").unwrap();
        let err = tokenize(&buffer, &LexerConfig::default(), 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IndentationError);
    }

    #[test]
    fn dedent_not_matching_any_level_errors() {
        let src = "a:\n    b:\n        c: 1\n  d: 2\n";
        let buffer = SourceBuffer::new(src.as_bytes()).unwrap();
        let err = tokenize(&buffer, &LexerConfig::default(), 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IndentationError);
    }

    #[test]
    fn block_open_outside_string_is_mode_mismatch() {
        let src = "a: 1\n{b: 2}\n";
        let buffer = SourceBuffer::new(src.as_bytes()).unwrap();
        let err = tokenize(&buffer, &LexerConfig::default(), 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ModeMismatchError);
        assert_eq!(err.span().line, 2);
        assert_eq!(err.span().column, 1);
    }

    #[test]
    fn blank_line_inside_list_emits_single_newline() {
        use TokenKind::*;
        let src = "protocols:\n    name: \"http\"\n\n    name: \"https\"\n";
        let kinds = toks(src);
        assert_eq!(
            kinds,
            vec![
                Ident, KvSep, Newline, Indent, Ident, KvSep, Str, Newline, Newline, Ident, KvSep, Str,
                Newline, Dedent, Eof
            ]
        );
    }

    #[test]
    fn trailing_blank_lines_before_eof_are_suppressed() {
        use TokenKind::*;
        let kinds = toks("a: 1\n\n\n");
        assert_eq!(kinds, vec![Ident, KvSep, Int, Newline, Eof]);
    }
}
