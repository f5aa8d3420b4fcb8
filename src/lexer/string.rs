//! String literal decoding for all four forms (spec.md §4.3).
//!
//!     `logos` only recognizes the opening delimiter (see
//!     [`crate::lexer::raw`]); decoding the body, including escape
//!     processing for the two basic forms, happens here by scanning the
//!     source text directly, since triple-quoted multiline strings with
//!     embedded escapes are awkward to express as a single regex.

/// Decodes a basic (`"..."`) string starting right after the opening quote.
/// Returns the decoded value and the byte offset just past the closing quote.
pub fn scan_basic(text: &str, start: usize) -> Result<(String, usize), String> {
    scan_escaped(text, start, "\"")
}

/// Decodes a multiline basic (`"""..."""`) string. A newline immediately
/// after the opening delimiter is discarded.
pub fn scan_multiline_basic(text: &str, start: usize) -> Result<(String, usize), String> {
    let start = skip_immediate_newline(text, start);
    scan_escaped(text, start, "\"\"\"")
}

/// Decodes a literal (`'...'`) string: no escapes, verbatim until the
/// closing quote.
pub fn scan_literal(text: &str, start: usize) -> Result<(String, usize), String> {
    scan_verbatim(text, start, "'")
}

/// Decodes a multiline literal (`'''...'''`) string.
pub fn scan_multiline_literal(text: &str, start: usize) -> Result<(String, usize), String> {
    let start = skip_immediate_newline(text, start);
    scan_verbatim(text, start, "'''")
}

/// Decodes a backtick-quoted key: any code point except an unescaped
/// backtick; `` \` `` escapes a literal backtick.
pub fn scan_backtick_key(text: &str, start: usize) -> Result<(String, usize), String> {
    let mut out = String::new();
    let mut idx = start;
    let bytes = text.as_bytes();
    loop {
        if idx >= bytes.len() {
            return Err("unterminated backtick-quoted key".to_string());
        }
        let ch = text[idx..].chars().next().unwrap();
        if ch == '\\' && text[idx..].starts_with("\\`") {
            out.push('`');
            idx += 2;
            continue;
        }
        if ch == '`' {
            return Ok((out, idx + 1));
        }
        out.push(ch);
        idx += ch.len_utf8();
    }
}

fn skip_immediate_newline(text: &str, start: usize) -> usize {
    if text[start..].starts_with('\n') {
        start + 1
    } else if text[start..].starts_with("\r\n") {
        start + 2
    } else {
        start
    }
}

fn scan_verbatim(text: &str, start: usize, closer: &str) -> Result<(String, usize), String> {
    let rest = &text[start..];
    match rest.find(closer) {
        Some(rel) => Ok((rest[..rel].to_string(), start + rel + closer.len())),
        None => Err("unterminated string literal".to_string()),
    }
}

fn scan_escaped(text: &str, start: usize, closer: &str) -> Result<(String, usize), String> {
    let mut out = String::new();
    let mut idx = start;
    loop {
        if idx >= text.len() {
            return Err("unterminated string literal".to_string());
        }
        if text[idx..].starts_with(closer) {
            return Ok((out, idx + closer.len()));
        }
        let ch = text[idx..].chars().next().unwrap();
        if ch == '\\' {
            let (decoded, consumed) = decode_escape(&text[idx..])?;
            out.push(decoded);
            idx += consumed;
        } else {
            out.push(ch);
            idx += ch.len_utf8();
        }
    }
}

/// Decodes one `\X` escape sequence at the start of `s`. Returns the decoded
/// character and the number of bytes consumed (including the backslash).
fn decode_escape(s: &str) -> Result<(char, usize), String> {
    let mut chars = s.chars();
    chars.next(); // the backslash
    let Some(marker) = chars.next() else {
        return Err("dangling escape at end of string".to_string());
    };
    match marker {
        '"' => Ok(('"', 2)),
        '\\' => Ok(('\\', 2)),
        'b' => Ok(('\u{8}', 2)),
        'f' => Ok(('\u{c}', 2)),
        'n' => Ok(('\n', 2)),
        'r' => Ok(('\r', 2)),
        't' => Ok(('\t', 2)),
        'u' => decode_unicode_escape(s, 2, 4),
        'U' => decode_unicode_escape(s, 2, 8),
        other => Err(format!("invalid escape sequence `\\{other}`")),
    }
}

fn decode_unicode_escape(s: &str, prefix_len: usize, digit_count: usize) -> Result<(char, usize), String> {
    let digits: String = s.chars().skip(prefix_len).take(digit_count).collect();
    if digits.len() != digit_count || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!(
            "expected {digit_count} hex digits after unicode escape"
        ));
    }
    let code = u32::from_str_radix(&digits, 16)
        .map_err(|_| "invalid unicode escape".to_string())?;
    let ch = char::from_u32(code).ok_or_else(|| format!("`\\u{digits}` is not a valid code point"))?;
    Ok((ch, prefix_len + digit_count))
}
