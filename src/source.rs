//! The source buffer: validated UTF-8 text plus a line/column index.
//!
//!     Every other stage addresses source positions by byte offset; this is
//!     the one place that turns a byte offset into a human-facing line and
//!     column, and the one place that renders the caret snippet every
//!     diagnostic carries (spec.md §4.1, §6).

use crate::error::{ErrorKind, FlexConfError, Span};

const BOM: &str = "\u{feff}";

/// Full input text, validated and indexed once up front.
#[derive(Debug)]
pub struct SourceBuffer {
    text: String,
    /// Byte offset of the start of each line (line 0 always starts at 0).
    line_starts: Vec<usize>,
}

impl SourceBuffer {
    /// Validates `bytes` as UTF-8, strips a leading byte-order mark if
    /// present, and builds the line index.
    pub fn new(bytes: &[u8]) -> Result<Self, FlexConfError> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            FlexConfError::new(
                ErrorKind::EncodingError,
                format!("input is not valid UTF-8: {e}"),
                Span::zero(),
                String::new(),
            )
        })?;
        let text = text.strip_prefix(BOM).unwrap_or(text).replace("\r\n", "\n");

        let mut line_starts = vec![0];
        for (byte_pos, ch) in text.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }

        Ok(Self { text, line_starts })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Converts a byte offset into a 1-indexed (line, column) pair. Columns
    /// count code points from the start of the line, 1-indexed.
    pub fn line_col(&self, byte_offset: usize) -> (usize, usize) {
        let line_idx = match self.line_starts.binary_search(&byte_offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let line_start = self.line_starts[line_idx];
        let column = self.text[line_start..byte_offset].chars().count() + 1;
        (line_idx + 1, column)
    }

    /// Builds a `Span` from a byte range, filling in line/column from
    /// `range.start`.
    pub fn span(&self, byte_offset: usize, length: usize) -> Span {
        let (line, column) = self.line_col(byte_offset);
        Span::new(line, column, byte_offset, length)
    }

    fn line_text(&self, line_idx_zero_based: usize) -> &str {
        let start = self.line_starts[line_idx_zero_based];
        let end = self
            .line_starts
            .get(line_idx_zero_based + 1)
            .map(|&s| s.saturating_sub(1))
            .unwrap_or(self.text.len());
        let end = end.max(start);
        self.text[start..end].trim_end_matches('\r')
    }

    /// Renders the offending source line with a caret under `span`'s column.
    pub fn snippet(&self, span: Span) -> String {
        let line_idx = span.line.saturating_sub(1).min(self.line_starts.len() - 1);
        let line = self.line_text(line_idx);
        let caret_pos = span.column.saturating_sub(1);
        let mut caret_line = " ".repeat(caret_pos);
        caret_line.push('^');
        format!("{line}\n{caret_line}")
    }

    /// Builds a `FlexConfError`, rendering the snippet for the given span.
    pub fn error(&self, kind: ErrorKind, message: impl Into<String>, span: Span) -> FlexConfError {
        FlexConfError::new(kind, message, span, self.snippet(span))
    }
}
