//! Diagnostics shared across every stage of the pipeline.
//!
//!     Every stage (pragma preprocessing, lexing, parsing, building) reports
//!     failure through [`FlexConfError`]. There is no recovery: the first error
//!     wins and aborts the parse (spec.md §4.8, §7).

use std::fmt;

/// A 1-indexed line/column position plus the byte range it covers.
///
/// Columns count Unicode code points, not bytes (spec.md §4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
    pub byte_offset: usize,
    pub length: usize,
}

impl Span {
    pub fn new(line: usize, column: usize, byte_offset: usize, length: usize) -> Self {
        Self {
            line,
            column,
            byte_offset,
            length,
        }
    }

    /// A span with no meaningful extent, used for whole-document failures
    /// (e.g. invalid UTF-8 before any position index exists).
    pub fn zero() -> Self {
        Self::new(1, 1, 0, 0)
    }
}

/// The stable taxonomy from spec.md §7. Implementations must keep this enum
/// stable; no machine-readable error code table is mandated beyond it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EncodingError,
    SyntaxError,
    IndentationError,
    ModeMismatchError,
    KeyError,
    NumberError,
    PragmaError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::EncodingError => "EncodingError",
            ErrorKind::SyntaxError => "SyntaxError",
            ErrorKind::IndentationError => "IndentationError",
            ErrorKind::ModeMismatchError => "ModeMismatchError",
            ErrorKind::KeyError => "KeyError",
            ErrorKind::NumberError => "NumberError",
            ErrorKind::PragmaError => "PragmaError",
        };
        f.write_str(name)
    }
}

/// A single diagnostic: kind, message, span, and a rendered snippet.
///
/// The snippet is computed eagerly at the error site (where the source text
/// is still in scope) rather than lazily from the span, so a `FlexConfError`
/// is self-contained once it leaves the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlexConfError {
    kind: ErrorKind,
    message: String,
    span: Span,
    snippet: String,
}

impl FlexConfError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, span: Span, snippet: String) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
            snippet,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn snippet(&self) -> &str {
        &self.snippet
    }
}

impl fmt::Display for FlexConfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} at line {}, column {}: {}",
            self.kind, self.span.line, self.span.column, self.message
        )?;
        write!(f, "{}", self.snippet)
    }
}

impl std::error::Error for FlexConfError {}

pub type Result<T> = std::result::Result<T, FlexConfError>;
