//! # flexconf
//!
//!     A parser and loader for FlexConf, a configuration language with two
//!     semantically equivalent surface syntaxes: an indentation-sensitive
//!     mode and a brace-delimited, comma-separated bracket mode. A document
//!     commits to exactly one mode, decided from its first significant
//!     character, and the two modes are never mixed.
//!
//! Pipeline
//!
//!     Parsing a document runs through five stages, leaves first:
//!
//!     1. **Source buffer** ([`source`]) - validates UTF-8, strips a BOM,
//!        and builds the line index diagnostics render against.
//!     2. **Pragma preprocessor** ([`pragma`]) - folds leading `#?>`
//!        directives into a [`config::LexerConfig`].
//!     3. **Lexer** ([`lexer`]) - mode-aware tokenizer; owns the indent
//!        stack and the string/number literal decoders.
//!     4. **Parser** ([`parser`]) - recursive-descent, dispatched on
//!        document mode, with the block-shape automaton that disambiguates
//!        maps from lists.
//!     5. **Container builder** ([`builder`]) - duplicate-key checks and the
//!        integer-keyed-map-to-sequence promotion.
//!
//!     Every stage reports failure through [`error::FlexConfError`]; there is
//!     no partial result and no recovery; the first error wins.
//!
//! Getting Started
//!
//!     - [`parse_text`] parses an in-memory byte slice.
//!     - [`parse_stream`] reads a [`std::io::Read`] to completion first.
//!     - [`value::Value`] is the resulting tree; [`value::Map`] preserves
//!       source key order.

pub mod builder;
pub mod config;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod pragma;
pub mod source;
pub mod value;

use error::{ErrorKind, FlexConfError, Span};
use source::SourceBuffer;
use value::Value;

/// Parses a complete UTF-8 FlexConf document into its root [`Value`].
///
/// Runs the full pipeline: buffer validation, pragma preprocessing, mode
/// detection and tokenization, recursive-descent parsing, and container
/// construction. The first diagnostic encountered anywhere in the pipeline
/// is returned; there is no partial tree.
pub fn parse_text(bytes: &[u8]) -> Result<Value, FlexConfError> {
    let buffer = SourceBuffer::new(bytes)?;
    let (cfg, start) = pragma::preprocess(&buffer)?;
    let stream = lexer::tokenize(&buffer, &cfg, start)?;
    parser::parse(&stream, &buffer)
}

/// Reads `reader` to completion and delegates to [`parse_text`].
///
/// FlexConf has no incremental or streaming grammar (spec.md §6): the whole
/// input must be buffered before parsing can begin. An I/O failure while
/// draining the reader is reported as an `EncodingError`, since the
/// diagnostic taxonomy has no dedicated I/O kind and the failure happens
/// before any bytes are available to validate.
pub fn parse_stream(mut reader: impl std::io::Read) -> Result<Value, FlexConfError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(|e| {
        FlexConfError::new(
            ErrorKind::EncodingError,
            format!("failed to read input stream: {e}"),
            Span::zero(),
            String::new(),
        )
    })?;
    parse_text(&bytes)
}
