//! Parse errors
//!
//! Every error aborts the parse immediately; no partial tree is ever
//! returned. Each variant carries the byte offset at which the problem was
//! detected, so callers can translate it to a line/column with [`line_col`].

use thiserror::Error;

/// Error returned when parsing fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input ended inside an open construct.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEndOfInput { offset: usize },

    /// A tag name was required but not found.
    #[error("expected tag name at offset {offset}")]
    ExpectedTagName { offset: usize },

    /// A tag could not be completed (missing `=`, quote or `>`).
    #[error("unterminated tag at offset {offset}")]
    UnterminatedTag { offset: usize },

    /// An attribute value has no matching closing quote.
    #[error("unterminated attribute value at offset {offset}")]
    UnterminatedAttributeValue { offset: usize },

    /// A comment has no closing `-->`.
    #[error("unterminated comment at offset {offset}")]
    UnterminatedComment { offset: usize },

    /// A CDATA section has no closing `]]>`.
    #[error("unterminated CDATA section at offset {offset}")]
    UnterminatedCData { offset: usize },

    /// A DOCTYPE has no closing `>`.
    #[error("unterminated DOCTYPE at offset {offset}")]
    UnterminatedDoctype { offset: usize },

    /// An XML declaration has no closing `?>`.
    #[error("unterminated XML declaration at offset {offset}")]
    UnterminatedDeclaration { offset: usize },

    /// A processing instruction has no closing `?>`.
    #[error("unterminated processing instruction at offset {offset}")]
    UnterminatedPi { offset: usize },

    /// A closing tag name does not match the open element.
    #[error("mismatched closing tag at offset {offset}")]
    MismatchedClosingTag { offset: usize },

    /// A named entity reference is not one of the five built-ins.
    #[error("unknown entity reference at offset {offset}")]
    UnknownEntityReference { offset: usize },

    /// A numeric character reference is malformed or names an invalid
    /// code point.
    #[error("invalid character reference at offset {offset}")]
    InvalidCharacterReference { offset: usize },

    /// The arena ran out of addressable handles.
    #[error("out of memory at offset {offset}")]
    OutOfMemory { offset: usize },
}

impl ParseError {
    /// Byte offset into the input at which the error was detected.
    pub fn offset(&self) -> usize {
        match *self {
            ParseError::UnexpectedEndOfInput { offset }
            | ParseError::ExpectedTagName { offset }
            | ParseError::UnterminatedTag { offset }
            | ParseError::UnterminatedAttributeValue { offset }
            | ParseError::UnterminatedComment { offset }
            | ParseError::UnterminatedCData { offset }
            | ParseError::UnterminatedDoctype { offset }
            | ParseError::UnterminatedDeclaration { offset }
            | ParseError::UnterminatedPi { offset }
            | ParseError::MismatchedClosingTag { offset }
            | ParseError::UnknownEntityReference { offset }
            | ParseError::InvalidCharacterReference { offset }
            | ParseError::OutOfMemory { offset } => offset,
        }
    }
}

/// Translate a byte offset into a 1-based (line, column) pair by
/// re-scanning newlines up to the offset. Columns count bytes, not
/// display width.
pub fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let upto = offset.min(text.len());
    let bytes = &text.as_bytes()[..upto];
    let line = memchr::memchr_iter(b'\n', bytes).count() + 1;
    let col = match memchr::memrchr(b'\n', bytes) {
        Some(nl) => upto - nl,
        None => upto + 1,
    };
    (line, col)
}
