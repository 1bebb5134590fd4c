//! Parse error types.

use text_span::Span;
use thiserror::Error;

/// An error that stopped block parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Where in the document the error was detected.
    pub span: Span,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The kind of parse error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// An unexpected token inside a tag header.
    #[error("unexpected token: expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },

    /// The document ended inside a tag header or comment.
    #[error("unexpected end of file: expected {expected}")]
    UnexpectedEof { expected: String },

    /// A block without its closing tag.
    #[error("unclosed block: <{tag_name}>")]
    UnclosedBlock { tag_name: String },

    /// A second `<template>` or `<script>` block.
    #[error("a single-file component can only contain one <{tag_name}> block")]
    DuplicateBlock { tag_name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ParseError::new(
            ParseErrorKind::UnclosedBlock {
                tag_name: "script".to_string(),
            },
            Span::from_usize(0, 8),
        );
        assert_eq!(error.to_string(), "unclosed block: <script>");
    }

    #[test]
    fn test_duplicate_display() {
        let kind = ParseErrorKind::DuplicateBlock {
            tag_name: "template".to_string(),
        };
        assert_eq!(
            kind.to_string(),
            "a single-file component can only contain one <template> block"
        );
    }
}
