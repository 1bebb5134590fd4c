//! Vue single-file component container model.
//!
//! This crate splits a `.vue` document into its top-level blocks and prints
//! it back:
//! - Tag headers are lexed with `logos`
//! - Block content is located by closing-tag search and de-indented
//! - `<template>` and `<script>` are singletons, other blocks keep their order
//!
//! # Example
//!
//! ```
//! use vue_sfc::parse;
//!
//! let source = r#"<template>
//! <p>{{ msg }}</p>
//! </template>
//! <script lang="ts">
//! export default {}
//! </script>"#;
//!
//! let document = parse(source).unwrap();
//! assert!(document.has_typed_script("ts"));
//! assert_eq!(document.serialize(), source);
//! ```

mod ast;
mod deindent;
mod error;
mod lexer;
mod parser;
mod printer;

pub use ast::*;
pub use deindent::deindent;
pub use error::{ParseError, ParseErrorKind};
pub use lexer::{Lexer, Token, TokenKind};
pub use text_span::Span;

/// Options for block parsing.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Strip the indentation shared by a block's lines. On by default.
    pub deindent: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { deindent: true }
    }
}

/// Parses a `.vue` document into its blocks.
pub fn parse(source: &str) -> Result<SfcDocument, ParseError> {
    parse_with_options(source, ParseOptions::default())
}

/// Parses a `.vue` document with custom options.
pub fn parse_with_options(source: &str, options: ParseOptions) -> Result<SfcDocument, ParseError> {
    parser::Parser::new(source, options).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        let document = parse("").unwrap();
        assert!(document.template.is_none());
        assert!(document.script.is_none());
        assert!(document.blocks.is_empty());
    }

    #[test]
    fn test_untyped_script() {
        let document = parse("<script>export default {}</script>").unwrap();
        assert!(!document.has_typed_script("ts"));
    }

    #[test]
    fn test_lang_must_match_exactly() {
        let document = parse(r#"<script lang="tsx">export default {}</script>"#).unwrap();
        assert!(!document.has_typed_script("ts"));
        assert!(document.has_typed_script("tsx"));
    }

    #[test]
    fn test_deindent_can_be_disabled() {
        let source = "<docs>\n  a\n</docs>";
        let document = parse_with_options(source, ParseOptions { deindent: false }).unwrap();
        assert_eq!(document.blocks[0].content, "\n  a\n");
    }
}
