//! Top-level block scanner.
//!
//! The parser walks the document looking for `<` and lets [`Lexer`] tell a
//! comment, a stray closing tag and a tag header apart. A block's closing tag
//! is found by text search. Anything between blocks (whitespace, stray text,
//! comments) is dropped.

use crate::ast::*;
use crate::deindent::deindent;
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::ParseOptions;
use smol_str::SmolStr;
use text_span::Span;

const COMMENT_CLOSE: &str = "-->";
const CLOSING_TEMPLATE: &str = "</template>";

/// The block parser.
pub struct Parser<'src> {
    source: &'src str,
    options: ParseOptions,
    document: SfcDocument,
}

/// A lexed opening tag.
struct OpenTag {
    name: SmolStr,
    attributes: Vec<Attribute>,
    self_closing: bool,
    /// Offset just past the closing `>` or `/>`.
    end: usize,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, options: ParseOptions) -> Self {
        Self {
            source,
            options,
            document: SfcDocument::default(),
        }
    }

    /// Parses the whole document.
    pub fn parse(mut self) -> Result<SfcDocument, ParseError> {
        let mut pos = 0;

        while let Some(found) = self.source[pos..].find('<') {
            let start = pos + found;
            let mut lexer = Lexer::new(self.source, start);
            let Some(first) = lexer.next() else {
                break;
            };

            pos = match first.kind {
                TokenKind::CommentOpen => self.skip_comment(first.span)?,
                // Stray closing tag at the top level.
                TokenKind::LAngleSlash => self.source[start..]
                    .find('>')
                    .map(|i| start + i + 1)
                    .unwrap_or(self.source.len()),
                TokenKind::LAngle => match self.parse_open_tag(start, lexer)? {
                    Some(tag) => self.parse_block(start, tag)?,
                    None => start + 1,
                },
                _ => start + 1,
            };
        }

        Ok(self.document)
    }

    fn skip_comment(&self, open: Span) -> Result<usize, ParseError> {
        let start = open.range().start;
        let body = open.range().end;
        match self.source[body..].find(COMMENT_CLOSE) {
            Some(i) => Ok(body + i + COMMENT_CLOSE.len()),
            None => Err(ParseError::new(
                ParseErrorKind::UnexpectedEof {
                    expected: format!("'{COMMENT_CLOSE}'"),
                },
                Span::from_usize(start, self.source.len()),
            )),
        }
    }

    /// Lexes the rest of `<name attrs...>`; `lexer` has just yielded the `<`
    /// at `start`.
    ///
    /// Returns `Ok(None)` when the `<` does not begin a tag (e.g. `a < b`).
    fn parse_open_tag(&self, start: usize, mut lexer: Lexer<'src>) -> Result<Option<OpenTag>, ParseError> {
        // The tag name must follow `<` directly.
        let name_token = match lexer.next() {
            Some(token) if token.kind == TokenKind::Name && token.span.range().start == start + 1 => {
                token
            }
            _ => return Ok(None),
        };
        let name = SmolStr::new(self.text(name_token.span));

        let mut attributes = Vec::new();
        let mut pending: Option<Token> = None;

        loop {
            let token = match pending.take() {
                Some(token) => token,
                None => self.next_token(&mut lexer),
            };

            match token.kind {
                TokenKind::RAngle | TokenKind::SlashRAngle => {
                    return Ok(Some(OpenTag {
                        name,
                        attributes,
                        self_closing: token.kind == TokenKind::SlashRAngle,
                        end: token.span.range().end,
                    }));
                }
                TokenKind::Name => {
                    let attr_name = SmolStr::new(self.text(token.span));
                    let next = self.next_token(&mut lexer);
                    if next.kind != TokenKind::Eq {
                        attributes.push(Attribute {
                            name: attr_name,
                            value: AttributeValue::Bool(true),
                            span: token.span,
                        });
                        pending = Some(next);
                        continue;
                    }

                    let value_token = self.next_token(&mut lexer);
                    let raw = match value_token.kind {
                        TokenKind::DoubleQuoted | TokenKind::SingleQuoted => {
                            let quoted = self.text(value_token.span);
                            &quoted[1..quoted.len() - 1]
                        }
                        TokenKind::Name => self.text(value_token.span),
                        _ => return Err(self.unexpected("attribute value", &value_token)),
                    };
                    let value = if raw.is_empty() {
                        AttributeValue::Bool(true)
                    } else {
                        AttributeValue::Text(raw.to_string())
                    };

                    attributes.push(Attribute {
                        name: attr_name,
                        value,
                        span: Span::new(token.span.start, value_token.span.end),
                    });
                }
                // `<br / >`
                TokenKind::Slash => continue,
                TokenKind::Eof => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnexpectedEof {
                            expected: TokenKind::RAngle.name().to_string(),
                        },
                        Span::from_usize(start, self.source.len()),
                    ));
                }
                _ => return Err(self.unexpected("attribute or '>'", &token)),
            }
        }
    }

    /// Reads the content of a block and stores it. Returns the offset to
    /// resume scanning from.
    fn parse_block(&mut self, start: usize, tag: OpenTag) -> Result<usize, ParseError> {
        let kind = BlockKind::from_tag(&tag.name);

        let (content_span, end) = if tag.self_closing {
            (Span::from_usize(tag.end, tag.end), tag.end)
        } else {
            let content_end = match kind {
                BlockKind::Template => self.find_template_end(tag.end),
                _ => self.source[tag.end..]
                    .find(&format!("</{}>", tag.name))
                    .map(|i| tag.end + i),
            };
            let Some(content_end) = content_end else {
                return Err(ParseError::new(
                    ParseErrorKind::UnclosedBlock {
                        tag_name: tag.name.to_string(),
                    },
                    Span::from_usize(start, tag.end),
                ));
            };
            (
                Span::from_usize(tag.end, content_end),
                content_end + tag.name.len() + 3,
            )
        };

        let raw = self.text(content_span);
        let content = if self.options.deindent {
            deindent(raw).into_owned()
        } else {
            raw.to_string()
        };

        let block = Block {
            kind,
            content,
            attributes: tag.attributes,
            span: Span::from_usize(start, end),
            content_span,
        };
        self.store(block)?;

        Ok(end)
    }

    /// Finds the `</template>` matching an already opened `<template>`,
    /// counting nested template tags.
    fn find_template_end(&self, from: usize) -> Option<usize> {
        let bytes = self.source.as_bytes();
        let mut depth = 1usize;
        let mut pos = from;

        while let Some(found) = self.source[pos..].find('<') {
            let at = pos + found;
            let rest = &self.source[at..];

            if rest.starts_with(CLOSING_TEMPLATE) {
                depth -= 1;
                if depth == 0 {
                    return Some(at);
                }
                pos = at + CLOSING_TEMPLATE.len();
                continue;
            }

            if rest.starts_with("<template") {
                let after = at + "<template".len();
                if matches!(
                    bytes.get(after),
                    Some(b' ' | b'\t' | b'\n' | b'\r' | b'>')
                ) {
                    depth += 1;
                }
            }
            pos = at + 1;
        }

        None
    }

    fn store(&mut self, block: Block) -> Result<(), ParseError> {
        let slot = match block.kind {
            BlockKind::Template => &mut self.document.template,
            BlockKind::Script => &mut self.document.script,
            _ => {
                self.document.blocks.push(block);
                return Ok(());
            }
        };

        if slot.is_some() {
            return Err(ParseError::new(
                ParseErrorKind::DuplicateBlock {
                    tag_name: block.kind.tag().to_string(),
                },
                block.span,
            ));
        }
        *slot = Some(block);
        Ok(())
    }

    fn next_token(&self, lexer: &mut Lexer<'src>) -> Token {
        lexer.next().unwrap_or(Token {
            kind: TokenKind::Eof,
            span: Span::from_usize(self.source.len(), self.source.len()),
        })
    }

    fn text(&self, span: Span) -> &'src str {
        &self.source[span.range()]
    }

    fn unexpected(&self, expected: &str, found: &Token) -> ParseError {
        ParseError::new(
            ParseErrorKind::UnexpectedToken {
                expected: expected.to_string(),
                found: found.kind.name().to_string(),
            },
            found.span,
        )
    }
}
