//! Tag header lexer using logos.
//!
//! Only the `<name attr="value" ...>` part of a top-level block is tokenized.
//! Block content is never fed through the lexer: the parser locates the
//! closing tag by text search and resumes lexing after it.

use logos::Logos;
use text_size::TextSize;
use text_span::Span;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Absolute span in the document.
    pub span: Span,
}

/// Token kinds for block tag headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Logos, Default)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    /// `<`
    #[token("<")]
    LAngle,

    /// `</`
    #[token("</")]
    LAngleSlash,

    /// `<!--`
    #[token("<!--")]
    CommentOpen,

    /// `>`
    #[token(">")]
    RAngle,

    /// `/>`
    #[token("/>")]
    SlashRAngle,

    /// `/` not followed by `>`
    #[token("/")]
    Slash,

    /// `=`
    #[token("=")]
    Eq,

    /// A tag name, attribute name or unquoted attribute value.
    #[regex(r#"[^ \t\r\n\f"'<>/=]+"#)]
    Name,

    /// `"..."`
    #[regex(r#""[^"]*""#)]
    DoubleQuoted,

    /// `'...'`
    #[regex(r"'[^']*'")]
    SingleQuoted,

    /// End of input.
    Eof,

    /// Invalid token (error recovery).
    #[default]
    Error,
}

impl TokenKind {
    /// Human-readable name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::LAngle => "'<'",
            TokenKind::LAngleSlash => "'</'",
            TokenKind::CommentOpen => "'<!--'",
            TokenKind::RAngle => "'>'",
            TokenKind::SlashRAngle => "'/>'",
            TokenKind::Slash => "'/'",
            TokenKind::Eq => "'='",
            TokenKind::Name => "name",
            TokenKind::DoubleQuoted | TokenKind::SingleQuoted => "quoted value",
            TokenKind::Eof => "end of file",
            TokenKind::Error => "invalid token",
        }
    }
}

/// Lexer over a suffix of the document.
///
/// Spans are reported relative to the whole document, so a lexer started at
/// `base` yields the same offsets the parser uses for slicing.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
    base: usize,
    end: usize,
    finished: bool,
}

impl<'src> Lexer<'src> {
    /// Starts lexing `source` at byte offset `base`.
    pub fn new(source: &'src str, base: usize) -> Self {
        Self {
            inner: TokenKind::lexer(&source[base..]),
            base,
            end: source.len(),
            finished: false,
        }
    }

    fn absolute(&self, range: std::ops::Range<usize>) -> Span {
        Span::from_usize(self.base + range.start, self.base + range.end)
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.inner.next() {
            Some(Ok(kind)) => Some(Token {
                kind,
                span: self.absolute(self.inner.span()),
            }),
            Some(Err(())) => Some(Token {
                kind: TokenKind::Error,
                span: self.absolute(self.inner.span()),
            }),
            None => {
                self.finished = true;
                let end = TextSize::from(self.end as u32);
                Some(Token {
                    kind: TokenKind::Eof,
                    span: Span::new(end, end),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokenize(source: &str) -> Vec<TokenKind> {
        Lexer::new(source, 0)
            .map(|t| t.kind)
            .take_while(|k| *k != TokenKind::Eof)
            .collect()
    }

    #[test]
    fn test_open_tag_with_attributes() {
        assert_eq!(
            tokenize(r#"<style scoped module="a">"#),
            vec![
                TokenKind::LAngle,
                TokenKind::Name,
                TokenKind::Name,
                TokenKind::Name,
                TokenKind::Eq,
                TokenKind::DoubleQuoted,
                TokenKind::RAngle,
            ]
        );
    }

    #[test]
    fn test_self_closing_and_single_quotes() {
        assert_eq!(
            tokenize("<style src='a.css'/>"),
            vec![
                TokenKind::LAngle,
                TokenKind::Name,
                TokenKind::Name,
                TokenKind::Eq,
                TokenKind::SingleQuoted,
                TokenKind::SlashRAngle,
            ]
        );
    }

    #[test]
    fn test_comment_and_closing_tag() {
        assert_eq!(
            tokenize("<!-- x --></docs>"),
            vec![
                TokenKind::CommentOpen,
                TokenKind::Name,
                TokenKind::Name,
                TokenKind::RAngle,
                TokenKind::LAngleSlash,
                TokenKind::Name,
                TokenKind::RAngle,
            ]
        );
    }

    #[test]
    fn test_spans_are_absolute() {
        let source = "text <docs>";
        let mut lexer = Lexer::new(source, 5);
        let langle = lexer.next().unwrap();
        assert_eq!(langle.span, Span::from_usize(5, 6));
        let name = lexer.next().unwrap();
        assert_eq!(name.kind, TokenKind::Name);
        assert_eq!(name.span.slice(source), Some("docs"));
    }
}
