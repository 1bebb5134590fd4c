//! Span and byte offset types.

use std::ops::Range;
use text_size::TextSize;

/// A byte offset into a source string.
pub type ByteOffset = TextSize;

/// A half-open byte range `[start, end)` into a source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// The start byte offset (inclusive).
    pub start: ByteOffset,
    /// The end byte offset (exclusive).
    pub end: ByteOffset,
}

impl Span {
    /// Creates a new span from start and end byte offsets.
    #[inline]
    pub fn new(start: impl Into<ByteOffset>, end: impl Into<ByteOffset>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Creates a span from `usize` offsets, as produced by `str` searches.
    #[inline]
    pub fn from_usize(start: usize, end: usize) -> Self {
        Self::new(TextSize::from(start as u32), TextSize::from(end as u32))
    }

    /// Creates an empty span at the given offset. Splicing an empty span
    /// inserts text without removing any.
    #[inline]
    pub fn empty(offset: impl Into<ByteOffset>) -> Self {
        let offset = offset.into();
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Returns the span as a `usize` range suitable for slicing.
    #[inline]
    pub fn range(self) -> Range<usize> {
        u32::from(self.start) as usize..u32::from(self.end) as usize
    }

    /// Returns the text covered by this span, or `None` when the span is out
    /// of bounds or does not fall on char boundaries.
    pub fn slice(self, text: &str) -> Option<&str> {
        text.get(self.range())
    }

    /// Returns a copy of `text` with this span replaced by `replacement`.
    ///
    /// Returns `None` if the span does not address a valid slice of `text`.
    pub fn splice(self, text: &str, replacement: &str) -> Option<String> {
        let range = self.range();
        text.get(range.clone())?;
        let mut out = String::with_capacity(text.len() - range.len() + replacement.len());
        out.push_str(&text[..range.start]);
        out.push_str(replacement);
        out.push_str(&text[range.end..]);
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_span_empty() {
        let span = Span::empty(5u32);
        assert_eq!(span.start, span.end);
        assert_eq!(span.range(), 5..5);
    }

    #[test]
    fn test_slice() {
        let text = "export default class Foo {}";
        assert_eq!(Span::from_usize(0, 6).slice(text), Some("export"));
        assert_eq!(Span::from_usize(20, 40).slice(text), None);
    }

    #[test]
    fn test_splice_replaces_only_the_span() {
        let text = "a { b } c";
        let out = Span::from_usize(2, 7).splice(text, "{}").unwrap();
        assert_eq!(out, "a {} c");
    }

    #[test]
    fn test_splice_empty_span_inserts() {
        let text = "({a: 1})";
        let out = Span::empty(2u32).splice(text, "render: r,").unwrap();
        assert_eq!(out, "({render: r,a: 1})");
    }

    #[test]
    fn test_splice_rejects_non_boundary() {
        let text = "é";
        assert!(Span::from_usize(1, 2).splice(text, "x").is_none());
    }
}
