//! Block types for a parsed single-file component.

use smol_str::SmolStr;
use text_span::Span;

/// A parsed `.vue` document.
///
/// Template and script are singletons. Styles and custom blocks share one
/// ordered list so that their relative order survives a round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SfcDocument {
    /// The `<template>` block.
    pub template: Option<Block>,
    /// The `<script>` block.
    pub script: Option<Block>,
    /// `<style>` and custom blocks in source order.
    pub blocks: Vec<Block>,
}

impl SfcDocument {
    /// Returns true if a script block is present and its `lang` attribute
    /// equals `marker` (e.g. `"ts"`).
    pub fn has_typed_script(&self, marker: &str) -> bool {
        self.script
            .as_ref()
            .and_then(Block::lang)
            .is_some_and(|lang| lang == marker)
    }

    /// Iterates over the `<style>` blocks.
    pub fn styles(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.kind == BlockKind::Style)
    }

    /// Iterates over custom blocks such as `<docs>` or `<i18n>`.
    pub fn custom_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks
            .iter()
            .filter(|b| matches!(b.kind, BlockKind::Custom(_)))
    }
}

/// The kind of a top-level block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BlockKind {
    Template,
    Script,
    Style,
    /// Any other tag name.
    Custom(SmolStr),
}

impl BlockKind {
    /// Classifies a tag name.
    pub fn from_tag(name: &str) -> Self {
        match name {
            "template" => BlockKind::Template,
            "script" => BlockKind::Script,
            "style" => BlockKind::Style,
            other => BlockKind::Custom(SmolStr::new(other)),
        }
    }

    /// The tag name used when printing the block.
    pub fn tag(&self) -> &str {
        match self {
            BlockKind::Template => "template",
            BlockKind::Script => "script",
            BlockKind::Style => "style",
            BlockKind::Custom(name) => name.as_str(),
        }
    }
}

/// One top-level block.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Block {
    pub kind: BlockKind,
    /// The block content, de-indented unless disabled in `ParseOptions`.
    pub content: String,
    /// Attributes in source order.
    pub attributes: Vec<Attribute>,
    /// The span of the whole block in the original source. Not updated when
    /// the content is rewritten.
    pub span: Span,
    /// The span of the raw content in the original source.
    pub content_span: Span,
}

impl Block {
    /// Creates a block with no attributes and an empty span.
    pub fn new(kind: BlockKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            attributes: Vec::new(),
            span: Span::default(),
            content_span: Span::default(),
        }
    }

    /// Builder-style attribute setter, mostly useful in tests.
    pub fn with_attribute(mut self, name: &str, value: AttributeValue) -> Self {
        self.attributes.push(Attribute {
            name: SmolStr::new(name),
            value,
            span: Span::default(),
        });
        self
    }

    /// Looks up an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| &a.value)
    }

    /// Looks up an attribute carrying a string value.
    pub fn attr_text(&self, name: &str) -> Option<&str> {
        match self.attr(name)? {
            AttributeValue::Text(text) => Some(text),
            AttributeValue::Bool(_) => None,
        }
    }

    /// The `lang` attribute.
    pub fn lang(&self) -> Option<&str> {
        self.attr_text("lang")
    }
}

/// An attribute on a block tag.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Attribute {
    pub name: SmolStr,
    pub value: AttributeValue,
    /// The span of the attribute in the original source.
    pub span: Span,
}

/// An attribute value.
///
/// Attributes written without a value, or with an empty one, parse as
/// `Bool(true)` and print back as a bare name. `Bool(false)` is never
/// produced by the parser; it lets callers switch an attribute off.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AttributeValue {
    Text(String),
    Bool(bool),
}
