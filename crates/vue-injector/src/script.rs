//! Immutable parsed snapshots of a script block.
//!
//! A [`ScriptSnapshot`] pairs a text buffer with the swc module parsed from
//! it. Editing never touches an existing snapshot: [`ScriptSnapshot::splice`]
//! builds the new text and parses it again, so every span a caller can obtain
//! belongs to the text it will be applied to.

use crate::error::TransformError;
use swc_common::{sync::Lrc, BytePos, FileName, SourceMap, Span as SwcSpan, Spanned};
use swc_ecma_ast::{Module, ModuleDecl, ModuleItem};
use swc_ecma_parser::{lexer::Lexer, Parser, StringInput, Syntax, TsSyntax};
use text_span::Span;

/// A script text and the tree parsed from exactly that text.
#[derive(Debug)]
pub struct ScriptSnapshot {
    file_name: String,
    text: String,
    module: Module,
    file_start: BytePos,
}

impl ScriptSnapshot {
    /// Parses `text` as a TypeScript module.
    pub fn parse(file_name: &str, text: impl Into<String>) -> Result<Self, TransformError> {
        let text = text.into();
        let cm: Lrc<SourceMap> = Default::default();
        let fm = cm.new_source_file(
            Lrc::new(FileName::Custom(file_name.to_string())),
            text.clone(),
        );
        let file_start = fm.start_pos;

        let syntax = Syntax::Typescript(TsSyntax {
            tsx: false,
            decorators: true,
            dts: false,
            no_early_errors: true,
            disallow_ambiguous_jsx_like: false,
        });
        let lexer = Lexer::new(syntax, Default::default(), StringInput::from(&*fm), None);
        let mut parser = Parser::new_from(lexer);

        let module = parser.parse_module().map_err(|e| {
            let span = e.span();
            TransformError::ScriptParse {
                file_name: file_name.to_string(),
                message: format!("{:?}", e.kind()),
                span: relative_span(file_start, span),
            }
        })?;

        Ok(Self {
            file_name: file_name.to_string(),
            text,
            module,
            file_start,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Converts an swc span from this snapshot's tree into a byte span of
    /// this snapshot's text.
    pub fn span(&self, span: SwcSpan) -> Span {
        relative_span(self.file_start, span)
    }

    /// The exact source text of a node.
    pub fn source_of(&self, span: SwcSpan) -> &str {
        self.span(span).slice(&self.text).unwrap_or_default()
    }

    /// Replaces `span` with `replacement` and re-parses the result.
    pub fn splice(&self, span: Span, replacement: &str) -> Result<ScriptSnapshot, TransformError> {
        let text = span
            .splice(&self.text, replacement)
            .ok_or(TransformError::InvalidSplice {
                span,
                len: self.text.len(),
            })?;
        ScriptSnapshot::parse(&self.file_name, text)
    }

    /// Inserts `text` at the end of the script and re-parses.
    pub fn append(&self, text: &str) -> Result<ScriptSnapshot, TransformError> {
        self.splice(Span::empty(self.text.len() as u32), text)
    }

    /// Returns true if the module imports anything from `source`.
    pub fn imports_from(&self, source: &str) -> bool {
        self.module.body.iter().any(|item| {
            matches!(
                item,
                ModuleItem::ModuleDecl(ModuleDecl::Import(import))
                    if import.src.value.to_string_lossy() == source
            )
        })
    }
}

fn relative_span(file_start: BytePos, span: SwcSpan) -> Span {
    Span::new(
        span.lo.0.saturating_sub(file_start.0),
        span.hi.0.saturating_sub(file_start.0),
    )
}
