//! Transform error types.

use crate::toolchain::ToolchainError;
use text_span::Span;
use thiserror::Error;

/// An error that aborted a transform.
///
/// Template diagnostics are not errors; they are reported through
/// [`crate::Injection::CompileFailed`].
#[derive(Debug, Error)]
pub enum TransformError {
    /// The `.vue` container could not be split into blocks.
    #[error(transparent)]
    Sfc(#[from] vue_sfc::ParseError),

    /// The TypeScript parser rejected the script block.
    #[error("{file_name}: failed to parse script: {message}")]
    ScriptParse {
        file_name: String,
        message: String,
        /// Location inside the script content.
        span: Span,
    },

    /// `export default class` without a class name.
    #[error("{file_name}: component class must be named")]
    UnnamedComponentClass { file_name: String, span: Span },

    /// The script already imports the runtime helper but a template block is
    /// still present, so injecting again would render twice.
    #[error("{file_name}: render function already injected but a <template> block is still present")]
    AlreadyInjected { file_name: String },

    /// The transpiler did not hand back the wrapper it was given.
    #[error("transpiled render function lost its wrapper: {code}")]
    TranspileWrapper { code: String },

    /// A splice addressed text outside the script or inside a character.
    #[error("cannot splice {span:?} into a script of {len} bytes")]
    InvalidSplice { span: Span, len: usize },

    /// The template compiler or transpiler failed.
    #[error(transparent)]
    Toolchain(#[from] ToolchainError),
}

impl TransformError {
    /// The byte span the error points at, relative to the script content,
    /// when there is one.
    pub fn script_span(&self) -> Option<Span> {
        match self {
            TransformError::ScriptParse { span, .. }
            | TransformError::UnnamedComponentClass { span, .. }
            | TransformError::InvalidSplice { span, .. } => Some(*span),
            _ => None,
        }
    }
}
