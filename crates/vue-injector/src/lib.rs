//! Precompiles the template of a Vue single-file component into render
//! functions and splices them into its TypeScript script block.
//!
//! Two component shapes are supported:
//! - `export default class Name extends Vue { ... }`, which gets an
//!   `inject(Name, render, staticRenderFns)` call after the class and, when
//!   the decorator registers child components, a typed `_c` declaration
//! - `export default factory({ ... })`, which gets `render` and
//!   `staticRenderFns` properties at the top of the options object
//!
//! Template compilation and syntax downgrading are delegated to a
//! [`Toolchain`]. Script edits go through [`ScriptSnapshot`], which re-parses
//! after every splice.

mod components;
mod engine;
mod error;
mod locate;
mod options;
mod render;
pub mod runtime;
mod script;
mod toolchain;

pub use components::hyphenate;
pub use engine::{inject_render, Injection, SkipReason};
pub use error::TransformError;
pub use locate::{locate, ClassTarget, ComponentTarget, OptionsTarget};
pub use options::{
    TransformOptions, DEFAULT_BUILT_IN_MODULE, DEFAULT_RUNTIME_MODULE, DEFAULT_TYPED_LANG,
};
pub use render::RenderFunctions;
pub use script::ScriptSnapshot;
pub use toolchain::{CompiledTemplate, TemplateOutput, Toolchain, ToolchainError};

/// The result of [`transform_document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    /// The serialized document.
    pub code: String,
    pub injection: Injection,
}

/// Transforms one `.vue` source and returns the new source.
pub fn transform<T: Toolchain + ?Sized>(
    source: &str,
    file_name: &str,
    toolchain: &T,
    options: &TransformOptions,
) -> Result<String, TransformError> {
    transform_document(source, file_name, toolchain, options).map(|output| output.code)
}

/// Like [`transform`], but also reports what was injected.
pub fn transform_document<T: Toolchain + ?Sized>(
    source: &str,
    file_name: &str,
    toolchain: &T,
    options: &TransformOptions,
) -> Result<TransformOutput, TransformError> {
    let mut document = vue_sfc::parse(source)?;
    let injection = inject_render(&mut document, file_name, toolchain, options)?;
    Ok(TransformOutput {
        code: document.serialize(),
        injection,
    })
}
