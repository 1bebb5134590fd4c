//! The injection pass over one parsed document.

use crate::components::render_declaration;
use crate::error::TransformError;
use crate::locate::{locate, ComponentTarget};
use crate::options::TransformOptions;
use crate::render::RenderFunctions;
use crate::script::ScriptSnapshot;
use crate::toolchain::{TemplateOutput, Toolchain};
use text_span::Span;
use vue_sfc::SfcDocument;

/// Why a document was returned without changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No script block, or its `lang` is not the typed marker.
    NoTypedScript,
    /// No template block left to compile.
    NoTemplate,
    /// The script has no default-exported class or options call.
    NoComponent,
}

/// What [`inject_render`] did to a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Injection {
    Skipped(SkipReason),
    /// The template compiler reported problems; the template is kept.
    CompileFailed(Vec<String>),
    /// Render functions were attached to a class through `inject(...)`.
    Class {
        name: String,
        /// Tags declared on `_c`, empty when no declaration was added.
        child_tags: Vec<String>,
    },
    /// `render` and `staticRenderFns` were added to an options object.
    Options,
}

impl Injection {
    /// Returns true if the template was replaced by render functions.
    pub fn is_injected(&self) -> bool {
        matches!(self, Injection::Class { .. } | Injection::Options)
    }
}

/// Compiles the template of `document` and splices the render functions into
/// its script.
///
/// On success with an injection, the template block is removed and the
/// script content replaced. In every other `Ok` case the document is left as
/// it was.
pub fn inject_render<T: Toolchain + ?Sized>(
    document: &mut SfcDocument,
    file_name: &str,
    toolchain: &T,
    options: &TransformOptions,
) -> Result<Injection, TransformError> {
    if !document.has_typed_script(&options.typed_lang) {
        tracing::debug!(file = file_name, "no typed script");
        return Ok(Injection::Skipped(SkipReason::NoTypedScript));
    }
    let (Some(template), Some(script_block)) = (&document.template, &document.script) else {
        tracing::debug!(file = file_name, "no template");
        return Ok(Injection::Skipped(SkipReason::NoTemplate));
    };

    let script = ScriptSnapshot::parse(file_name, script_block.content.as_str())?;
    if script.imports_from(&options.runtime_module) {
        return Err(TransformError::AlreadyInjected {
            file_name: file_name.to_string(),
        });
    }

    let Some(target) = locate(&script)? else {
        tracing::debug!(
            file = file_name,
            "no component declaration, template not compiled"
        );
        return Ok(Injection::Skipped(SkipReason::NoComponent));
    };

    let compiled = match toolchain.compile_template(&template.content)? {
        TemplateOutput::Compiled(compiled) => compiled,
        TemplateOutput::Diagnostics(errors) => {
            for error in &errors {
                tracing::warn!(file = file_name, "template: {error}");
            }
            return Ok(Injection::CompileFailed(errors));
        }
    };
    let functions = RenderFunctions::downgrade(&compiled, toolchain)?;

    let (script, injection) = match target {
        ComponentTarget::Class(class) => {
            let mut script = script;
            if !class.child_tags.is_empty() {
                script = script.splice(
                    Span::empty(class.closing_brace),
                    &render_declaration(&class.child_tags),
                )?;
                script = script.splice(
                    Span::empty(0u32),
                    &format!("{}\n", options.built_in_import()),
                )?;
            }

            let mut tail = String::new();
            if !script.text().ends_with('\n') {
                tail.push('\n');
            }
            tail.push('\n');
            tail.push_str(&options.runtime_import());
            tail.push('\n');
            tail.push_str(&functions.inject_call(&class.name));
            tail.push('\n');
            let script = script.append(&tail)?;

            (
                script,
                Injection::Class {
                    name: class.name,
                    child_tags: class.child_tags,
                },
            )
        }
        ComponentTarget::Options(object) => {
            let script = script.splice(
                Span::empty(object.after_open_brace()),
                &functions.option_properties(),
            )?;
            (script, Injection::Options)
        }
    };

    tracing::debug!(file = file_name, ?injection, "render functions injected");
    document.template = None;
    if let Some(block) = document.script.as_mut() {
        block.content = script.into_text();
    }
    Ok(injection)
}
