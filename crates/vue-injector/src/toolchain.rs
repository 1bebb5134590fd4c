//! The two compilers the engine delegates to.

use std::error::Error as StdError;
use thiserror::Error;

/// Output of a successful template compilation.
///
/// Each string is a function *body* (statements), not a full function.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompiledTemplate {
    /// Body of the main render function.
    pub render: String,
    /// Bodies of the static subtree render functions, in index order.
    pub static_render_fns: Vec<String>,
}

/// What the template compiler produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOutput {
    Compiled(CompiledTemplate),
    /// The template was rejected; one message per problem.
    Diagnostics(Vec<String>),
}

/// A failure inside a toolchain implementation (process died, protocol
/// error, transpiler exception). Never produced for template diagnostics.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ToolchainError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl ToolchainError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Template compiler plus syntax-downgrade transpiler.
///
/// Both are treated as opaque text-to-text services. Implementations may keep
/// internal state (a child process, a cache) behind `&self`.
pub trait Toolchain {
    /// Compiles template markup into render function bodies.
    fn compile_template(&self, template: &str) -> Result<TemplateOutput, ToolchainError>;

    /// Rewrites `code` using only older syntax. `code` is a complete
    /// expression statement.
    fn transpile(&self, code: &str) -> Result<String, ToolchainError>;
}

impl<T: Toolchain + ?Sized> Toolchain for &T {
    fn compile_template(&self, template: &str) -> Result<TemplateOutput, ToolchainError> {
        (**self).compile_template(template)
    }

    fn transpile(&self, code: &str) -> Result<String, ToolchainError> {
        (**self).transpile(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_source_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = ToolchainError::with_source("node worker stopped", io);
        assert_eq!(err.to_string(), "node worker stopped");
        assert_eq!(err.source().unwrap().to_string(), "pipe closed");
    }
}
