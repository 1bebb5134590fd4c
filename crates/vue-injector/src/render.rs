//! Render function text for the two injection shapes.

use crate::error::TransformError;
use crate::toolchain::{CompiledTemplate, Toolchain};

const WRAP_PREFIX: &str = "(function(){";
const WRAP_SUFFIX: &str = "})()";

/// Compiled render bodies after syntax downgrading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFunctions {
    pub render: String,
    pub static_render_fns: Vec<String>,
}

impl RenderFunctions {
    /// Downgrades every body of `compiled` through `toolchain`.
    pub fn downgrade<T: Toolchain + ?Sized>(
        compiled: &CompiledTemplate,
        toolchain: &T,
    ) -> Result<Self, TransformError> {
        let render = downgrade_body(&compiled.render, toolchain)?;
        let static_render_fns = compiled
            .static_render_fns
            .iter()
            .map(|body| downgrade_body(body, toolchain))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            render,
            static_render_fns,
        })
    }

    /// `inject(Name, function (this: Name) {...}, [...]);`
    pub fn inject_call(&self, class_name: &str) -> String {
        let function = |body: &str| format!("function (this: {class_name}) {{{body}}}");
        let statics: Vec<String> = self
            .static_render_fns
            .iter()
            .map(|body| function(body))
            .collect();
        format!(
            "inject({class_name}, {}, [{}]);",
            function(&self.render),
            statics.join(", ")
        )
    }

    /// `render` and `staticRenderFns` properties for an options object,
    /// each on its own line and followed by a comma.
    pub fn option_properties(&self) -> String {
        let statics: Vec<String> = self
            .static_render_fns
            .iter()
            .map(|body| format!("function () {{{body}}}"))
            .collect();
        format!(
            "\n  render: function () {{{}}},\n  staticRenderFns: [{}],",
            self.render,
            statics.join(", ")
        )
    }
}

/// Transpiles a statement list by wrapping it in an IIFE, since the
/// transpiler only accepts complete expressions.
fn downgrade_body<T: Toolchain + ?Sized>(body: &str, toolchain: &T) -> Result<String, TransformError> {
    let wrapped = format!("{WRAP_PREFIX}{body}{WRAP_SUFFIX}");
    let code = toolchain.transpile(&wrapped)?;
    let trimmed = code.trim();
    let trimmed = trimmed.strip_suffix(';').unwrap_or(trimmed);

    trimmed
        .strip_prefix(WRAP_PREFIX)
        .and_then(|rest| rest.strip_suffix(WRAP_SUFFIX))
        .map(str::to_string)
        .ok_or_else(|| TransformError::TranspileWrapper {
            code: code.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolchain::{TemplateOutput, ToolchainError};
    use pretty_assertions::assert_eq;

    struct Downgrade;

    impl Toolchain for Downgrade {
        fn compile_template(&self, _: &str) -> Result<TemplateOutput, ToolchainError> {
            unreachable!()
        }

        fn transpile(&self, code: &str) -> Result<String, ToolchainError> {
            Ok(format!("{};\n", code.replace("const ", "var ")))
        }
    }

    struct Rewrap;

    impl Toolchain for Rewrap {
        fn compile_template(&self, _: &str) -> Result<TemplateOutput, ToolchainError> {
            unreachable!()
        }

        fn transpile(&self, code: &str) -> Result<String, ToolchainError> {
            Ok(format!("!{code}"))
        }
    }

    fn compiled() -> CompiledTemplate {
        CompiledTemplate {
            render: "with(this){return _c('div',[_m(0)])}".to_string(),
            static_render_fns: vec!["const a = 1;with(this){return _c('p')}".to_string()],
        }
    }

    #[test]
    fn test_downgrade_strips_wrapper() {
        let fns = RenderFunctions::downgrade(&compiled(), &Downgrade).unwrap();
        assert_eq!(fns.render, "with(this){return _c('div',[_m(0)])}");
        assert_eq!(
            fns.static_render_fns,
            ["var a = 1;with(this){return _c('p')}"]
        );
    }

    #[test]
    fn test_downgrade_rejects_lost_wrapper() {
        let err = RenderFunctions::downgrade(&compiled(), &Rewrap).unwrap_err();
        assert!(matches!(err, TransformError::TranspileWrapper { .. }));
    }

    #[test]
    fn test_inject_call() {
        let fns = RenderFunctions {
            render: "return 1".to_string(),
            static_render_fns: vec!["return 2".to_string(), "return 3".to_string()],
        };
        assert_eq!(
            fns.inject_call("App"),
            "inject(App, function (this: App) {return 1}, [function (this: App) {return 2}, function (this: App) {return 3}]);"
        );
    }

    #[test]
    fn test_inject_call_without_static_fns() {
        let fns = RenderFunctions {
            render: "return 1".to_string(),
            static_render_fns: Vec::new(),
        };
        assert_eq!(
            fns.inject_call("App"),
            "inject(App, function (this: App) {return 1}, []);"
        );
    }

    #[test]
    fn test_option_properties() {
        let fns = RenderFunctions {
            render: "return 1".to_string(),
            static_render_fns: vec!["return 2".to_string()],
        };
        assert_eq!(
            fns.option_properties(),
            "\n  render: function () {return 1},\n  staticRenderFns: [function () {return 2}],"
        );
    }
}
