//! Transform configuration.

/// Import path of the module exporting `inject`.
pub const DEFAULT_RUNTIME_MODULE: &str = "typed-vue-template/lib/vue/runtime";

/// Import path of the module exporting the `ReservedTag` type.
pub const DEFAULT_BUILT_IN_MODULE: &str = "typed-vue-template/lib/vue/built-in";

/// `lang` value that marks a script block as TypeScript.
pub const DEFAULT_TYPED_LANG: &str = "ts";

/// Options for [`crate::transform`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    /// Script `lang` that enables the transform.
    pub typed_lang: String,
    /// Module the generated `inject` import points at.
    pub runtime_module: String,
    /// Module the generated `ReservedTag` import points at.
    pub built_in_module: String,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            typed_lang: DEFAULT_TYPED_LANG.to_string(),
            runtime_module: DEFAULT_RUNTIME_MODULE.to_string(),
            built_in_module: DEFAULT_BUILT_IN_MODULE.to_string(),
        }
    }
}

impl TransformOptions {
    /// `import { inject } from "<runtime>";`
    pub fn runtime_import(&self) -> String {
        format!("import {{ inject }} from \"{}\";", self.runtime_module)
    }

    /// `import { ReservedTag } from "<built-in>";`
    pub fn built_in_import(&self) -> String {
        format!("import {{ ReservedTag }} from \"{}\";", self.built_in_module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_lines() {
        let options = TransformOptions {
            runtime_module: "./rt".to_string(),
            ..Default::default()
        };
        assert_eq!(options.runtime_import(), r#"import { inject } from "./rt";"#);
        assert_eq!(
            options.built_in_import(),
            r#"import { ReservedTag } from "typed-vue-template/lib/vue/built-in";"#
        );
    }
}
