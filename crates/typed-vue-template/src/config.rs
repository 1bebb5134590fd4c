//! Configuration loading.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::fs;
use thiserror::Error;

/// Name of the optional project configuration file.
pub const CONFIG_FILE_NAME: &str = "typed-vue-template.json";

/// Project configuration read from `typed-vue-template.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectConfig {
    /// Import path of the module exporting `inject`.
    pub runtime_module: Option<String>,
    /// Import path of the module exporting `ReservedTag`.
    pub built_in_module: Option<String>,
    /// Extra glob patterns to ignore.
    #[serde(default)]
    pub ignore: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: Utf8PathBuf,
        source: std::io::Error,
    },

    #[error("invalid {path}: {source}")]
    Parse {
        path: Utf8PathBuf,
        source: serde_json::Error,
    },
}

impl ProjectConfig {
    /// Loads the configuration file from `workspace`. A missing file yields
    /// the default configuration.
    pub fn load(workspace: &Utf8Path) -> Result<Self, ConfigError> {
        let path = workspace.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse { path: path.clone(), source })?;
        tracing::debug!(path = %path, ?config, "loaded configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn workspace() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_missing_file_is_default() {
        let (_guard, dir) = workspace();
        assert_eq!(ProjectConfig::load(&dir).unwrap(), ProjectConfig::default());
    }

    #[test]
    fn test_camel_case_keys() {
        let (_guard, dir) = workspace();
        fs::write(
            dir.join(CONFIG_FILE_NAME),
            r#"{ "runtimeModule": "@/rt", "ignore": ["**/legacy/**"] }"#,
        )
        .unwrap();

        let config = ProjectConfig::load(&dir).unwrap();
        assert_eq!(config.runtime_module.as_deref(), Some("@/rt"));
        assert_eq!(config.built_in_module, None);
        assert_eq!(config.ignore, ["**/legacy/**"]);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let (_guard, dir) = workspace();
        fs::write(dir.join(CONFIG_FILE_NAME), r#"{ "runtime_module": "x" }"#).unwrap();
        assert!(matches!(
            ProjectConfig::load(&dir),
            Err(ConfigError::Parse { .. })
        ));
    }
}
