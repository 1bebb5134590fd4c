use camino::Utf8PathBuf;
use thiserror::Error;
use vue_injector::ToolchainError;

/// Error types for the node runner.
#[derive(Debug, Error)]
pub enum NodeError {
    /// Failed to spawn or talk to the node process.
    #[error("failed to spawn node: {0}")]
    SpawnFailed(#[from] std::io::Error),

    /// node exited before answering.
    #[error("node exited with code {code}: {stderr}")]
    ProcessFailed { code: i32, stderr: String },

    /// No node binary in the workspace or on PATH.
    #[error("node binary not found (looked in {0}/node_modules/.bin and PATH)")]
    NotFound(Utf8PathBuf),

    /// The runner script could not be written to the cache directory.
    #[error("failed to install runner script: {0}")]
    ScriptInstall(String),

    /// Unexpected message order or content.
    #[error("node runner protocol error: {0}")]
    Protocol(String),

    /// A line from node was not valid JSON for the expected message.
    #[error("failed to parse node response: {0}")]
    Parse(String),

    /// The compiler or transpiler threw.
    #[error("{0}")]
    Remote(String),
}

impl From<NodeError> for ToolchainError {
    fn from(err: NodeError) -> Self {
        ToolchainError::with_source("node toolchain failed", err)
    }
}
