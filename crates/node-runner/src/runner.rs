//! node discovery and runner script installation.

use crate::error::NodeError;
use crate::worker::NodeWorker;
use blake3::Hasher;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

const NODE_SCRIPT_FILENAME: &str = "vue-template-runner.mjs";
const NODE_SCRIPT_SOURCE: &str = r#"import { createInterface } from 'node:readline';
import { stdin, stdout } from 'node:process';
import { createRequire } from 'node:module';
import { pathToFileURL } from 'node:url';

let compile = null;
let transpile = null;
try {
  const require = createRequire(pathToFileURL(process.cwd() + '/'));
  compile = require('vue-template-compiler').compile;
  transpile = require('vue-template-es2015-compiler');
} catch (err) {
  const message = err && err.message ? err.message : String(err);
  console.error(`typed-vue-template node runner failed to load the compiler: ${message}`);
  process.exit(2);
}

const send = (message) => stdout.write(JSON.stringify(message) + '\n');

send({ ready: true });

const rl = createInterface({ input: stdin, crlfDelay: Infinity });

for await (const line of rl) {
  if (!line.trim()) continue;

  let req;
  try {
    req = JSON.parse(line);
  } catch (err) {
    const message = err && err.message ? err.message : String(err);
    send({ id: null, error: `invalid json: ${message}` });
    continue;
  }

  const id = req.id;
  try {
    if (req.kind === 'compile') {
      const result = compile(req.source);
      send({
        id,
        render: result.render,
        staticRenderFns: result.staticRenderFns,
        errors: (result.errors || []).map((e) => (typeof e === 'string' ? e : e.msg))
      });
    } else if (req.kind === 'transpile') {
      send({ id, code: transpile(req.source) });
    } else {
      send({ id, error: `unknown request kind: ${req.kind}` });
    }
  } catch (err) {
    const message = err && err.message ? err.message : String(err);
    send({ id, error: message });
  }
}
"#;

/// Spawns node workers for one workspace.
#[derive(Debug, Clone)]
pub struct NodeRunner {
    node_path: Utf8PathBuf,
    workspace_root: Utf8PathBuf,
    script_path: Utf8PathBuf,
}

impl NodeRunner {
    /// Creates a runner, installing the runner script into the cache
    /// directory if needed.
    pub fn new(node_path: Utf8PathBuf, workspace_root: Utf8PathBuf) -> Result<Self, NodeError> {
        let cache_dir = Self::get_cache_dir()
            .ok_or_else(|| NodeError::ScriptInstall("could not determine cache directory".into()))?;
        let script_path = ensure_script(&cache_dir)?;
        Ok(Self {
            node_path,
            workspace_root,
            script_path,
        })
    }

    /// Finds node and creates a runner for `workspace_root`.
    pub fn discover(workspace_root: &Utf8Path) -> Result<Self, NodeError> {
        let node_path = Self::find_node(Some(workspace_root))
            .ok_or_else(|| NodeError::NotFound(workspace_root.to_owned()))?;
        tracing::debug!(node = %node_path, "using node");
        Self::new(node_path, workspace_root.to_owned())
    }

    /// Attempts to find node.
    /// 1. Workspace node_modules/.bin/node (if workspace_root provided)
    /// 2. PATH
    pub fn find_node(workspace_root: Option<&Utf8Path>) -> Option<Utf8PathBuf> {
        if let Some(workspace) = workspace_root {
            let bin = workspace.join("node_modules/.bin");
            if let Some(path) = find_node_in_bin(&bin) {
                return Some(path);
            }
        }

        which::which("node")
            .ok()
            .and_then(|path| Utf8PathBuf::try_from(path).ok())
    }

    /// Gets the cache directory for typed-vue-template.
    pub fn get_cache_dir() -> Option<Utf8PathBuf> {
        dirs::cache_dir()
            .and_then(|p| Utf8PathBuf::try_from(p).ok())
            .map(|p| p.join("typed-vue-template"))
    }

    pub fn node_path(&self) -> &Utf8Path {
        &self.node_path
    }

    /// Starts a node process and waits for its ready message.
    pub fn spawn_worker(&self) -> Result<NodeWorker, NodeError> {
        NodeWorker::spawn(&self.node_path, &self.workspace_root, &self.script_path)
    }
}

fn find_node_in_bin(bin: &Utf8Path) -> Option<Utf8PathBuf> {
    let candidates: &[&str] = if cfg!(windows) {
        &["node.exe", "node.cmd", "node"]
    } else {
        &["node"]
    };

    candidates
        .iter()
        .map(|candidate| bin.join(candidate))
        .find(|path| path.exists())
}

/// Writes the runner script into `cache_dir` unless an identical copy is
/// already there.
fn ensure_script(cache_dir: &Utf8Path) -> Result<Utf8PathBuf, NodeError> {
    fs::create_dir_all(cache_dir)
        .map_err(|e| NodeError::ScriptInstall(format!("failed to create cache dir: {e}")))?;

    let script_path = cache_dir.join(NODE_SCRIPT_FILENAME);
    let mut hasher = Hasher::new();
    hasher.update(NODE_SCRIPT_SOURCE.as_bytes());
    let expected_hash = hasher.finalize();

    if let Ok(existing) = fs::read(&script_path) {
        let mut hasher = Hasher::new();
        hasher.update(&existing);
        if hasher.finalize() == expected_hash {
            return Ok(script_path);
        }
    }

    fs::write(&script_path, NODE_SCRIPT_SOURCE)
        .map_err(|e| NodeError::ScriptInstall(format!("failed to write runner script: {e}")))?;

    Ok(script_path)
}
