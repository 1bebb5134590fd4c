//! One node process serving compile and transpile requests.

use crate::error::NodeError;
use crate::protocol::{Ready, Request, RequestKind, Response};
use camino::Utf8Path;
use std::io::{BufRead, BufReader, Lines, Read, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::{Mutex, MutexGuard};
use std::thread::JoinHandle;
use vue_injector::{TemplateOutput, Toolchain, ToolchainError};

/// A running node process. Requests are answered one at a time.
pub struct NodeWorker {
    io: Mutex<WorkerIo>,
}

struct WorkerIo {
    child: Child,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
    stderr_thread: Option<JoinHandle<String>>,
    next_id: u64,
}

impl NodeWorker {
    pub(crate) fn spawn(
        node_path: &Utf8Path,
        workspace_root: &Utf8Path,
        script_path: &Utf8Path,
    ) -> Result<Self, NodeError> {
        let mut child = Command::new(node_path)
            .arg(script_path)
            .current_dir(workspace_root)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| NodeError::Protocol("failed to open node stdin".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| NodeError::Protocol("failed to open node stdout".to_string()))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| NodeError::Protocol("failed to open node stderr".to_string()))?;

        let stderr_thread = std::thread::spawn(move || {
            let mut buffer = String::new();
            let _ = stderr.read_to_string(&mut buffer);
            buffer
        });

        let mut io = WorkerIo {
            child,
            stdin,
            stdout: BufReader::new(stdout).lines(),
            stderr_thread: Some(stderr_thread),
            next_id: 1,
        };

        let ready_line = io.read_line()?;
        let ready: Ready = serde_json::from_str(&ready_line)
            .map_err(|e| NodeError::Parse(format!("invalid ready response: {e}")))?;
        if !ready.ready {
            return Err(NodeError::Protocol(format!(
                "unexpected node ready response: {ready_line}"
            )));
        }
        tracing::debug!(pid = io.child.id(), "node worker ready");

        Ok(Self { io: Mutex::new(io) })
    }

    fn lock(&self) -> Result<MutexGuard<'_, WorkerIo>, NodeError> {
        self.io
            .lock()
            .map_err(|_| NodeError::Protocol("node worker poisoned by an earlier panic".to_string()))
    }

    /// Compiles template markup.
    pub fn compile(&self, template: &str) -> Result<TemplateOutput, NodeError> {
        self.lock()?
            .request(RequestKind::Compile, template)?
            .into_template_output()
    }

    /// Downgrades an expression statement.
    pub fn transpile(&self, code: &str) -> Result<String, NodeError> {
        self.lock()?
            .request(RequestKind::Transpile, code)?
            .into_code()
    }
}

impl WorkerIo {
    fn request(&mut self, kind: RequestKind, source: &str) -> Result<Response, NodeError> {
        let id = self.next_id;
        self.next_id += 1;

        let mut line = serde_json::to_string(&Request { id, kind, source })
            .map_err(|e| NodeError::Protocol(format!("failed to serialize request: {e}")))?;
        line.push('\n');
        self.stdin
            .write_all(line.as_bytes())
            .and_then(|()| self.stdin.flush())
            .map_err(|e| NodeError::Protocol(format!("failed to write to node stdin: {e}")))?;

        let line = self.read_line()?;
        let response = Response::parse(&line)?;
        match response.id {
            Some(got) if got == id => Ok(response),
            Some(got) => Err(NodeError::Protocol(format!(
                "expected response {id}, got {got}"
            ))),
            None => Err(NodeError::Protocol(
                response
                    .error
                    .unwrap_or_else(|| format!("missing response id: {line}")),
            )),
        }
    }

    /// Reads the next stdout line. End of stream means node exited, which is
    /// reported with its exit code and stderr.
    fn read_line(&mut self) -> Result<String, NodeError> {
        match self.stdout.next() {
            Some(line) => {
                line.map_err(|e| NodeError::Protocol(format!("failed to read node output: {e}")))
            }
            None => {
                let stderr = self
                    .stderr_thread
                    .take()
                    .and_then(|handle| handle.join().ok())
                    .unwrap_or_default();
                let status = self.child.wait()?;
                Err(NodeError::ProcessFailed {
                    code: status.code().unwrap_or(-1),
                    stderr,
                })
            }
        }
    }
}

impl Drop for WorkerIo {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl Toolchain for NodeWorker {
    fn compile_template(&self, template: &str) -> Result<TemplateOutput, ToolchainError> {
        Ok(self.compile(template)?)
    }

    fn transpile(&self, code: &str) -> Result<String, ToolchainError> {
        Ok(NodeWorker::transpile(self, code)?)
    }
}
