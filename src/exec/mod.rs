// ABOUTME: Process execution seam for external CLI tools (oc, docker).
// ABOUTME: Captured and line-streamed execution behind the ProcessExecutor trait.

mod stream;
mod tokio_exec;

pub use stream::{ExecEvent, ExecListener, ExecStream};
pub use tokio_exec::TokioExecutor;

use async_trait::async_trait;

/// Captured result of a single process invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl ExecResult {
    /// Whether the process exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Failure by convention: non-zero exit or anything written to stderr.
    pub fn failed(&self) -> bool {
        !self.success() || !self.stderr.trim().is_empty()
    }
}

/// Runs external programs on behalf of the command wrappers.
#[async_trait]
pub trait ProcessExecutor: Send + Sync {
    /// Run to completion and capture stdout and stderr.
    async fn exec(&self, program: &str, args: &[String]) -> Result<ExecResult, ExecError>;

    /// Start the program and stream its output line by line.
    ///
    /// The returned stream ends with exactly one [`ExecEvent::Closed`].
    async fn exec_streaming(&self, program: &str, args: &[String])
    -> Result<ExecStream, ExecError>;
}

/// Errors from the executor itself, as opposed to a program that ran and failed.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while running process: {0}")]
    Io(#[from] std::io::Error),

    #[error("process output ended without an exit status")]
    Interrupted,
}
