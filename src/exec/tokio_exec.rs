// ABOUTME: ProcessExecutor backed by tokio::process.
// ABOUTME: Reads stdout and stderr concurrently and emits lines as they arrive.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

use super::{ExecError, ExecEvent, ExecResult, ExecStream, ProcessExecutor};

/// Runs programs on the local host.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioExecutor;

impl TokioExecutor {
    pub fn new() -> Self {
        Self
    }
}

fn command(program: &str, args: &[String]) -> Command {
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    command
}

fn spawn_error(program: &str, source: std::io::Error) -> ExecError {
    ExecError::Spawn {
        program: program.to_string(),
        source,
    }
}

#[async_trait]
impl ProcessExecutor for TokioExecutor {
    async fn exec(&self, program: &str, args: &[String]) -> Result<ExecResult, ExecError> {
        let output = command(program, args)
            .output()
            .await
            .map_err(|e| spawn_error(program, e))?;

        Ok(ExecResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }

    async fn exec_streaming(
        &self,
        program: &str,
        args: &[String],
    ) -> Result<ExecStream, ExecError> {
        let mut child = command(program, args)
            .spawn()
            .map_err(|e| spawn_error(program, e))?;

        let stdout = child.stdout.take().ok_or(ExecError::Interrupted)?;
        let stderr = child.stderr.take().ok_or(ExecError::Interrupted)?;
        let (tx, stream) = ExecStream::channel();

        tokio::spawn(async move {
            let mut out = BufReader::new(stdout).lines();
            let mut err = BufReader::new(stderr).lines();
            let mut out_done = false;
            let mut err_done = false;

            // Send failures mean the receiver went away; keep draining so the
            // child is not blocked on a full pipe.
            while !(out_done && err_done) {
                tokio::select! {
                    line = out.next_line(), if !out_done => match line {
                        Ok(Some(line)) => { let _ = tx.send(ExecEvent::Stdout(line)); }
                        Ok(None) => out_done = true,
                        Err(e) => {
                            let _ = tx.send(ExecEvent::Error(e.to_string()));
                            out_done = true;
                        }
                    },
                    line = err.next_line(), if !err_done => match line {
                        Ok(Some(line)) => { let _ = tx.send(ExecEvent::Stderr(line)); }
                        Ok(None) => err_done = true,
                        Err(e) => {
                            let _ = tx.send(ExecEvent::Error(e.to_string()));
                            err_done = true;
                        }
                    },
                }
            }

            let exit_code = match child.wait().await {
                Ok(status) => status.code().unwrap_or(-1),
                Err(e) => {
                    let _ = tx.send(ExecEvent::Error(e.to_string()));
                    -1
                }
            };
            let _ = tx.send(ExecEvent::Closed(exit_code));
        });

        Ok(stream)
    }
}
