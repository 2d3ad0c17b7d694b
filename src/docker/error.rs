// ABOUTME: Error types for docker CLI wrappers and the image inventory.
// ABOUTME: CLI failures carry the captured stderr.

use crate::exec::ExecError;

/// Errors from docker CLI invocations.
#[derive(Debug, thiserror::Error)]
pub enum DockerError {
    #[error("`docker {command}` failed: {stderr}")]
    Command { command: String, stderr: String },

    #[error(transparent)]
    Exec(#[from] ExecError),
}

/// Errors from the Docker Engine image inventory.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("failed to connect to the Docker daemon: {0}")]
    ConnectionFailed(String),

    #[error("failed to list images: {0}")]
    ListFailed(String),
}
