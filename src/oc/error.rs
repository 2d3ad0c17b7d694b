// ABOUTME: Error types for oc command wrappers.
// ABOUTME: Distinguishes process failures, executor failures, and unparsable output.

use crate::exec::ExecError;

/// Errors returned by [`super::OcClient`] operations.
#[derive(Debug, thiserror::Error)]
pub enum OcError {
    /// `oc new-app` exited with a non-zero code.
    #[error("Failed to create app for `{image}`")]
    AppCreation { image: String },

    /// `oc registry login` exited with a non-zero code.
    #[error("failed to login to the OpenShift container registry: {stderr}")]
    RegistryLogin { stderr: String },

    /// A captured command reported an error.
    #[error("`oc {command}` failed: {stderr}")]
    Command { command: String, stderr: String },

    /// Command output was not in the expected format.
    #[error("unexpected output from `oc {command}`: {source}")]
    Parse {
        command: String,
        #[source]
        source: serde_json::Error,
    },

    /// The named context does not exist in the kube config.
    #[error("context not found: {0}")]
    UnknownContext(String),

    #[error(transparent)]
    Exec(#[from] ExecError),
}

impl OcError {
    /// Error text reported by the tool, if any.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            OcError::RegistryLogin { stderr } | OcError::Command { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}
