// ABOUTME: Error taxonomy for deployment attempts.
// ABOUTME: Covers pre-stage push failures, deploy, and expose failures.

use crate::docker::DockerError;
use crate::oc::OcError;

/// Errors that can occur during a deployment phase.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// Push to the cluster registry requested but no registry is known.
    #[error("No OpenShift registry is available")]
    NoRegistry,

    /// Push to the cluster registry requested but no project is selected.
    #[error("No project is selected in the current context")]
    NoProject,

    /// Push to the public registry failed.
    #[error("failed to push {image}: {source}")]
    Push {
        image: String,
        #[source]
        source: DockerError,
    },

    /// `oc registry login` failed.
    #[error("registry login failed: {0}")]
    RegistryLogin(#[source] OcError),

    /// Image stream creation failed for a reason other than it existing.
    #[error("failed to create image stream {name}: {source}")]
    ImageStream {
        name: String,
        #[source]
        source: OcError,
    },

    /// Tagging the image for the cluster registry failed.
    #[error("failed to tag {tag}: {source}")]
    Tag {
        tag: String,
        #[source]
        source: DockerError,
    },

    /// `oc new-app` failed.
    #[error("failed to deploy {image}: {source}")]
    Deploy {
        image: String,
        #[source]
        source: OcError,
    },

    /// `oc expose` failed.
    #[error("failed to expose {app}: {source}")]
    Expose {
        app: String,
        #[source]
        source: OcError,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployErrorKind {
    /// Required input missing before anything ran.
    Precondition,
    /// Pushing the image somewhere failed.
    Push,
    /// Creating the application failed.
    Deploy,
    /// Exposing the service failed.
    Expose,
}

impl DeployError {
    pub fn kind(&self) -> DeployErrorKind {
        match self {
            DeployError::NoRegistry | DeployError::NoProject => DeployErrorKind::Precondition,
            DeployError::Push { .. }
            | DeployError::RegistryLogin(_)
            | DeployError::ImageStream { .. }
            | DeployError::Tag { .. } => DeployErrorKind::Push,
            DeployError::Deploy { .. } => DeployErrorKind::Deploy,
            DeployError::Expose { .. } => DeployErrorKind::Expose,
        }
    }

    /// Whether the attempt must stop after this error.
    pub fn is_terminal(&self) -> bool {
        self.kind() != DeployErrorKind::Expose
    }
}
