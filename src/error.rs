// ABOUTME: Application-wide error type for shiftdeploy with SNAFU context selectors.
// ABOUTME: Wraps module errors and classifies them for programmatic handling.

use std::path::PathBuf;

use snafu::Snafu;

use crate::docker::{DockerError, InventoryError};
use crate::oc::OcError;
use crate::poll::WaitError;
use crate::types::{ImageTagError, ProjectNameError};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("file already exists: {}", path.display()))]
    AlreadyExists { path: PathBuf },

    #[snafu(display("failed to read {}: {source}", path.display()))]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("invalid configuration in {}: {source}", path.display()))]
    ConfigParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[snafu(display("invalid configuration: {message}"))]
    InvalidConfig { message: String },

    #[snafu(display("failed to write {}: {source}", path.display()))]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("I/O error: {source}"))]
    Io { source: std::io::Error },

    #[snafu(display("{source}"))]
    Oc { source: OcError },

    #[snafu(display("{source}"))]
    Docker { source: DockerError },

    #[snafu(display("cannot list local images: {source}"))]
    Inventory { source: InventoryError },

    #[snafu(display("invalid project name: {source}"))]
    ProjectName { source: ProjectNameError },

    #[snafu(display("invalid image reference: {source}"))]
    ImageTag { source: ImageTagError },

    #[snafu(display("{source}"))]
    Wait { source: WaitError },

    #[snafu(display("no cluster context is selected; log in with `shiftdeploy login` first"))]
    NoContext,

    #[snafu(display("unknown context '{name}'"))]
    UnknownContext { name: String },

    #[snafu(display("{server} is not an OpenShift cluster"))]
    NotOpenShift { server: String },

    #[snafu(display("deployment of {image} failed"))]
    DeploymentFailed { image: String },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Config file missing, unreadable, invalid, or in the way.
    Config,
    /// Local filesystem trouble.
    Io,
    /// An oc command failed or its output was unusable.
    Cluster,
    /// A docker command or the engine API failed.
    Docker,
    /// User input failed validation.
    Validation,
    /// No usable cluster context.
    Context,
    /// The route never became reachable.
    Wait,
    /// The deployment reported a terminal failure.
    Deployment,
}

impl Error {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::AlreadyExists { .. }
            | Error::ConfigRead { .. }
            | Error::ConfigParse { .. }
            | Error::InvalidConfig { .. } => ErrorKind::Config,
            Error::Write { .. } | Error::Io { .. } => ErrorKind::Io,
            Error::Oc { .. } => ErrorKind::Cluster,
            Error::Docker { .. } | Error::Inventory { .. } => ErrorKind::Docker,
            Error::ProjectName { .. } | Error::ImageTag { .. } => ErrorKind::Validation,
            Error::NoContext | Error::UnknownContext { .. } | Error::NotOpenShift { .. } => {
                ErrorKind::Context
            }
            Error::Wait { .. } => ErrorKind::Wait,
            Error::DeploymentFailed { .. } => ErrorKind::Deployment,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<OcError> for Error {
    fn from(source: OcError) -> Self {
        match source {
            OcError::UnknownContext(name) => Error::UnknownContext { name },
            source => Error::Oc { source },
        }
    }
}

impl From<DockerError> for Error {
    fn from(source: DockerError) -> Self {
        Error::Docker { source }
    }
}

impl From<InventoryError> for Error {
    fn from(source: InventoryError) -> Self {
        Error::Inventory { source }
    }
}

impl From<ProjectNameError> for Error {
    fn from(source: ProjectNameError) -> Self {
        Error::ProjectName { source }
    }
}

impl From<ImageTagError> for Error {
    fn from(source: ImageTagError) -> Self {
        Error::ImageTag { source }
    }
}

impl From<WaitError> for Error {
    fn from(source: WaitError) -> Self {
        Error::Wait { source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
