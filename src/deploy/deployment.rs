// ABOUTME: Generic deployment struct parameterized by state marker.
// ABOUTME: Also bundles the command wrappers every transition needs.

use crate::docker::DockerClient;
use crate::oc::{OcClient, OcOptions};

use super::state::{Exposable, Initialized, Staged};

/// Value handed from the staging phase to the deploy phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentData {
    pub image: String,
    pub image_stream: Option<String>,
}

impl DeploymentData {
    /// Reference passed to `oc new-app`: the image stream when one was created.
    pub fn deploy_ref(&self) -> &str {
        self.image_stream.as_deref().unwrap_or(&self.image)
    }
}

/// Command wrappers and options shared by every transition of one attempt.
pub struct Clients<'a, E> {
    pub oc: &'a OcClient<E>,
    pub docker: &'a DockerClient<E>,
    pub options: OcOptions,
}

impl<E> Clone for Clients<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Clients<'_, E> {}

/// A deployment in progress, parameterized by its current state.
///
/// The state type parameter `S` carries what earlier phases produced, so a
/// route can only be looked up once exposure was established.
#[derive(Debug)]
pub struct Deployment<S> {
    pub(crate) image: String,
    pub(crate) state: S,
}

impl Deployment<Initialized> {
    pub fn new(image: impl Into<String>) -> Self {
        Deployment {
            image: image.into(),
            state: Initialized,
        }
    }
}

impl<S> Deployment<S> {
    /// The local image reference being deployed.
    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn state(&self) -> &S {
        &self.state
    }
}

impl Deployment<Staged> {
    pub fn data(&self) -> DeploymentData {
        DeploymentData {
            image: self.image.clone(),
            image_stream: self.state.image_stream.clone(),
        }
    }
}

impl Deployment<Exposable> {
    pub fn app_name(&self) -> &str {
        &self.state.app_name
    }
}
