// ABOUTME: State transition methods for deployment orchestration.
// ABOUTME: Each method consumes self and returns the next state on success.

use crate::docker::build_tag;
use crate::exec::ProcessExecutor;
use crate::oc::{OcError, app_name, is_already_exists};
use crate::types::KubeContext;

use super::deployment::{Clients, Deployment};
use super::error::DeployError;
use super::listener::{DeploymentListener, MessageForwarder};
use super::mode::DeploymentMode;
use super::state::{Deployed, Exposable, Initialized, Staged};

impl Deployment<Initialized> {
    /// Check that the mode's inputs are present without touching any process.
    pub fn preflight(
        &self,
        mode: DeploymentMode,
        context: &KubeContext,
        registry: Option<&str>,
    ) -> Result<(), DeployError> {
        if mode.requires_registry() {
            if registry.is_none_or(|r| r.trim().is_empty()) {
                return Err(DeployError::NoRegistry);
            }
            if context.project().is_none() {
                return Err(DeployError::NoProject);
            }
        }
        Ok(())
    }

    /// Push the image where `mode` requires it.
    pub async fn stage<E, L>(
        self,
        clients: Clients<'_, E>,
        mode: DeploymentMode,
        context: &KubeContext,
        registry: Option<&str>,
        listener: &L,
    ) -> Result<Deployment<Staged>, DeployError>
    where
        E: ProcessExecutor,
        L: DeploymentListener + ?Sized,
    {
        self.preflight(mode, context, registry)?;

        let image_stream = match mode {
            DeploymentMode::Deploy => None,
            DeploymentMode::PushToHubAndDeploy => {
                self.push_to_hub(clients, listener).await?;
                None
            }
            DeploymentMode::PushToOpenShiftAndDeploy => {
                let registry = registry.ok_or(DeployError::NoRegistry)?;
                let project = context.project().ok_or(DeployError::NoProject)?;
                Some(
                    self.push_to_openshift(clients, registry, project, listener)
                        .await?,
                )
            }
        };

        Ok(Deployment {
            image: self.image,
            state: Staged { image_stream },
        })
    }

    async fn push_to_hub<E, L>(&self, clients: Clients<'_, E>, listener: &L) -> Result<(), DeployError>
    where
        E: ProcessExecutor,
        L: DeploymentListener + ?Sized,
    {
        listener.on_message(&format!("Pushing {} to Docker Hub...", self.image));
        clients
            .docker
            .push_image(&self.image, &MessageForwarder(listener))
            .await
            .map_err(|source| DeployError::Push {
                image: self.image.clone(),
                source,
            })?;
        listener.on_message(&format!("Image {} pushed successfully", self.image));
        Ok(())
    }

    async fn push_to_openshift<E, L>(
        &self,
        clients: Clients<'_, E>,
        registry: &str,
        project: &str,
        listener: &L,
    ) -> Result<String, DeployError>
    where
        E: ProcessExecutor,
        L: DeploymentListener + ?Sized,
    {
        let forwarder = MessageForwarder(listener);

        listener.on_message(&format!("Logging to {registry}..."));
        clients
            .oc
            .registry_login(&clients.options, &forwarder)
            .await
            .map_err(DeployError::RegistryLogin)?;

        let image_stream = app_name(&self.image).to_string();
        listener.on_message(&format!("Creating image stream {image_stream}..."));
        match clients
            .oc
            .create_image_stream(&clients.options, &image_stream)
            .await
        {
            Ok(()) => {}
            Err(e) if is_already_exists(&e) => {
                listener.on_message(&format!(
                    "Image stream {image_stream} already exists, proceeding..."
                ));
            }
            Err(source) => {
                return Err(DeployError::ImageStream {
                    name: image_stream,
                    source,
                });
            }
        }

        let tag = build_tag(registry, project, &self.image);
        listener.on_message(&format!("Tagging  {tag}..."));
        clients
            .docker
            .tag_image(&self.image, &tag)
            .await
            .map_err(|source| DeployError::Tag {
                tag: tag.clone(),
                source,
            })?;

        listener.on_message(&format!("Pushing {tag} to remote registry..."));
        clients
            .docker
            .push_image(&tag, &forwarder)
            .await
            .map_err(|source| DeployError::Push {
                image: tag.clone(),
                source,
            })?;

        listener.on_message(&format!("Removing tag {tag}"));
        if let Err(e) = clients.docker.remove_tag(&tag).await {
            // The push already succeeded; a leftover local tag is only clutter.
            tracing::warn!("failed to remove local tag {}: {}", tag, e);
            listener.on_message(&format!("Failed to remove tag {tag}: {e}"));
        }

        Ok(image_stream)
    }
}

impl Deployment<Staged> {
    /// Create the application from the image stream, or the image itself.
    pub async fn deploy<E, L>(
        self,
        clients: Clients<'_, E>,
        listener: &L,
    ) -> Result<Deployment<Deployed>, DeployError>
    where
        E: ProcessExecutor,
        L: DeploymentListener + ?Sized,
    {
        listener.on_message(&format!("Deploying {} to OpenShift...", self.image));
        let data = self.data();
        clients
            .oc
            .deploy_image(&clients.options, data.deploy_ref(), &MessageForwarder(listener))
            .await
            .map_err(|source| DeployError::Deploy {
                image: self.image.clone(),
                source,
            })?;

        Ok(Deployment {
            image: self.image,
            state: Deployed,
        })
    }
}

impl Deployment<Deployed> {
    /// Inspect the local image for exposed ports.
    ///
    /// Returns the deployment unchanged when there is nothing to expose.
    pub async fn check_exposure<E: ProcessExecutor>(
        self,
        clients: Clients<'_, E>,
    ) -> Result<Deployment<Exposable>, Deployment<Deployed>> {
        let ports = clients.docker.exposed_ports(&self.image).await;
        if ports.is_empty() {
            return Err(self);
        }

        let app_name = app_name(&self.image).to_string();
        Ok(Deployment {
            image: self.image,
            state: Exposable { app_name, ports },
        })
    }
}

impl Deployment<Exposable> {
    /// `oc expose` the application's service. Returns the command output.
    pub async fn expose<E: ProcessExecutor>(
        &self,
        clients: Clients<'_, E>,
    ) -> Result<String, DeployError> {
        clients
            .oc
            .expose_service(&clients.options, &self.state.app_name)
            .await
            .map_err(|source| DeployError::Expose {
                app: self.state.app_name.clone(),
                source,
            })
    }

    /// Look up the route host assigned to the application.
    pub async fn route<E: ProcessExecutor>(
        &self,
        clients: Clients<'_, E>,
    ) -> Result<Option<String>, OcError> {
        clients
            .oc
            .get_project_route(&clients.options, &self.state.app_name)
            .await
    }
}
