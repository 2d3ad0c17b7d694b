// ABOUTME: Deployer drives one deployment attempt through its phases.
// ABOUTME: Every outcome is reported through the listener; nothing escapes as an error.

use crate::exec::ProcessExecutor;
use crate::types::KubeContext;

use super::deployment::{Clients, Deployment};
use super::error::{DeployError, DeployErrorKind};
use super::listener::DeploymentListener;
use super::mode::DeploymentMode;

/// How a deployment attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    /// A terminal failure was reported via `on_failure`.
    Failed(DeployErrorKind),
    /// Deployed, but the image declares no ports so no route was created.
    NotExposed,
    /// Route discovery ran; `None` when no host was reported.
    Routed(Option<String>),
}

impl DeployOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, DeployOutcome::Failed(_))
    }

    pub fn route(&self) -> Option<&str> {
        match self {
            DeployOutcome::Routed(route) => route.as_deref(),
            _ => None,
        }
    }
}

/// Orchestrates one deployment attempt.
///
/// Constructed per attempt and discarded afterwards. Phases run strictly in
/// sequence; concurrent deployers are not coordinated with each other.
pub struct Deployer<'a, E, L: ?Sized> {
    clients: Clients<'a, E>,
    mode: DeploymentMode,
    listener: &'a L,
}

impl<'a, E, L> Deployer<'a, E, L>
where
    E: ProcessExecutor,
    L: DeploymentListener + ?Sized,
{
    pub fn new(clients: Clients<'a, E>, mode: DeploymentMode, listener: &'a L) -> Self {
        Self {
            clients,
            mode,
            listener,
        }
    }

    /// Run every phase for `image` against `context`.
    ///
    /// `registry` is only consulted in [`DeploymentMode::PushToOpenShiftAndDeploy`].
    pub async fn deploy(
        &self,
        image: &str,
        context: &KubeContext,
        registry: Option<&str>,
    ) -> DeployOutcome {
        let listener = self.listener;
        tracing::info!(image, mode = %self.mode, context = %context, "starting deployment");

        let deployment = Deployment::new(image);
        let staged = match deployment
            .stage(self.clients, self.mode, context, registry, listener)
            .await
        {
            Ok(staged) => staged,
            Err(e) => {
                return self.fail(&format!("Failed to prepare {image} for deployment"), &e);
            }
        };

        let deployed = match staged.deploy(self.clients, listener).await {
            Ok(deployed) => deployed,
            Err(e) => return self.fail(&format!("Failed to deploy {image}"), &e),
        };

        let exposable = match deployed.check_exposure(self.clients).await {
            Ok(exposable) => exposable,
            Err(_) => {
                tracing::info!("{} declares no ports", image);
                listener.on_not_exposed(&format!(
                    "No exposed ports found, so no route is created for {image}"
                ));
                return DeployOutcome::NotExposed;
            }
        };

        let app = exposable.app_name().to_string();
        listener.on_message(&format!(
            "Found exposed port(s) {} for {image}",
            exposable.state().ports().join(", ")
        ));

        match exposable.expose(self.clients).await {
            Ok(output) => {
                let output = output.trim();
                if !output.is_empty() {
                    listener.on_message(output);
                }
            }
            // The route may already exist from an earlier deploy, so carry on.
            Err(e) if !e.is_terminal() => {
                self.report(&format!("Failed to expose {app} for {image}"), &e);
            }
            Err(e) => return self.fail(&format!("Failed to expose {app} for {image}"), &e),
        }

        let route = match exposable.route(self.clients).await {
            Ok(route) => route,
            Err(e) => {
                tracing::warn!("route lookup for {} failed: {}", app, e);
                None
            }
        };
        if let Some(route) = &route {
            listener.on_message(&format!("Application {app} exposed at {route}"));
        }
        listener.on_route(route.as_deref());
        DeployOutcome::Routed(route)
    }

    fn report(&self, text: &str, error: &DeployError) {
        if error.is_terminal() {
            tracing::error!("{}: {}", text, error);
        } else {
            tracing::warn!("{}: {}", text, error);
        }
        self.listener.on_failure(text, error);
    }

    fn fail(&self, text: &str, error: &DeployError) -> DeployOutcome {
        self.report(text, error);
        DeployOutcome::Failed(error.kind())
    }
}
