// ABOUTME: Deploy command implementation.
// ABOUTME: Runs the deployer against the current context and waits for the route.

use shiftdeploy::config::Config;
use shiftdeploy::deploy::{DeployOutcome, Deployer};
use shiftdeploy::error::{Error, Result};
use shiftdeploy::exec::ProcessExecutor;
use shiftdeploy::output::Output;
use shiftdeploy::poll::wait_on_url;
use shiftdeploy::session::Session;
use shiftdeploy::types::ImageTag;

/// Deploy `image` to the current project.
pub async fn deploy<E: ProcessExecutor>(
    session: &Session<E>,
    config: &Config,
    image: &str,
    mut output: Output,
) -> Result<()> {
    let image = ImageTag::parse(image)?;
    output.start_timer();

    let context = session.context().await?;
    if !session.oc().is_openshift(session.options()).await? {
        return Err(Error::NotOpenShift {
            server: context.cluster_url.clone().unwrap_or_default(),
        });
    }

    output.progress(&format!(
        "Deploying {} to project '{}' on {}",
        image,
        context.project().unwrap_or("<none>"),
        context.cluster_url.as_deref().unwrap_or("<unknown cluster>"),
    ));

    let registry = if config.mode.requires_registry() {
        session.registry(&context, config.registry.as_deref()).await
    } else {
        config.registry.clone()
    };

    let deployer = Deployer::new(session.clients(), config.mode, &output);
    let outcome = deployer
        .deploy(image.as_str(), &context, registry.as_deref())
        .await;

    let route = match outcome {
        DeployOutcome::Failed(kind) => {
            tracing::debug!(?kind, "deployment failed");
            return Err(Error::DeploymentFailed {
                image: image.to_string(),
            });
        }
        DeployOutcome::NotExposed | DeployOutcome::Routed(None) => {
            output.success(&format!("Deployed {image}"));
            return Ok(());
        }
        DeployOutcome::Routed(Some(route)) => route,
    };

    if config.wait.enabled {
        output.progress(&format!("Waiting for {route} to become available"));
        wait_on_url(&route, config.wait.timeout, config.wait.interval, || {
            output.tick()
        })
        .await?;
    }

    if let Some(console) = session.links(&context).await.console_url {
        output.progress(&format!("Console: {console}"));
    }
    output.success(&format!("{image} is available at {route}"));
    Ok(())
}
