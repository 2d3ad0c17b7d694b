// ABOUTME: Cluster-info command implementation.
// ABOUTME: Prints the console and integrated registry URLs of the current cluster.

use serde::Serialize;
use shiftdeploy::error::{Error, Result};
use shiftdeploy::exec::ProcessExecutor;
use shiftdeploy::output::{Output, OutputMode};
use shiftdeploy::session::Session;
use shiftdeploy::types::KubeContext;

#[derive(Serialize)]
struct ClusterInfo<'a> {
    context: &'a KubeContext,
    console_url: Option<&'a str>,
    registry_url: Option<&'a str>,
}

pub async fn cluster_info<E: ProcessExecutor>(session: &Session<E>, output: &Output) -> Result<()> {
    let context = session.context().await?;
    if !session.oc().is_openshift(session.options()).await? {
        return Err(Error::NotOpenShift {
            server: context.cluster_url.clone().unwrap_or_default(),
        });
    }

    let links = session.links(&context).await;
    if output.mode() == OutputMode::Json {
        output.json(&ClusterInfo {
            context: &context,
            console_url: links.console_url.as_deref(),
            registry_url: links.registry_url.as_deref(),
        });
        return Ok(());
    }

    output.item(&format!(
        "Cluster:  {}",
        context.cluster_url.as_deref().unwrap_or("Unavailable")
    ));
    output.item(&format!(
        "Console:  {}",
        links.console_url.as_deref().unwrap_or("Unavailable")
    ));
    output.item(&format!(
        "Registry: {}",
        links.registry_url.as_deref().unwrap_or("Unavailable")
    ));
    Ok(())
}
