// ABOUTME: Context command implementation.
// ABOUTME: Shows, lists and switches oc contexts.

use crate::cli::ContextCommand;
use shiftdeploy::error::Result;
use shiftdeploy::exec::ProcessExecutor;
use shiftdeploy::output::{Output, OutputMode};
use shiftdeploy::session::Session;
use shiftdeploy::types::UNSET_VALUE;

pub async fn context<E: ProcessExecutor>(
    session: &Session<E>,
    command: ContextCommand,
    output: &Output,
) -> Result<()> {
    let oc = session.oc();
    let options = session.options();

    match command {
        ContextCommand::Show => {
            let context = session.context().await?;
            if output.mode() == OutputMode::Json {
                output.json(&context);
            } else {
                output.item(&format!(
                    "Context: {}",
                    context.name.as_deref().unwrap_or(UNSET_VALUE)
                ));
                output.item(&format!(
                    "Cluster: {}",
                    context.cluster_url.as_deref().unwrap_or(UNSET_VALUE)
                ));
                output.item(&format!(
                    "Project: {}",
                    context.project.as_deref().unwrap_or(UNSET_VALUE)
                ));
                output.item(&format!(
                    "User:    {}",
                    context.user.as_deref().unwrap_or(UNSET_VALUE)
                ));
            }
        }
        ContextCommand::List => {
            let current = oc.load_kube_context(options).await?;
            let contexts = oc.load_contexts(options).await?;
            if output.mode() == OutputMode::Json {
                output.json(&contexts);
                return Ok(());
            }
            for context in &contexts {
                let marker = if *context == current { "*" } else { " " };
                output.item(&format!(
                    "{marker} {}",
                    context.name.as_deref().unwrap_or(UNSET_VALUE)
                ));
            }
        }
        ContextCommand::Use { name } => {
            let previous = oc.load_kube_context(options).await?;
            oc.set_current_context(options, &name).await?;
            session.forget(&previous);
            output.success(&format!("Switched to context {name}"));
        }
    }
    Ok(())
}
