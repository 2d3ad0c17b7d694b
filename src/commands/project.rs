// ABOUTME: Project command implementation.
// ABOUTME: Lists, switches and creates OpenShift projects.

use crate::cli::ProjectCommand;
use shiftdeploy::error::Result;
use shiftdeploy::exec::ProcessExecutor;
use shiftdeploy::output::{Output, OutputMode};
use shiftdeploy::session::Session;
use shiftdeploy::types::ProjectName;

pub async fn project<E: ProcessExecutor>(
    session: &Session<E>,
    command: ProjectCommand,
    output: &Output,
) -> Result<()> {
    let oc = session.oc();
    let options = session.options();

    match command {
        ProjectCommand::List => {
            let current = session.context().await?;
            let mut names = oc.load_project_names(options).await?;
            names.sort();
            if output.mode() == OutputMode::Json {
                output.json(&names);
                return Ok(());
            }
            for name in &names {
                let marker = if current.project() == Some(name.as_str()) {
                    "*"
                } else {
                    " "
                };
                output.item(&format!("{marker} {name}"));
            }
        }
        ProjectCommand::Use { name } => {
            oc.set_current_project(options, &name).await?;
            output.success(&format!("Now using project {name}"));
        }
        ProjectCommand::New { name } => {
            let name = ProjectName::new(&name)?;
            oc.create_project(options, name.as_str()).await?;
            output.success(&format!("Created project {name}"));
        }
    }
    Ok(())
}
