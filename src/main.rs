// ABOUTME: Entry point for the shiftdeploy CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use shiftdeploy::config::{self, Config};
use shiftdeploy::error::Result;
use shiftdeploy::exec::TokioExecutor;
use shiftdeploy::output::Output;
use shiftdeploy::session::Session;
use std::env;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let output = Output::new(cli.output_mode());
    let cwd = env::current_dir()?;

    if let Commands::Init {
        mode,
        registry,
        force,
    } = &cli.command
    {
        config::init_config(&cwd, *mode, registry.as_deref(), *force)?;
        output.success(&format!("Created {}", config::CONFIG_FILENAME));
        return Ok(());
    }

    let mut config = Config::discover(&cwd)?;
    cli.apply(&mut config);
    config.validate()?;

    let session = Session::new(&config, Arc::new(TokioExecutor::new()));

    match cli.command {
        Commands::Init { .. } => Ok(()),
        Commands::Deploy {
            image,
            mode,
            registry,
            no_wait,
            wait,
        } => {
            if let Some(mode) = mode {
                config.mode = mode;
            }
            if registry.is_some() {
                config.registry = registry;
            }
            if no_wait {
                config.wait.enabled = false;
            }
            wait.apply(&mut config);
            config.validate()?;
            commands::deploy(&session, &config, &image, output).await
        }
        Commands::Images => commands::images(&output).await,
        Commands::Context { command } => commands::context(&session, command, &output).await,
        Commands::Project { command } => commands::project(&session, command, &output).await,
        Commands::Login {
            cluster,
            username,
            password,
            token,
        } => {
            let credentials = commands::Credentials::from_args(username, password, token)?;
            commands::login(&session, &cluster, credentials, &output).await
        }
        Commands::ClusterInfo => commands::cluster_info(&session, &output).await,
        Commands::Wait { url, wait } => {
            wait.apply(&mut config);
            config.validate()?;
            commands::wait(&url, &config, &output).await
        }
    }
}
