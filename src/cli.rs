// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands, their arguments, and config overrides.

use clap::{Args, Parser, Subcommand};
use shiftdeploy::config::Config;
use shiftdeploy::deploy::DeploymentMode;
use shiftdeploy::output::OutputMode;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "shiftdeploy")]
#[command(about = "Deploy local container images to OpenShift")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print final results
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Print JSON lines instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Append --insecure-skip-tls-verify to every oc command
    #[arg(long, global = true)]
    pub insecure_skip_tls_verify: bool,

    /// Path to the oc binary
    #[arg(long, global = true, value_name = "PATH")]
    pub oc: Option<String>,

    /// Path to the docker binary
    #[arg(long, global = true, value_name = "PATH")]
    pub docker: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new shiftdeploy.yml configuration file
    Init {
        /// Default deployment mode
        #[arg(short, long)]
        mode: Option<DeploymentMode>,

        /// Registry host for push-to-openshift
        #[arg(long)]
        registry: Option<String>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Deploy a local image to the current project
    Deploy {
        /// Local image reference, e.g. acme/web:1.0
        image: String,

        /// Deployment mode: deploy, push-to-hub or push-to-openshift
        #[arg(short, long)]
        mode: Option<DeploymentMode>,

        /// Registry host for push-to-openshift
        #[arg(long)]
        registry: Option<String>,

        /// Do not wait for the route to become reachable
        #[arg(long)]
        no_wait: bool,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// List local images
    Images,

    /// Show or switch cluster contexts
    Context {
        #[command(subcommand)]
        command: ContextCommand,
    },

    /// List, switch or create projects
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },

    /// Log into a cluster
    #[command(group(
        clap::ArgGroup::new("credentials")
            .required(true)
            .args(["username", "token"])
    ))]
    Login {
        /// Cluster API URL
        cluster: String,

        #[arg(short, long, requires = "password")]
        username: Option<String>,

        #[arg(short, long, requires = "username")]
        password: Option<String>,

        /// Log in with a token instead of a password
        #[arg(long)]
        token: Option<String>,
    },

    /// Show the current cluster's console and registry
    ClusterInfo,

    /// Wait for a URL to answer
    Wait {
        /// http:// URL to poll
        url: String,

        #[command(flatten)]
        wait: WaitArgs,
    },
}

#[derive(Subcommand)]
pub enum ContextCommand {
    /// Show the current context
    Show,
    /// List every context in the oc configuration
    List,
    /// Switch to another context
    Use { name: String },
}

#[derive(Subcommand)]
pub enum ProjectCommand {
    /// List projects visible to the current user
    List,
    /// Switch the current project
    Use { name: String },
    /// Create a project and switch to it
    New { name: String },
}

#[derive(Args, Clone, Copy, Default)]
pub struct WaitArgs {
    /// Give up after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Seconds between attempts
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,
}

impl Cli {
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        }
    }

    /// Overlay global flags onto the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if self.insecure_skip_tls_verify {
            config.skip_tls_verify = true;
        }
        if let Some(oc) = &self.oc {
            config.oc_path = oc.clone();
        }
        if let Some(docker) = &self.docker {
            config.docker_path = docker.clone();
        }
    }
}

impl WaitArgs {
    pub fn apply(&self, config: &mut Config) {
        if let Some(timeout) = self.timeout {
            config.wait.timeout = Duration::from_secs(timeout);
        }
        if let Some(interval) = self.interval {
            config.wait.interval = Duration::from_secs(interval);
        }
    }
}
