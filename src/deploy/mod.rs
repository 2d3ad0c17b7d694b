// ABOUTME: Deployment orchestration using the type state pattern.
// ABOUTME: Sequences push, deploy, exposure and route discovery per deployment mode.

mod deployer;
mod deployment;
mod error;
mod listener;
mod mode;
mod state;
mod transitions;

pub use deployer::{DeployOutcome, Deployer};
pub use deployment::{Clients, Deployment, DeploymentData};
pub use error::{DeployError, DeployErrorKind};
pub use listener::{DeploymentListener, MessageForwarder};
pub use mode::{DeploymentMode, ParseModeError};
pub use state::{Deployed, Exposable, Initialized, Staged};
