// ABOUTME: Deployment modes selecting whether and where an image is pushed first.
// ABOUTME: Parsed from CLI flags and config files.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where, if anywhere, the image is pushed before deploying.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeploymentMode {
    /// Deploy the image reference as is.
    #[default]
    Deploy,
    /// Push to the public registry, then deploy.
    #[serde(rename = "push-to-hub")]
    PushToHubAndDeploy,
    /// Push to the cluster's integrated registry, then deploy the image stream.
    #[serde(rename = "push-to-openshift")]
    PushToOpenShiftAndDeploy,
}

impl DeploymentMode {
    pub const ALL: [DeploymentMode; 3] = [
        DeploymentMode::Deploy,
        DeploymentMode::PushToHubAndDeploy,
        DeploymentMode::PushToOpenShiftAndDeploy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentMode::Deploy => "deploy",
            DeploymentMode::PushToHubAndDeploy => "push-to-hub",
            DeploymentMode::PushToOpenShiftAndDeploy => "push-to-openshift",
        }
    }

    /// Whether this mode needs the cluster registry URL.
    pub fn requires_registry(&self) -> bool {
        matches!(self, DeploymentMode::PushToOpenShiftAndDeploy)
    }
}

impl fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown deployment mode '{0}' (expected deploy, push-to-hub or push-to-openshift)")]
pub struct ParseModeError(String);

impl FromStr for DeploymentMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseModeError(s.to_string()))
    }
}
