// ABOUTME: Configuration types and parsing for shiftdeploy.yml.
// ABOUTME: Every field is optional; a missing file means all defaults.

mod init;

pub use init::{generate_template_yaml, init_config};

use crate::cache::DEFAULT_TTL;
use crate::deploy::DeploymentMode;
use crate::error::{ConfigParseSnafu, ConfigReadSnafu, Error, Result};
use crate::oc::{OcOptions, default_oc_path};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "shiftdeploy.yml";
pub const CONFIG_FILENAME_ALT: &str = "shiftdeploy.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".shiftdeploy/config.yml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path to the oc binary.
    #[serde(default = "default_oc_binary")]
    pub oc_path: String,

    /// Path to the docker binary.
    #[serde(default = "default_docker_path")]
    pub docker_path: String,

    /// Append `--insecure-skip-tls-verify` to every oc command.
    #[serde(default)]
    pub skip_tls_verify: bool,

    #[serde(default)]
    pub mode: DeploymentMode,

    /// Registry for push-to-openshift; looked up with `oc registry info` when absent.
    #[serde(default)]
    pub registry: Option<String>,

    #[serde(default)]
    pub wait: WaitConfig,

    /// How long console and registry lookups are reused.
    #[serde(default = "default_cache_ttl", with = "humantime_serde")]
    pub cache_ttl: Duration,
}

/// Route availability polling after a deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WaitConfig {
    #[serde(default = "default_wait_enabled")]
    pub enabled: bool,

    #[serde(default = "default_wait_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    #[serde(default = "default_wait_interval", with = "humantime_serde")]
    pub interval: Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            enabled: default_wait_enabled(),
            timeout: default_wait_timeout(),
            interval: default_wait_interval(),
        }
    }
}

fn default_oc_binary() -> String {
    default_oc_path().to_string()
}

fn default_docker_path() -> String {
    if cfg!(windows) {
        "docker.exe".to_string()
    } else {
        "docker".to_string()
    }
}

fn default_wait_enabled() -> bool {
    true
}

fn default_wait_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_wait_interval() -> Duration {
    Duration::from_secs(1)
}

fn default_cache_ttl() -> Duration {
    DEFAULT_TTL
}

impl Default for Config {
    fn default() -> Self {
        Config {
            oc_path: default_oc_binary(),
            docker_path: default_docker_path(),
            skip_tls_verify: false,
            mode: DeploymentMode::default(),
            registry: None,
            wait: WaitConfig::default(),
            cache_ttl: default_cache_ttl(),
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // An empty file is a valid config with every default.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).context(ConfigReadSnafu { path })?;
        let config = Self::from_yaml(&content).context(ConfigParseSnafu { path })?;
        config.validate()?;
        tracing::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// First existing config file in `dir`, in precedence order.
    pub fn find(dir: &Path) -> Option<PathBuf> {
        [CONFIG_FILENAME, CONFIG_FILENAME_ALT, CONFIG_FILENAME_DIR]
            .into_iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Load the config file found in `dir`, or defaults when there is none.
    pub fn discover(dir: &Path) -> Result<Self> {
        match Self::find(dir) {
            Some(path) => Self::load(&path),
            None => {
                tracing::debug!("no configuration file in {}, using defaults", dir.display());
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.oc_path.trim().is_empty() {
            return Err(invalid("oc_path cannot be empty"));
        }
        if self.docker_path.trim().is_empty() {
            return Err(invalid("docker_path cannot be empty"));
        }
        if self.wait.interval.is_zero() {
            return Err(invalid("wait.interval must be greater than zero"));
        }
        if self.wait.timeout < self.wait.interval {
            return Err(invalid("wait.timeout must not be shorter than wait.interval"));
        }
        if self
            .registry
            .as_deref()
            .is_some_and(|r| r.trim().is_empty() || r.contains("://"))
        {
            return Err(invalid("registry must be a host name without a scheme"));
        }
        Ok(())
    }

    pub fn oc_options(&self) -> OcOptions {
        OcOptions {
            skip_tls_verify: self.skip_tls_verify,
        }
    }

    pub fn template() -> Self {
        Self::default()
    }
}

fn invalid(message: &str) -> Error {
    Error::InvalidConfig {
        message: message.to_string(),
    }
}
