// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates shiftdeploy.yml template files.

use std::path::Path;
use std::time::Duration;

use snafu::ResultExt;

use crate::deploy::DeploymentMode;
use crate::error::{Error, Result, WriteSnafu};

use super::{CONFIG_FILENAME, Config};

pub fn init_config(
    dir: &Path,
    mode: Option<DeploymentMode>,
    registry: Option<&str>,
    force: bool,
) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists { path: config_path });
    }

    let mut config = Config::template();
    if let Some(mode) = mode {
        config.mode = mode;
    }
    config.registry = registry.map(str::to_string);
    config.validate()?;

    let yaml = generate_template_yaml(&config);
    std::fs::write(&config_path, yaml).context(WriteSnafu { path: &config_path })?;
    tracing::info!("wrote {}", config_path.display());

    Ok(())
}

pub fn generate_template_yaml(config: &Config) -> String {
    let registry = match &config.registry {
        Some(registry) => format!("registry: {registry}"),
        None => "# registry: default-route-openshift-image-registry.apps.example.com".to_string(),
    };
    format!(
        r#"# Deployment mode: deploy, push-to-hub or push-to-openshift
mode: {}
{}
oc_path: {}
docker_path: {}
# Append --insecure-skip-tls-verify to every oc command
skip_tls_verify: {}
wait:
  enabled: {}
  timeout: {}
  interval: {}
cache_ttl: {}
"#,
        config.mode,
        registry,
        config.oc_path,
        config.docker_path,
        config.skip_tls_verify,
        config.wait.enabled,
        format_duration(config.wait.timeout),
        format_duration(config.wait.interval),
        format_duration(config.cache_ttl),
    )
}

/// Whole seconds when possible, milliseconds otherwise; both parse back via humantime.
fn format_duration(duration: Duration) -> String {
    if duration.subsec_millis() == 0 {
        format!("{}s", duration.as_secs())
    } else {
        format!("{}ms", duration.as_millis())
    }
}
