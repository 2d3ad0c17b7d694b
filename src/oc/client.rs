// ABOUTME: OcClient maps domain operations onto single oc invocations.
// ABOUTME: Streaming commands forward lines to a listener; captured ones fail on stderr.

use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::kubeconfig::{KubeConfig, load_context};
use super::naming::parse_route;
use super::{OcError, OcOptions};
use crate::cache::ClusterLinks;
use crate::exec::{ExecListener, ExecResult, ProcessExecutor};
use crate::types::KubeContext;

const OPENSHIFT_APPS_API: &str = "apps.openshift.io/v1";
const CONSOLE_URL_JSONPATH: &str = "jsonpath={.data.consoleURL}";

/// Arguments that are followed by a secret value.
const SECRET_FLAGS: &[&str] = &["-p", "--password", "--token"];

/// Wrapper around the oc binary.
///
/// Holds only the binary path and a shared executor handle; every call is
/// independent.
pub struct OcClient<E> {
    path: String,
    executor: Arc<E>,
}

impl<E> std::fmt::Debug for OcClient<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OcClient").field("path", &self.path).finish()
    }
}

#[derive(Debug, Deserialize)]
struct ProjectList {
    #[serde(default)]
    items: Vec<ProjectItem>,
}

#[derive(Debug, Deserialize)]
struct ProjectItem {
    metadata: ProjectMetadata,
}

#[derive(Debug, Deserialize)]
struct ProjectMetadata {
    name: String,
}

/// Render arguments for logs and error messages with secrets masked.
fn display_args(args: &[String]) -> String {
    let mut shown = Vec::with_capacity(args.len());
    let mut mask_next = false;
    for arg in args {
        if mask_next {
            shown.push("*****");
            mask_next = false;
        } else {
            mask_next = SECRET_FLAGS.contains(&arg.as_str());
            shown.push(arg.as_str());
        }
    }
    shown.join(" ")
}

impl<E: ProcessExecutor> OcClient<E> {
    pub fn new(path: impl Into<String>, executor: Arc<E>) -> Self {
        Self {
            path: path.into(),
            executor,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Run a captured command, failing on non-zero exit or any stderr output.
    async fn run(&self, options: &OcOptions, base: &[&str]) -> Result<String, OcError> {
        let args = options.args(base);
        let command = display_args(&args);
        tracing::debug!(command = %command, "running oc");

        let result = self.executor.exec(&self.path, &args).await?;
        if result.failed() {
            tracing::debug!(command = %command, stderr = %result.stderr, "oc failed");
            let stderr = if result.stderr.trim().is_empty() {
                format!("exited with code {}", result.exit_code)
            } else {
                result.stderr.trim().to_string()
            };
            return Err(OcError::Command { command, stderr });
        }
        Ok(result.stdout)
    }

    /// Run a streaming command, forwarding each line to `listener`.
    async fn stream(
        &self,
        options: &OcOptions,
        base: &[&str],
        listener: &dyn ExecListener,
    ) -> Result<ExecResult, OcError> {
        let args = options.args(base);
        tracing::debug!(command = %display_args(&args), "streaming oc");

        let stream = self.executor.exec_streaming(&self.path, &args).await?;
        let result = stream.forward(listener).await?;
        tracing::debug!(exit_code = result.exit_code, "oc {} ended", base.join(" "));
        Ok(result)
    }

    fn parse<T: DeserializeOwned>(base: &[&str], stdout: &str) -> Result<T, OcError> {
        serde_json::from_str(stdout).map_err(|source| OcError::Parse {
            command: base.join(" "),
            source,
        })
    }

    // =========================================================================
    // Deployment
    // =========================================================================

    /// `oc new-app <image>`.
    pub async fn deploy_image(
        &self,
        options: &OcOptions,
        image: &str,
        listener: &dyn ExecListener,
    ) -> Result<(), OcError> {
        let result = self.stream(options, &["new-app", image], listener).await?;
        if !result.success() {
            return Err(OcError::AppCreation {
                image: image.to_string(),
            });
        }
        Ok(())
    }

    /// `oc registry login`. Returns the accumulated stdout.
    pub async fn registry_login(
        &self,
        options: &OcOptions,
        listener: &dyn ExecListener,
    ) -> Result<String, OcError> {
        let result = self.stream(options, &["registry", "login"], listener).await?;
        if !result.success() {
            return Err(OcError::RegistryLogin {
                stderr: result.stderr,
            });
        }
        Ok(result.stdout)
    }

    /// `oc expose service/<app_name>`.
    pub async fn expose_service(
        &self,
        options: &OcOptions,
        app_name: &str,
    ) -> Result<String, OcError> {
        let service = format!("service/{app_name}");
        self.run(options, &["expose", &service]).await
    }

    /// `oc describe route <app_name>`; `None` when no host is reported.
    pub async fn get_project_route(
        &self,
        options: &OcOptions,
        app_name: &str,
    ) -> Result<Option<String>, OcError> {
        let output = self.run(options, &["describe", "route", app_name]).await?;
        Ok(parse_route(&output))
    }

    /// `oc create imagestream <name>`.
    pub async fn create_image_stream(&self, options: &OcOptions, name: &str) -> Result<(), OcError> {
        self.run(options, &["create", "imagestream", name]).await?;
        tracing::info!("created image stream '{}'", name);
        Ok(())
    }

    // =========================================================================
    // Contexts and projects
    // =========================================================================

    /// `oc config view -o json`.
    pub async fn read_kube_config(&self, options: &OcOptions) -> Result<KubeConfig, OcError> {
        let base = ["config", "view", "-o", "json"];
        let stdout = self.run(options, &base).await?;
        Self::parse(&base, &stdout)
    }

    /// The current context, read fresh from the oc configuration.
    pub async fn load_kube_context(&self, options: &OcOptions) -> Result<KubeContext, OcError> {
        Ok(self.read_kube_config(options).await?.current())
    }

    /// Every resolvable context in the oc configuration.
    pub async fn load_contexts(&self, options: &OcOptions) -> Result<Vec<KubeContext>, OcError> {
        let config = self.read_kube_config(options).await?;
        Ok(config
            .contexts
            .iter()
            .map(|c| load_context(&config, &c.name))
            .filter(|c| !c.is_unknown())
            .collect())
    }

    /// Distinct cluster server URLs known to the oc configuration.
    pub async fn load_server_urls(&self, options: &OcOptions) -> Result<Vec<String>, OcError> {
        Ok(self.read_kube_config(options).await?.server_urls())
    }

    /// `oc config use-context <name>`, after checking the context exists.
    pub async fn set_current_context(&self, options: &OcOptions, name: &str) -> Result<(), OcError> {
        let config = self.read_kube_config(options).await?;
        if !config.contexts.iter().any(|c| c.name == name) {
            return Err(OcError::UnknownContext(name.to_string()));
        }
        self.run(options, &["config", "use-context", name]).await?;
        tracing::info!("current-context set to {}", name);
        Ok(())
    }

    /// `oc get projects -o json`, reduced to project names.
    pub async fn load_project_names(&self, options: &OcOptions) -> Result<Vec<String>, OcError> {
        let base = ["get", "projects", "-o", "json"];
        let stdout = self.run(options, &base).await?;
        let projects: ProjectList = Self::parse(&base, &stdout)?;
        Ok(projects
            .items
            .into_iter()
            .map(|p| p.metadata.name)
            .collect())
    }

    /// `oc project <name>`.
    pub async fn set_current_project(&self, options: &OcOptions, name: &str) -> Result<(), OcError> {
        self.run(options, &["project", name]).await?;
        tracing::info!("current project set to {}", name);
        Ok(())
    }

    /// `oc new-project <name>`.
    pub async fn create_project(&self, options: &OcOptions, name: &str) -> Result<(), OcError> {
        self.run(options, &["new-project", name]).await?;
        tracing::info!("created project '{}'", name);
        Ok(())
    }

    // =========================================================================
    // Cluster access
    // =========================================================================

    /// `oc login <cluster> -u <user> -p <password>`.
    pub async fn login(
        &self,
        options: &OcOptions,
        cluster: &str,
        username: &str,
        password: &str,
    ) -> Result<(), OcError> {
        self.run(options, &["login", cluster, "-u", username, "-p", password])
            .await?;
        tracing::info!("logged into cluster {} as {}", cluster, username);
        Ok(())
    }

    /// `oc login <cluster> --token <token>`.
    pub async fn login_with_token(
        &self,
        options: &OcOptions,
        cluster: &str,
        token: &str,
    ) -> Result<(), OcError> {
        self.run(options, &["login", cluster, "--token", token]).await?;
        tracing::info!("logged into cluster {} with a token", cluster);
        Ok(())
    }

    /// Whether the current cluster serves the OpenShift apps API.
    pub async fn is_openshift(&self, options: &OcOptions) -> Result<bool, OcError> {
        let stdout = self.run(options, &["api-versions"]).await?;
        let found = stdout.lines().any(|l| l.trim() == OPENSHIFT_APPS_API);
        tracing::debug!("the cluster is{} OpenShift", if found { "" } else { " not" });
        Ok(found)
    }

    /// Web console URL of the context's cluster.
    pub async fn console_url(
        &self,
        options: &OcOptions,
        context: &KubeContext,
    ) -> Result<Option<String>, OcError> {
        if context.cluster_url.is_none() {
            return Ok(None);
        }
        let stdout = self
            .run(
                options,
                &[
                    "get",
                    "configmaps",
                    "console-public",
                    "-n",
                    "openshift-config-managed",
                    "-o",
                    CONSOLE_URL_JSONPATH,
                ],
            )
            .await?;
        Ok(non_empty(&stdout))
    }

    /// `oc registry info`: public route of the integrated image registry.
    pub async fn registry_url(
        &self,
        options: &OcOptions,
        context: &KubeContext,
    ) -> Result<Option<String>, OcError> {
        if context.cluster_url.is_none() {
            return Ok(None);
        }
        let stdout = self.run(options, &["registry", "info"]).await?;
        Ok(non_empty(&stdout))
    }

    /// Console and registry URLs, treating lookup failures as absent.
    pub async fn load_cluster_links(&self, options: &OcOptions, context: &KubeContext) -> ClusterLinks {
        let console_url = self
            .console_url(options, context)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("console URL lookup failed: {}", e);
                None
            });
        let registry_url = self
            .registry_url(options, context)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("registry URL lookup failed: {}", e);
                None
            });
        ClusterLinks {
            console_url,
            registry_url,
        }
    }
}

fn non_empty(stdout: &str) -> Option<String> {
    let value = stdout.trim().trim_matches('"');
    (!value.is_empty()).then(|| value.to_string())
}
