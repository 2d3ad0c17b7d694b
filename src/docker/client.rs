// ABOUTME: DockerClient wraps the docker CLI for tagging, pushing and inspecting images.
// ABOUTME: Inspection failures are soft: they mean "no metadata available".

use std::sync::Arc;

use super::{DockerError, ImageInspection};
use crate::exec::{ExecListener, ExecResult, ProcessExecutor};

/// Wrapper around the docker binary.
pub struct DockerClient<E> {
    path: String,
    executor: Arc<E>,
}

impl<E> std::fmt::Debug for DockerClient<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DockerClient")
            .field("path", &self.path)
            .finish()
    }
}

/// Tag for pushing `original` into `<registry>/<namespace>`.
///
/// Only the last `/` segment of `original` (name and tag) is kept.
pub fn build_tag(registry: &str, namespace: &str, original: &str) -> String {
    let last = original.rsplit('/').next().unwrap_or(original);
    format!("{registry}/{namespace}/{last}")
}

fn args(base: &[&str]) -> Vec<String> {
    base.iter().map(|a| a.to_string()).collect()
}

fn check(base: &[&str], result: ExecResult) -> Result<ExecResult, DockerError> {
    if result.success() {
        Ok(result)
    } else {
        Err(DockerError::Command {
            command: base.join(" "),
            stderr: result.stderr.trim().to_string(),
        })
    }
}

impl<E: ProcessExecutor> DockerClient<E> {
    pub fn new(path: impl Into<String>, executor: Arc<E>) -> Self {
        Self {
            path: path.into(),
            executor,
        }
    }

    async fn run(&self, base: &[&str]) -> Result<ExecResult, DockerError> {
        tracing::debug!(command = %base.join(" "), "running docker");
        let result = self.executor.exec(&self.path, &args(base)).await?;
        check(base, result)
    }

    /// `docker tag <source> <target>`.
    pub async fn tag_image(&self, source: &str, target: &str) -> Result<(), DockerError> {
        self.run(&["tag", source, target]).await?;
        Ok(())
    }

    /// `docker rmi <tag>`.
    pub async fn remove_tag(&self, tag: &str) -> Result<(), DockerError> {
        self.run(&["rmi", tag]).await?;
        Ok(())
    }

    /// `docker push <tag>`, streaming progress to `listener`.
    pub async fn push_image(
        &self,
        tag: &str,
        listener: &dyn ExecListener,
    ) -> Result<(), DockerError> {
        let base = ["push", tag];
        tracing::debug!(command = %base.join(" "), "streaming docker");
        let stream = self.executor.exec_streaming(&self.path, &args(&base)).await?;
        let result = stream.forward(listener).await?;
        check(&base, result)?;
        Ok(())
    }

    /// `docker image inspect <tag>`, parsed.
    ///
    /// Any failure is logged and returned as `None`.
    pub async fn inspect_image(&self, tag: &str) -> Option<Vec<ImageInspection>> {
        let result = match self.run(&["image", "inspect", tag]).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("failed to inspect {}: {}", tag, e);
                return None;
            }
        };

        match serde_json::from_str(&result.stdout) {
            Ok(records) => Some(records),
            Err(e) => {
                tracing::warn!("unexpected inspection output for {}: {}", tag, e);
                None
            }
        }
    }

    /// Exposed ports of the first inspection record; empty when unknown.
    pub async fn exposed_ports(&self, tag: &str) -> Vec<String> {
        self.inspect_image(tag)
            .await
            .and_then(|records| records.into_iter().next())
            .map(|record| record.exposed_ports())
            .unwrap_or_default()
    }
}
