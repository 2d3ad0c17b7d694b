// ABOUTME: One CLI invocation's view of the cluster: clients, options and link cache.
// ABOUTME: Resolves the current context and the registry used for pushes.

use std::sync::Arc;

use crate::cache::{ClusterLinks, ClusterLinksCache};
use crate::config::Config;
use crate::deploy::Clients;
use crate::docker::DockerClient;
use crate::error::{Error, Result};
use crate::exec::ProcessExecutor;
use crate::oc::{OcClient, OcOptions};
use crate::types::KubeContext;

/// Command wrappers sharing one executor, plus per-session lookups.
pub struct Session<E> {
    oc: OcClient<E>,
    docker: DockerClient<E>,
    options: OcOptions,
    links: ClusterLinksCache,
}

impl<E: ProcessExecutor> Session<E> {
    pub fn new(config: &Config, executor: Arc<E>) -> Self {
        Self {
            oc: OcClient::new(config.oc_path.clone(), Arc::clone(&executor)),
            docker: DockerClient::new(config.docker_path.clone(), executor),
            options: config.oc_options(),
            links: ClusterLinksCache::new(config.cache_ttl),
        }
    }

    pub fn oc(&self) -> &OcClient<E> {
        &self.oc
    }

    pub fn docker(&self) -> &DockerClient<E> {
        &self.docker
    }

    pub fn options(&self) -> &OcOptions {
        &self.options
    }

    pub fn clients(&self) -> Clients<'_, E> {
        Clients {
            oc: &self.oc,
            docker: &self.docker,
            options: self.options,
        }
    }

    /// The current context, failing when none is resolvable.
    pub async fn context(&self) -> Result<KubeContext> {
        let context = self.oc.load_kube_context(&self.options).await?;
        if context.is_unknown() {
            return Err(Error::NoContext);
        }
        Ok(context)
    }

    /// Console and registry URLs for the context's cluster, cached per cluster.
    pub async fn links(&self, context: &KubeContext) -> ClusterLinks {
        let Some(cluster_url) = context.cluster_url.as_deref() else {
            return ClusterLinks::default();
        };
        self.links
            .get_or_load(cluster_url, || self.oc.load_cluster_links(&self.options, context))
            .await
    }

    /// Registry to push to: the configured one, else the cluster's public route.
    pub async fn registry(&self, context: &KubeContext, configured: Option<&str>) -> Option<String> {
        if let Some(registry) = configured {
            return Some(registry.to_string());
        }
        let registry = self.links(context).await.registry_url;
        if registry.is_none() {
            tracing::warn!("no registry route found for {}", context);
        }
        registry
    }

    /// Drop cached links, e.g. after switching clusters.
    pub fn forget(&self, context: &KubeContext) {
        if let Some(cluster_url) = context.cluster_url.as_deref() {
            self.links.invalidate(cluster_url);
        }
    }
}
