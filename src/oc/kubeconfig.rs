// ABOUTME: Subset of the kube config document printed by `oc config view -o json`.
// ABOUTME: Resolves a named context into a KubeContext.

use serde::Deserialize;

use crate::types::{KubeContext, UNSET_VALUE};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KubeConfig {
    #[serde(rename = "current-context", default)]
    pub current_context: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub clusters: Vec<NamedCluster>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub contexts: Vec<NamedContext>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub users: Vec<NamedUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedCluster {
    pub name: String,
    pub cluster: Cluster,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Cluster {
    pub server: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedContext {
    pub name: String,
    pub context: ContextEntry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContextEntry {
    pub cluster: String,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedUser {
    pub name: String,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl KubeConfig {
    /// Distinct cluster server URLs, in the order they first appear.
    pub fn server_urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = Vec::new();
        for cluster in &self.clusters {
            if !urls.contains(&cluster.cluster.server) {
                urls.push(cluster.cluster.server.clone());
            }
        }
        urls
    }

    /// The context named by `current-context`, or `UNKNOWN`.
    pub fn current(&self) -> KubeContext {
        match self.current_context.as_deref() {
            Some(name) if !name.is_empty() => load_context(self, name),
            _ => KubeContext::UNKNOWN,
        }
    }
}

/// Resolve `name` into a [`KubeContext`].
///
/// Returns `UNKNOWN` when the context or its cluster cannot be found.
pub fn load_context(config: &KubeConfig, name: &str) -> KubeContext {
    let Some(entry) = config.contexts.iter().find(|c| c.name == name) else {
        return KubeContext::UNKNOWN;
    };

    let Some(cluster) = config
        .clusters
        .iter()
        .find(|c| c.name == entry.context.cluster)
    else {
        return KubeContext::UNKNOWN;
    };

    let project = entry
        .context
        .namespace
        .clone()
        .filter(|ns| !ns.is_empty())
        .unwrap_or_else(|| UNSET_VALUE.to_string());

    // User entries are named `<user>/<cluster>` by `oc login`.
    let user = entry
        .context
        .user
        .as_deref()
        .and_then(|u| config.users.iter().find(|item| item.name == u))
        .map(|item| match item.name.split_once('/') {
            Some((user, _)) => user.to_string(),
            None => item.name.clone(),
        })
        .unwrap_or_else(|| UNSET_VALUE.to_string());

    KubeContext {
        name: Some(name.to_string()),
        project: Some(project),
        cluster_url: Some(cluster.cluster.server.clone()),
        user: Some(user),
    }
}
