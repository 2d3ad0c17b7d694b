// ABOUTME: Session-scoped cache of per-cluster console and registry URLs.
// ABOUTME: Avoids repeating oc probes for the same cluster within a TTL.

use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};

/// Default lifetime of a cached entry.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// URLs discovered for one cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClusterLinks {
    pub console_url: Option<String>,
    pub registry_url: Option<String>,
}

/// Cache keyed by cluster URL. Owned by whoever holds session state.
#[derive(Debug)]
pub struct ClusterLinksCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, (Instant, ClusterLinks)>>,
}

impl Default for ClusterLinksCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl ClusterLinksCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Cached links for `cluster_url`, if present and not expired.
    pub fn get(&self, cluster_url: &str) -> Option<ClusterLinks> {
        let mut entries = self.entries.lock();
        match entries.get(cluster_url) {
            Some((stored, links)) if stored.elapsed() < self.ttl => Some(links.clone()),
            Some(_) => {
                entries.remove(cluster_url);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, cluster_url: &str, links: ClusterLinks) {
        self.entries
            .lock()
            .insert(cluster_url.to_string(), (Instant::now(), links));
    }

    pub fn invalidate(&self, cluster_url: &str) {
        self.entries.lock().remove(cluster_url);
    }

    /// Cached links, or the result of `load` which is then cached.
    ///
    /// The lock is not held while `load` runs.
    pub async fn get_or_load<F, Fut>(&self, cluster_url: &str, load: F) -> ClusterLinks
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClusterLinks>,
    {
        if let Some(links) = self.get(cluster_url) {
            tracing::debug!("cluster links cache hit for {}", cluster_url);
            return links;
        }

        let links = load().await;
        self.insert(cluster_url, links.clone());
        links
    }
}
