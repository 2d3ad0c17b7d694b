// ABOUTME: Subset of the `docker image inspect` JSON document.
// ABOUTME: Only the fields used to decide whether an image exposes ports.

use serde::Deserialize;
use std::collections::HashMap;

/// One record of `docker image inspect` output.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageInspection {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub repo_tags: Option<Vec<String>>,
    #[serde(default)]
    pub config: Option<ImageConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageConfig {
    #[serde(default)]
    pub exposed_ports: Option<HashMap<String, serde_json::Value>>,
    #[serde(default)]
    pub labels: Option<HashMap<String, String>>,
}

impl ImageInspection {
    /// Declared exposed ports (`8080/tcp`, ...), sorted.
    pub fn exposed_ports(&self) -> Vec<String> {
        let mut ports: Vec<String> = self
            .config
            .as_ref()
            .and_then(|c| c.exposed_ports.as_ref())
            .map(|p| p.keys().cloned().collect())
            .unwrap_or_default();
        ports.sort();
        ports
    }
}
