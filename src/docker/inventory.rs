// ABOUTME: Local image inventory from the Docker Engine API via bollard.
// ABOUTME: Lists images with their tags and labels for image selection.

use async_trait::async_trait;
use bollard::Docker;
use bollard::query_parameters::ListImagesOptions;
use serde::Serialize;
use std::collections::HashMap;

use super::InventoryError;

const UNTAGGED: &str = "<none>:<none>";

/// An image available to the local daemon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocalImage {
    pub id: String,
    pub repo_tags: Vec<String>,
    pub labels: HashMap<String, String>,
}

/// Source of local images.
#[async_trait]
pub trait ImageInventory: Send + Sync {
    async fn list_images(&self) -> Result<Vec<LocalImage>, InventoryError>;
}

/// Sorted, de-duplicated tags of `images`, without untagged entries.
pub fn local_image_names(images: &[LocalImage]) -> Vec<String> {
    let mut names: Vec<String> = images
        .iter()
        .flat_map(|image| image.repo_tags.iter())
        .filter(|tag| tag.as_str() != UNTAGGED)
        .cloned()
        .collect();
    names.sort();
    names.dedup();
    names
}

/// Inventory backed by the local Docker Engine socket.
pub struct BollardInventory {
    client: Docker,
}

impl BollardInventory {
    /// Connect using the platform defaults (`DOCKER_HOST` or the local socket).
    pub fn connect() -> Result<Self, InventoryError> {
        let client = Docker::connect_with_local_defaults()
            .map_err(|e| InventoryError::ConnectionFailed(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ImageInventory for BollardInventory {
    async fn list_images(&self) -> Result<Vec<LocalImage>, InventoryError> {
        let opts = ListImagesOptions {
            all: false,
            ..Default::default()
        };

        let images = self
            .client
            .list_images(Some(opts))
            .await
            .map_err(|e| InventoryError::ListFailed(e.to_string()))?;

        Ok(images
            .into_iter()
            .map(|summary| LocalImage {
                id: summary.id,
                repo_tags: summary.repo_tags,
                labels: summary.labels,
            })
            .collect())
    }
}
