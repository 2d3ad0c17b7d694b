// ABOUTME: Validated domain types shared across the crate.
// ABOUTME: Cluster context identity, image references and OpenShift resource names.

mod image_tag;
mod kube_context;
mod project_name;

pub use image_tag::{ImageTag, ImageTagError};
pub use kube_context::{KubeContext, UNSET_VALUE};
pub use project_name::{ProjectName, ProjectNameError};
