// ABOUTME: Local image operations: docker CLI wrappers and the image inventory.
// ABOUTME: Tag, push, remove and inspect images; list what is available locally.

mod client;
mod error;
mod inspection;
mod inventory;

pub use client::{DockerClient, build_tag};
pub use error::{DockerError, InventoryError};
pub use inspection::{ImageConfig, ImageInspection};
pub use inventory::{BollardInventory, ImageInventory, LocalImage, local_image_names};
