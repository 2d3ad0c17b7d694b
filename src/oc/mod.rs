// ABOUTME: Wrappers around the oc CLI.
// ABOUTME: One domain operation per invocation, with deterministic output parsing.

mod client;
mod error;
mod kubeconfig;
mod naming;
mod options;

pub use client::OcClient;
pub use error::OcError;
pub use kubeconfig::{KubeConfig, load_context};
pub use naming::{app_name, is_already_exists, parse_route};
pub use options::{OcOptions, default_oc_path};
