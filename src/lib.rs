// ABOUTME: Library root for shiftdeploy - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod cache;
pub mod config;
pub mod deploy;
pub mod docker;
pub mod error;
pub mod exec;
pub mod oc;
pub mod output;
pub mod poll;
pub mod session;
pub mod types;
