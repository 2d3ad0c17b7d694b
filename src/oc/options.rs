// ABOUTME: Options applied to every oc invocation.
// ABOUTME: Also resolves the platform-specific oc binary name.

use serde::{Deserialize, Serialize};

/// Flag appended to every command when TLS verification is skipped.
pub const SKIP_TLS_VERIFY_FLAG: &str = "--insecure-skip-tls-verify";

/// Read-only options for oc invocations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcOptions {
    #[serde(default)]
    pub skip_tls_verify: bool,
}

impl OcOptions {
    /// Full argument list for a command, with option flags appended.
    pub fn args(&self, base: &[&str]) -> Vec<String> {
        let mut args: Vec<String> = base.iter().map(|a| a.to_string()).collect();
        if self.skip_tls_verify {
            args.push(SKIP_TLS_VERIFY_FLAG.to_string());
        }
        args
    }
}

/// Name of the oc binary on this platform.
pub fn default_oc_path() -> &'static str {
    if cfg!(windows) { "oc.exe" } else { "oc" }
}
