// ABOUTME: Cluster identity resolved from the oc CLI configuration.
// ABOUTME: UNKNOWN is the sentinel for "no context resolved yet".

use serde::Serialize;
use std::fmt;

/// Placeholder shown for a context field that is not configured.
pub const UNSET_VALUE: &str = "Not set";

/// A named cluster/user/namespace triple. Absent fields are unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KubeContext {
    pub name: Option<String>,
    pub project: Option<String>,
    pub cluster_url: Option<String>,
    pub user: Option<String>,
}

impl KubeContext {
    /// No context resolved. Compared by equality, not by a flag.
    pub const UNKNOWN: KubeContext = KubeContext {
        name: None,
        project: None,
        cluster_url: None,
        user: None,
    };

    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }

    /// The selected project, unless it is missing or the unset placeholder.
    pub fn project(&self) -> Option<&str> {
        self.project
            .as_deref()
            .filter(|p| !p.is_empty() && *p != UNSET_VALUE)
    }

    pub fn has_project(&self) -> bool {
        self.project().is_some()
    }
}

impl fmt::Display for KubeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            return write!(f, "<no context>");
        }
        write!(
            f,
            "{} (project: {}, cluster: {}, user: {})",
            self.name.as_deref().unwrap_or(UNSET_VALUE),
            self.project.as_deref().unwrap_or(UNSET_VALUE),
            self.cluster_url.as_deref().unwrap_or(UNSET_VALUE),
            self.user.as_deref().unwrap_or(UNSET_VALUE),
        )
    }
}
