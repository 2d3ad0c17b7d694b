// ABOUTME: Polls an HTTP endpoint until it answers, fails hard, or time runs out.
// ABOUTME: Used after deployment to wait for a route to become reachable.

mod probe;
mod wait;

pub use probe::{HttpProbe, UrlProbe};
pub use wait::{MIN_INTERVAL, wait_on_url, wait_on_url_with};

use std::time::Duration;

/// Failure of a single probe request.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("invalid URL '{0}'")]
    InvalidUrl(String),

    #[error("unsupported URL scheme '{0}' (only http is supported)")]
    UnsupportedScheme(String),

    #[error("connection failed: {0}")]
    Connect(#[source] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] hyper::Error),

    #[error("failed to build request: {0}")]
    Request(String),

    #[error("no response within {0:?}")]
    TimedOut(Duration),

    #[error("server responded with status {0}")]
    Status(u16),
}

impl ProbeError {
    /// Whether the target might still come up: transport trouble or 503.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProbeError::Connect(_) | ProbeError::Http(_) | ProbeError::TimedOut(_) => true,
            ProbeError::Status(status) => *status == 503,
            ProbeError::InvalidUrl(_) | ProbeError::UnsupportedScheme(_) | ProbeError::Request(_) => {
                false
            }
        }
    }
}

/// Terminal failure of a wait.
#[derive(Debug, thiserror::Error)]
pub enum WaitError {
    /// The overall timeout elapsed before the target answered.
    #[error("{url} did not become available within {after:?}")]
    TimedOut { url: String, after: Duration },

    /// The target answered with a non-retryable failure.
    #[error("{url} is unavailable: {cause}")]
    Unavailable {
        url: String,
        #[source]
        cause: ProbeError,
    },
}

impl WaitError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, WaitError::TimedOut { .. })
    }
}
