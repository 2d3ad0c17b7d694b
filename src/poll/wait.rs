// ABOUTME: Bounded retry loop racing a fixed-interval probe against an overall timeout.
// ABOUTME: The first terminal event wins; the losing side never reports.

use std::time::Duration;

use super::probe::{HttpProbe, UrlProbe};
use super::{ProbeError, WaitError};

/// Lower bound applied to the polling interval.
pub const MIN_INTERVAL: Duration = Duration::from_millis(10);

/// Wait for `url` to answer 2xx using plain HTTP probes.
///
/// See [`wait_on_url_with`].
pub async fn wait_on_url(
    url: &str,
    timeout: Duration,
    interval: Duration,
    on_tick: impl FnMut(),
) -> Result<(), WaitError> {
    wait_on_url_with(&HttpProbe, url, timeout, interval, on_tick).await
}

/// Probe `url` every `interval` until it answers, fails hard, or `timeout` elapses.
///
/// The first probe is sent after one interval. Each probe is bounded by
/// `interval` so a hung request cannot stall the cadence. `on_tick` runs once
/// per retryable failure and never after the wait has ended.
pub async fn wait_on_url_with<P: UrlProbe + ?Sized>(
    probe: &P,
    url: &str,
    timeout: Duration,
    interval: Duration,
    mut on_tick: impl FnMut(),
) -> Result<(), WaitError> {
    let interval = interval.max(MIN_INTERVAL);
    tracing::debug!(url, ?timeout, ?interval, "waiting for url");

    let worker = async {
        let mut attempt = 0u32;
        loop {
            tokio::time::sleep(interval).await;
            attempt += 1;
            match probe.probe(url, interval).await {
                Ok(()) => {
                    tracing::info!(url, attempt, "url is available");
                    return Ok(());
                }
                Err(e) if e.is_retryable() => {
                    tracing::debug!(url, attempt, "not ready: {}", e);
                    on_tick();
                }
                Err(cause) => return Err(unavailable(url, cause)),
            }
        }
    };

    let timer = async {
        tokio::time::sleep(timeout).await;
        tracing::warn!(url, ?timeout, "timed out waiting for url");
        WaitError::TimedOut {
            url: url.to_string(),
            after: timeout,
        }
    };

    // Whichever side loses is dropped here, so no tick or probe outlives the wait.
    tokio::select! {
        biased;
        result = worker => result,
        err = timer => Err(err),
    }
}

fn unavailable(url: &str, cause: ProbeError) -> WaitError {
    tracing::warn!(url, "giving up: {}", cause);
    WaitError::Unavailable {
        url: url.to_string(),
        cause,
    }
}
