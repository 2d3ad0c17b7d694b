// ABOUTME: Wait command implementation.
// ABOUTME: Polls a URL with the configured timeout and interval.

use shiftdeploy::config::Config;
use shiftdeploy::error::Result;
use shiftdeploy::output::Output;
use shiftdeploy::poll::wait_on_url;

pub async fn wait(url: &str, config: &Config, output: &Output) -> Result<()> {
    output.progress(&format!("Waiting for {url} to become available"));
    wait_on_url(url, config.wait.timeout, config.wait.interval, || output.tick()).await?;
    output.success(&format!("{url} is available"));
    Ok(())
}
