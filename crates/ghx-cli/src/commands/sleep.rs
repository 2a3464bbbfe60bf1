//! Portable wait used by generated shell scripts

use std::time::Duration;

use anyhow::Result;

/// Run the sleep command
pub async fn run(seconds: u64) -> Result<()> {
    tracing::debug!("Sleeping {}s", seconds);
    tokio::time::sleep(Duration::from_secs(seconds)).await;
    Ok(())
}
