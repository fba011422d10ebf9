/*
 * Responsibility
 * - boot the tokio runtime
 * - hand off to app::run() (no logic here)
 */
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    budget_tracker::app::run().await
}
