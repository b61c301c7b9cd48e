// stayscrape MCP server
//
// Serves the listing-scrape tools over stdio. Log output goes to stderr:
// stdout belongs to the MCP transport.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting stayscrape MCP server...");
    stayscrape::mcp::serve_stdio()
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    info!("stayscrape MCP server stopped.");
    Ok(())
}
