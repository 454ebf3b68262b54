//! Issues MCP Server
//!
//! Jira and GitHub issue lookups for agents, served over stdio.
//!
//! # Configuration
//! Set `JIRA_URL`, `JIRA_PROJECT` and `GITHUB_REPO` env vars or configure in
//! `~/.binks/issues.toml`. GitHub access goes through the `gh` CLI.

use issues_mcp::gh::GhClient;
use issues_mcp::{Config, IssuesMcpServer};
use rmcp::{transport::stdio, ServiceExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    mcp_common::init_tracing("issues_mcp")?;

    tracing::info!("Starting Issues MCP Server");

    let config = Config::load()?;

    if let Some(gh) = GhClient::from_config(&config.github) {
        if let Err(e) = gh.executor().check_available().await {
            tracing::warn!("gh is not usable, GitHub lookups will fail: {}", e);
        }
    }

    let server = IssuesMcpServer::new(config)?;
    let service = server.serve(stdio()).await?;

    tracing::info!("Server running, waiting for requests...");
    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}
