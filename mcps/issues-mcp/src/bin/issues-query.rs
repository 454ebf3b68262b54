//! One-shot issues query from the command line
//!
//! Usage:
//!   issues-query HIVE-28708
//!   issues-query --payload payload.json --json "build scan publication fails"

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use issues_mcp::{Config, IssuesPlugin, IssuesQueryAction};

#[derive(Parser)]
#[command(name = "issues-query")]
#[command(about = "Find Jira tickets and GitHub issues, PRs and commits related to a query")]
struct Cli {
    /// JSON file with `jira` / `github` / `query` settings; takes precedence over
    /// the config file and environment
    #[arg(short, long)]
    payload: Option<PathBuf>,

    /// Print the full observation as JSON instead of the agent text
    #[arg(long)]
    json: bool,

    /// Ticket id or free-text description
    #[arg(required = true)]
    query: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    mcp_common::init_tracing("issues_mcp")?;

    let config = match &cli.payload {
        Some(path) => Config::from_payload(path)
            .with_context(|| format!("loading payload {}", path.display()))?,
        None => Config::load()?,
    };

    let query = cli.query.join(" ");
    if query.trim().is_empty() {
        bail!("query cannot be empty");
    }

    let mut plugin = IssuesPlugin::new();
    plugin.initialize(&config)?;

    let observation = plugin.query(&IssuesQueryAction::new(query)).await;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&observation)?);
    } else {
        println!("{}", observation.content);
    }
    Ok(())
}
