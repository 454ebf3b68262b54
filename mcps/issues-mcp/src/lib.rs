//! Issues MCP Library
//!
//! Finds the Jira tickets, GitHub issues, pull requests and commits related
//! to a task, for agents that need the history behind a bug.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use issues_mcp::{Config, IssuesPlugin, IssuesQueryAction};
//!
//! let mut plugin = IssuesPlugin::new();
//! plugin.initialize(&Config::load()?)?;
//! let obs = plugin.query(&IssuesQueryAction::new("HIVE-28708")).await;
//! println!("{}", obs.content);
//! ```
//!
//! # Configuration
//! Set `JIRA_URL`, `JIRA_PROJECT` and `GITHUB_REPO` env vars or configure in
//! `~/.binks/issues.toml`

pub mod config;
pub mod events;
pub mod extract;
pub mod gh;
pub mod jira;
pub mod plugin;
pub mod query;
pub mod server;
pub mod types;

pub use config::Config;
pub use events::{ActionEvent, IssuesQueryAction, IssuesQueryObservation};
pub use plugin::{IssuesPlugin, IssuesRequirement, PluginError};
pub use query::IssueQueryService;
pub use server::IssuesMcpServer;
pub use types::{GithubCommit, GithubIssue, GithubPr, Issue, IssueSource, JiraIssue, TrackerItem};

// Re-export parameter types for direct API usage
pub use server::{ExtractReferencesParams, IssuesQueryJsonParams, IssuesQueryParams, References};
