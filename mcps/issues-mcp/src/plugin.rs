//! Plugin shell hosting the issue query service
//!
//! The host hands the plugin raw [`ActionEvent`]s; only `issues_query`
//! actions are accepted.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::events::{ActionEvent, IssuesQueryAction, IssuesQueryObservation, ISSUES_QUERY_ACTION};
use crate::gh::{GhClient, GithubBackend};
use crate::jira::{JiraClient, JiraError};
use crate::query::IssueQueryService;

/// Errors returned by [`IssuesPlugin`]
#[derive(Error, Debug)]
pub enum PluginError {
    #[error("unsupported action '{0}', expected 'issues_query'")]
    InvalidAction(String),

    #[error("invalid issues_query arguments: {0}")]
    InvalidArgs(#[from] serde_json::Error),

    #[error("jira setup failed: {0}")]
    Jira(#[from] JiraError),
}

/// Requirement descriptor the host uses to wire the plugin in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuesRequirement {
    pub name: &'static str,
}

impl Default for IssuesRequirement {
    fn default() -> Self {
        Self {
            name: IssuesPlugin::NAME,
        }
    }
}

/// Issues plugin: answers issue queries from Jira and GitHub
#[derive(Clone, Default)]
pub struct IssuesPlugin {
    service: Option<Arc<IssueQueryService>>,
}

impl IssuesPlugin {
    pub const NAME: &'static str = "issues";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn requirement() -> IssuesRequirement {
        IssuesRequirement::default()
    }

    /// Build the tracker clients for `config`, replacing any previous ones
    ///
    /// Jira is enabled when a URL is configured and GitHub when a repository
    /// is. No network calls are made here.
    pub fn initialize(&mut self, config: &Config) -> Result<(), PluginError> {
        let mut service = IssueQueryService::new(config.query.clone());

        if config.jira.url.as_deref().is_some_and(|u| !u.trim().is_empty()) {
            let timeout = Duration::from_secs(config.query.timeout_seconds);
            let client = JiraClient::new(&config.jira, timeout)?;
            info!(url = client.base_url(), "jira enabled");
            service = service.with_jira(Arc::new(client), config.jira.project.clone());
        } else {
            warn!("JIRA_URL not set, jira lookups disabled");
        }

        match GhClient::from_config(&config.github) {
            Some(client) => {
                info!(repo = client.repo(), "github enabled");
                service = service.with_github(Arc::new(client));
            }
            None => warn!("GITHUB_REPO not set, github lookups disabled"),
        }

        self.service = Some(Arc::new(service));
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.service.is_some()
    }

    /// Handle one action event from the host
    pub async fn run(&self, event: &ActionEvent) -> Result<IssuesQueryObservation, PluginError> {
        if event.action != ISSUES_QUERY_ACTION {
            return Err(PluginError::InvalidAction(event.action.clone()));
        }
        let action: IssuesQueryAction = serde_json::from_value(event.args.clone())?;
        Ok(self.query(&action).await)
    }

    /// Run a typed query; an uninitialized plugin finds nothing
    pub async fn query(&self, action: &IssuesQueryAction) -> IssuesQueryObservation {
        info!("{}", action.message());
        match &self.service {
            Some(service) => service.query(action).await,
            None => IssuesQueryObservation::empty(),
        }
    }
}
