//! Action and observation records exchanged with the host agent

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::TrackerItem;

/// Action kind tag for issue queries
pub const ISSUES_QUERY_ACTION: &str = "issues_query";

/// Observation kind tag for issue query results
pub const ISSUES_OBSERVATION: &str = "issues";

/// Risk the agent attaches to an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityRisk {
    Low,
    Medium,
    High,
}

/// Ask the plugin for Jira and GitHub items related to `query`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuesQueryAction {
    pub query: String,

    #[serde(default)]
    pub thought: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_risk: Option<SecurityRisk>,
}

impl IssuesQueryAction {
    pub const RUNNABLE: bool = true;

    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            thought: String::new(),
            security_risk: None,
        }
    }

    pub fn with_thought(mut self, thought: impl Into<String>) -> Self {
        self.thought = thought.into();
        self
    }

    pub fn action(&self) -> &'static str {
        ISSUES_QUERY_ACTION
    }

    pub fn message(&self) -> String {
        format!(
            "I am querying jira and github for issues related to {}",
            self.query
        )
    }
}

impl fmt::Display for IssuesQueryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "**IssuesQueryAction**")?;
        if !self.thought.is_empty() {
            writeln!(f, "THOUGHT: {}", self.thought)?;
        }
        write!(f, "Query: {}", self.query)
    }
}

/// Action envelope as delivered by the host event stream
///
/// `action` names the kind; `args` holds the kind-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEvent {
    pub action: String,

    #[serde(default)]
    pub args: serde_json::Value,
}

impl ActionEvent {
    pub fn new(action: impl Into<String>, args: serde_json::Value) -> Self {
        Self {
            action: action.into(),
            args,
        }
    }

    pub fn issues_query(action: &IssuesQueryAction) -> Self {
        Self {
            action: action.action().to_string(),
            args: serde_json::to_value(action).unwrap_or_default(),
        }
    }
}

/// Result of an issues query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuesQueryObservation {
    #[serde(default)]
    pub content: String,

    pub issues: Vec<TrackerItem>,
}

impl IssuesQueryObservation {
    pub fn new(issues: Vec<TrackerItem>) -> Self {
        let mut obs = Self {
            content: String::new(),
            issues,
        };
        obs.content = obs.agent_obs_text();
        obs
    }

    /// Observation with no results, used when nothing could be queried
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn observation(&self) -> &'static str {
        ISSUES_OBSERVATION
    }

    /// Concise text shown to the agent
    pub fn agent_obs_text(&self) -> String {
        let rendered: Vec<String> = self.issues.iter().map(ToString::to_string).collect();
        format!("The following issues were found:\n{}", rendered.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GithubPr, JiraIssue};

    #[test]
    fn test_action_display_with_thought() {
        let action = IssuesQueryAction::new("HIVE-28708").with_thought("check the build scan");
        assert_eq!(
            action.to_string(),
            "**IssuesQueryAction**\nTHOUGHT: check the build scan\nQuery: HIVE-28708"
        );
    }

    #[test]
    fn test_action_display_without_thought() {
        let action = IssuesQueryAction::new("flaky test");
        assert_eq!(action.to_string(), "**IssuesQueryAction**\nQuery: flaky test");
        assert_eq!(
            action.message(),
            "I am querying jira and github for issues related to flaky test"
        );
    }

    #[test]
    fn test_action_event_round_trips_args() {
        let action = IssuesQueryAction::new("HIVE-1");
        let event = ActionEvent::issues_query(&action);
        assert_eq!(event.action, "issues_query");
        assert!(IssuesQueryAction::RUNNABLE);

        let parsed: IssuesQueryAction = serde_json::from_value(event.args).unwrap();
        assert_eq!(parsed, action);
    }

    #[test]
    fn test_agent_obs_text_joins_with_blank_line() {
        let obs = IssuesQueryObservation::new(vec![
            JiraIssue::new("1", "First").into(),
            GithubPr::new("2", "Second").into(),
        ]);

        assert_eq!(
            obs.agent_obs_text(),
            "The following issues were found:\nJira issue 1: First\n\nGitHub PR #2: Second"
        );
        assert_eq!(obs.content, obs.agent_obs_text());
    }

    #[test]
    fn test_empty_observation_text() {
        let obs = IssuesQueryObservation::empty();
        assert_eq!(obs.agent_obs_text(), "The following issues were found:\n");
        assert_eq!(obs.content, obs.agent_obs_text());
        assert_eq!(obs.observation(), "issues");
    }
}
