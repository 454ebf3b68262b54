//! Jira ticket record

use std::fmt;

use serde::{Deserialize, Serialize};

use super::issue::{Issue, IssueSource};

/// A Jira ticket normalized into the shared issue shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JiraIssue {
    #[serde(flatten)]
    pub issue: Issue,

    /// Ticket summary as written in Jira
    #[serde(default)]
    pub summary: String,

    /// Component names, comma separated
    #[serde(default)]
    pub component: String,
}

impl JiraIssue {
    pub fn new(id: impl Into<String>, summary: impl Into<String>) -> Self {
        let summary = summary.into();
        Self {
            issue: Issue::new(id, IssueSource::Jira, summary.clone()),
            summary,
            component: String::new(),
        }
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = component.into();
        self
    }
}

impl fmt::Display for JiraIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut extra = vec![("Component", self.component.clone())];
        if self.summary != self.issue.title {
            extra.insert(0, ("Summary", self.summary.clone()));
        }
        self.issue.render(f, "Jira issue ", &extra)
    }
}
