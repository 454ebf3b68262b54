//! Heterogeneous tracker record

use std::fmt;

use serde::{Deserialize, Serialize};

use super::github::{GithubCommit, GithubIssue, GithubPr};
use super::issue::Issue;
use super::jira::JiraIssue;

/// Any record an issues query can return
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrackerItem {
    Jira(JiraIssue),
    GithubIssue(GithubIssue),
    GithubPr(GithubPr),
    GithubCommit(GithubCommit),
}

impl TrackerItem {
    /// The shared base shape of this record
    pub fn issue(&self) -> &Issue {
        match self {
            TrackerItem::Jira(i) => &i.issue,
            TrackerItem::GithubIssue(i) => &i.issue,
            TrackerItem::GithubPr(i) => &i.issue,
            TrackerItem::GithubCommit(i) => &i.issue,
        }
    }

    /// Variant tag, matching the serialized `kind` field
    pub fn kind(&self) -> &'static str {
        match self {
            TrackerItem::Jira(_) => "jira",
            TrackerItem::GithubIssue(_) => "github_issue",
            TrackerItem::GithubPr(_) => "github_pr",
            TrackerItem::GithubCommit(_) => "github_commit",
        }
    }

    /// Identity used for de-duplication within one response
    pub(crate) fn dedup_key(&self) -> (&'static str, String) {
        (self.kind(), self.issue().id.to_ascii_lowercase())
    }
}

impl fmt::Display for TrackerItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerItem::Jira(i) => fmt::Display::fmt(i, f),
            TrackerItem::GithubIssue(i) => fmt::Display::fmt(i, f),
            TrackerItem::GithubPr(i) => fmt::Display::fmt(i, f),
            TrackerItem::GithubCommit(i) => fmt::Display::fmt(i, f),
        }
    }
}

impl From<JiraIssue> for TrackerItem {
    fn from(value: JiraIssue) -> Self {
        TrackerItem::Jira(value)
    }
}

impl From<GithubIssue> for TrackerItem {
    fn from(value: GithubIssue) -> Self {
        TrackerItem::GithubIssue(value)
    }
}

impl From<GithubPr> for TrackerItem {
    fn from(value: GithubPr) -> Self {
        TrackerItem::GithubPr(value)
    }
}

impl From<GithubCommit> for TrackerItem {
    fn from(value: GithubCommit) -> Self {
        TrackerItem::GithubCommit(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IssueSource;

    #[test]
    fn test_issue_accessor_reaches_base_shape() {
        let item: TrackerItem = GithubPr::new("12", "Fix").into();
        assert_eq!(item.issue().id, "12");
        assert_eq!(item.issue().source, IssueSource::Github);
        assert_eq!(item.kind(), "github_pr");
    }

    #[test]
    fn test_tagged_serialization() {
        let item: TrackerItem = JiraIssue::new("28708", "Migrate").into();
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["kind"], "jira");
        assert_eq!(value["id"], "28708");

        let back: TrackerItem = serde_json::from_value(value).unwrap();
        assert_eq!(back, item);
    }
}
