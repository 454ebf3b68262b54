//! Jira REST API v2 response types
//!
//! Only the fields requested through [`ISSUE_FIELDS`] are modelled; anything
//! missing deserializes to its default.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::extract::{clean_text, find_ticket_keys};
use crate::types::{short_date, JiraIssue};

/// Fields requested from the search and issue endpoints
pub const ISSUE_FIELDS: &str =
    "summary,description,status,resolution,created,components,comment,issuelinks";

/// Response of `GET /rest/api/2/search`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub start_at: u64,
    #[serde(default)]
    pub max_results: u64,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub issues: Vec<RawIssue>,
}

/// One issue as returned by the REST API
#[derive(Debug, Deserialize)]
pub struct RawIssue {
    pub id: String,
    pub key: String,
    #[serde(default)]
    pub fields: RawFields,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawFields {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<Named>,
    #[serde(default)]
    pub resolution: Option<Named>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub components: Vec<Named>,
    #[serde(default)]
    pub comment: Option<CommentPage>,
    #[serde(default)]
    pub issuelinks: Vec<IssueLink>,
}

/// Any Jira object identified by a display name (status, component, ...)
#[derive(Debug, Deserialize)]
pub struct Named {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentPage {
    #[serde(default)]
    pub comments: Vec<RawComment>,
}

#[derive(Debug, Deserialize)]
pub struct RawComment {
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueLink {
    #[serde(default)]
    pub inward_issue: Option<LinkedIssue>,
    #[serde(default)]
    pub outward_issue: Option<LinkedIssue>,
}

#[derive(Debug, Deserialize)]
pub struct LinkedIssue {
    pub key: String,
}

impl RawIssue {
    /// Number part of the key (`HIVE-28708` gives `28708`)
    fn number(&self) -> &str {
        self.key
            .rsplit_once('-')
            .map(|(_, n)| n)
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.id)
    }

    pub fn into_jira_issue(self) -> JiraIssue {
        let id = self.number().to_string();
        let fields = self.fields;

        let description = clean_text(fields.description.as_deref());
        let comments: Vec<String> = fields
            .comment
            .map(|page| page.comments)
            .unwrap_or_default()
            .into_iter()
            .map(|c| clean_text(c.body.as_deref()))
            .filter(|c| !c.is_empty())
            .collect();

        let mut status = Vec::new();
        if let Some(s) = fields.status {
            status.push(s.name);
        }
        if let Some(r) = fields.resolution {
            status.push(r.name);
        }

        let mut related: BTreeSet<String> = fields
            .issuelinks
            .into_iter()
            .flat_map(|link| [link.inward_issue, link.outward_issue])
            .flatten()
            .map(|linked| linked.key)
            .collect();
        related.extend(find_ticket_keys(&description));
        for comment in &comments {
            related.extend(find_ticket_keys(comment));
        }
        related.remove(&self.key);

        let component = fields
            .components
            .into_iter()
            .map(|c| c.name)
            .collect::<Vec<_>>()
            .join(", ");

        let mut issue = JiraIssue::new(id, fields.summary).with_component(component);
        issue.issue = issue
            .issue
            .with_created(fields.created.as_deref().map(short_date).unwrap_or_default())
            .with_description(description)
            .with_status(status)
            .with_comments(comments)
            .with_related_tickets(related.into_iter().collect());
        issue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hive_issue() -> serde_json::Value {
        serde_json::json!({
            "id": "13605431",
            "key": "HIVE-28708",
            "fields": {
                "summary": "Migrate Build Scan publication to develocity.apache.org",
                "description": "The Hive project publishes Build Scans to the Develocity instance at ge.apache.org.\n\nSee HIVE-28000.",
                "status": {"name": "Resolved"},
                "resolution": {"name": "Fixed"},
                "created": "2025-01-14T18:22:51.000+0000",
                "components": [{"name": "Build Infrastructure"}],
                "comment": {"comments": [
                    {"body": "Merged to master via [69d0a3d|https://github.com/apache/hive/commit/69d0a3ddff695597ad8221bae0ead48f8f38b57f], thanks [~clayburn]!"},
                    {"body": "   "}
                ]},
                "issuelinks": [
                    {"outwardIssue": {"key": "INFRA-26301"}},
                    {"inwardIssue": {"key": "HIVE-28708"}}
                ]
            }
        })
    }

    #[test]
    fn test_into_jira_issue() {
        let raw: RawIssue = serde_json::from_value(hive_issue()).unwrap();
        let issue = raw.into_jira_issue();

        assert_eq!(issue.issue.id, "28708");
        assert_eq!(issue.summary, "Migrate Build Scan publication to develocity.apache.org");
        assert_eq!(issue.issue.title, issue.summary);
        assert_eq!(issue.issue.created, "01/14/25");
        assert_eq!(issue.issue.status, vec!["Resolved", "Fixed"]);
        assert_eq!(issue.component, "Build Infrastructure");
        assert_eq!(issue.issue.comments.len(), 1);
        assert_eq!(issue.issue.related_tickets, vec!["HIVE-28000", "INFRA-26301"]);
        assert!(!issue.issue.description.contains('\n'));
    }

    #[test]
    fn test_minimal_issue() {
        let raw: RawIssue =
            serde_json::from_value(serde_json::json!({"id": "1", "key": "X-5"})).unwrap();
        let issue = raw.into_jira_issue();
        assert_eq!(issue.issue.id, "5");
        assert!(issue.issue.status.is_empty());
        assert!(issue.issue.description.is_empty());
    }

    #[test]
    fn test_search_response_defaults() {
        let page: SearchResponse =
            serde_json::from_value(serde_json::json!({"total": 0})).unwrap();
        assert!(page.issues.is_empty());
    }
}
