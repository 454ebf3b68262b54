//! gh CLI JSON shapes and their conversion into tracker records
//!
//! These mirror `gh pr view --json`, `gh issue list --json` and the REST
//! commit object returned by `gh api repos/{repo}/commits/{sha}`.

use serde::Deserialize;

use crate::extract::{clean_text, find_ticket_keys};
use crate::types::{short_date, GithubCommit, GithubIssue, GithubPr, Issue, IssueSource};

#[derive(Debug, Clone, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Label {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub body: String,
}

impl Comment {
    fn render(&self) -> String {
        let body = clean_text(Some(&self.body));
        match &self.author {
            Some(author) if !author.login.is_empty() && !body.is_empty() => {
                format!("{}: {}", author.login, body)
            }
            _ => body,
        }
    }
}

/// Commit entry inside `gh pr view --json commits`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrCommit {
    pub oid: String,
    #[serde(default)]
    pub message_headline: String,
}

/// `gh pr view` / `gh pr list` output
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GhPullRequest {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub is_draft: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub commits: Vec<PrCommit>,
}

impl GhPullRequest {
    pub fn view_fields() -> &'static [&'static str] {
        &[
            "number",
            "title",
            "body",
            "state",
            "isDraft",
            "createdAt",
            "url",
            "labels",
            "comments",
            "commits",
        ]
    }

    pub fn list_fields() -> &'static [&'static str] {
        &[
            "number",
            "title",
            "body",
            "state",
            "isDraft",
            "createdAt",
            "url",
            "labels",
        ]
    }

    pub fn into_github_pr(self, patch: String) -> GithubPr {
        let mut status = vec![self.state.clone()];
        if self.is_draft {
            status.push("draft".to_string());
        }
        status.extend(self.labels.iter().map(|l| l.name.clone()));

        let commits = self
            .commits
            .iter()
            .map(|c| c.oid.chars().take(7).collect::<String>().to_ascii_lowercase())
            .collect();

        let issue = base_issue(
            self.number.to_string(),
            &self.title,
            &self.created_at,
            self.body.as_deref(),
            status,
            &self.comments,
        );
        GithubPr {
            issue,
            patch,
            commits,
        }
    }
}

/// `gh issue list` / `gh issue view` output
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GhIssue {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl GhIssue {
    pub fn list_fields() -> &'static [&'static str] {
        &[
            "number",
            "title",
            "body",
            "state",
            "createdAt",
            "url",
            "labels",
            "comments",
        ]
    }

    pub fn into_github_issue(self) -> GithubIssue {
        let mut status = vec![self.state.clone()];
        status.extend(self.labels.iter().map(|l| l.name.clone()));

        base_issue(
            self.number.to_string(),
            &self.title,
            &self.created_at,
            self.body.as_deref(),
            status,
            &self.comments,
        )
        .into()
    }
}

/// REST commit object (`GET /repos/{owner}/{repo}/commits/{sha}`)
#[derive(Debug, Clone, Deserialize)]
pub struct ApiCommit {
    pub sha: String,
    #[serde(default)]
    pub html_url: String,
    pub commit: ApiCommitDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCommitDetail {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub author: Option<ApiSignature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSignature {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: String,
}

impl ApiCommit {
    pub fn into_github_commit(self) -> GithubCommit {
        let short: String = self.sha.chars().take(7).collect();
        let (headline, rest) = self
            .commit
            .message
            .split_once('\n')
            .unwrap_or((self.commit.message.as_str(), ""));

        let related: Vec<String> = find_ticket_keys(&self.commit.message).into_iter().collect();

        let mut status = Vec::new();
        let mut created = String::new();
        if let Some(author) = &self.commit.author {
            if !author.name.is_empty() {
                status.push(format!("authored by {}", author.name));
            }
            created = short_date(&author.date);
        }

        Issue::new(short.to_ascii_lowercase(), IssueSource::Github, headline.trim())
            .with_created(created)
            .with_description(clean_text(Some(rest)))
            .with_status(status)
            .with_related_tickets(related)
            .into()
    }
}

fn base_issue(
    id: String,
    title: &str,
    created_at: &str,
    body: Option<&str>,
    status: Vec<String>,
    comments: &[Comment],
) -> Issue {
    let mut related = find_ticket_keys(title);
    if let Some(body) = body {
        related.extend(find_ticket_keys(body));
    }
    for comment in comments {
        related.extend(find_ticket_keys(&comment.body));
    }

    Issue::new(id, IssueSource::Github, title)
        .with_created(short_date(created_at))
        .with_description(clean_text(body))
        .with_status(status.into_iter().filter(|s| !s.is_empty()).collect())
        .with_comments(
            comments
                .iter()
                .map(Comment::render)
                .filter(|c| !c.is_empty())
                .collect(),
        )
        .with_related_tickets(related.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pull_request_conversion() {
        let pr: GhPullRequest = serde_json::from_value(serde_json::json!({
            "number": 5012,
            "title": "HIVE-28708: Migrate Build Scan publication to develocity.apache.org",
            "body": "<!-- template -->Moves publication.\r\n\r\nSee HIVE-28000",
            "state": "MERGED",
            "isDraft": false,
            "createdAt": "2025-01-14T18:22:51Z",
            "url": "https://github.com/apache/hive/pull/5012",
            "labels": [{"name": "build"}],
            "comments": [{"author": {"login": "clayburn"}, "body": "LGTM"}],
            "commits": [
                {"oid": "69d0a3ddff695597ad8221bae0ead48f8f38b57f", "messageHeadline": "Migrate"},
                {"oid": "ABCDEF0123456789", "messageHeadline": "Review"}
            ]
        }))
        .unwrap();

        let pr = pr.into_github_pr("+a\n".to_string());
        assert_eq!(pr.issue.id, "5012");
        assert_eq!(pr.issue.created, "01/14/25");
        assert_eq!(pr.issue.status, vec!["MERGED", "build"]);
        assert_eq!(pr.commits, vec!["69d0a3d", "abcdef0"]);
        assert_eq!(pr.issue.comments, vec!["clayburn: LGTM"]);
        assert_eq!(pr.issue.related_tickets, vec!["HIVE-28000", "HIVE-28708"]);
        assert_eq!(pr.issue.description, "Moves publication. See HIVE-28000");
        assert_eq!(pr.patch, "+a\n");
    }

    #[test]
    fn test_draft_pull_request_status() {
        let pr: GhPullRequest = serde_json::from_value(serde_json::json!({
            "number": 1, "title": "WIP", "state": "OPEN", "isDraft": true
        }))
        .unwrap();
        assert_eq!(pr.into_github_pr(String::new()).issue.status, vec!["OPEN", "draft"]);
    }

    #[test]
    fn test_issue_conversion() {
        let issue: GhIssue = serde_json::from_value(serde_json::json!({
            "number": 7,
            "title": "Build scans fail",
            "body": null,
            "state": "OPEN",
            "createdAt": "2025-02-01T00:00:00Z",
            "labels": [{"name": "bug"}]
        }))
        .unwrap();

        let issue = issue.into_github_issue();
        assert_eq!(issue.issue.id, "7");
        assert_eq!(issue.issue.status, vec!["OPEN", "bug"]);
        assert!(issue.issue.description.is_empty());
    }

    #[test]
    fn test_commit_conversion() {
        let commit: ApiCommit = serde_json::from_value(serde_json::json!({
            "sha": "69d0a3ddff695597ad8221bae0ead48f8f38b57f",
            "html_url": "https://github.com/apache/hive/commit/69d0a3d",
            "commit": {
                "message": "HIVE-28708: Migrate Build Scan publication\n\nCloses #5012",
                "author": {"name": "Clay Johnson", "date": "2025-01-14T18:22:51Z"}
            }
        }))
        .unwrap();

        let commit = commit.into_github_commit();
        assert_eq!(commit.issue.id, "69d0a3d");
        assert_eq!(commit.issue.title, "HIVE-28708: Migrate Build Scan publication");
        assert_eq!(commit.issue.description, "Closes #5012");
        assert_eq!(commit.issue.status, vec!["authored by Clay Johnson"]);
        assert_eq!(commit.issue.related_tickets, vec!["HIVE-28708"]);
    }
}
