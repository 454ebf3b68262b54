//! GitHub issue, pull request and commit records

use std::fmt;

use serde::{Deserialize, Serialize};

use super::issue::{Issue, IssueSource};

/// A GitHub issue; carries nothing beyond the shared shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubIssue {
    #[serde(flatten)]
    pub issue: Issue,
}

impl GithubIssue {
    pub fn new(number: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            issue: Issue::new(number, IssueSource::Github, title),
        }
    }
}

impl From<Issue> for GithubIssue {
    fn from(issue: Issue) -> Self {
        Self { issue }
    }
}

impl fmt::Display for GithubIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.issue.render(f, "GitHub issue #", &[])
    }
}

/// A GitHub pull request together with the commits it contains
///
/// Commits listed here are never reported again as standalone
/// [`GithubCommit`] records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubPr {
    #[serde(flatten)]
    pub issue: Issue,

    /// Unified diff of the PR
    #[serde(default)]
    pub patch: String,

    /// Short (7 character) IDs of the commits in this PR
    #[serde(default)]
    pub commits: Vec<String>,
}

impl GithubPr {
    pub fn new(number: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            issue: Issue::new(number, IssueSource::Github, title),
            patch: String::new(),
            commits: Vec::new(),
        }
    }

    pub fn with_patch(mut self, patch: impl Into<String>) -> Self {
        self.patch = patch.into();
        self
    }

    pub fn with_commits(mut self, commits: Vec<String>) -> Self {
        self.commits = commits;
        self
    }

    /// Whether `sha` (short or full) is one of this PR's commits
    pub fn contains_commit(&self, sha: &str) -> bool {
        let short: String = sha.chars().take(7).collect();
        self.commits.iter().any(|c| c.eq_ignore_ascii_case(&short))
    }
}

impl fmt::Display for GithubPr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let patch = if self.patch.is_empty() {
            String::new()
        } else {
            format!("{} lines changed", self.patch.lines().count())
        };
        self.issue.render(
            f,
            "GitHub PR #",
            &[("Commits", self.commits.join(", ")), ("Patch", patch)],
        )
    }
}

/// A commit that is not part of any tracked pull request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubCommit {
    #[serde(flatten)]
    pub issue: Issue,
}

impl GithubCommit {
    pub fn new(sha: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            issue: Issue::new(sha, IssueSource::Github, title),
        }
    }
}

impl From<Issue> for GithubCommit {
    fn from(issue: Issue) -> Self {
        Self { issue }
    }
}

impl fmt::Display for GithubCommit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.issue.render(f, "GitHub commit ", &[])
    }
}
