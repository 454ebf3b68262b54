//! GitHub access through the gh CLI

use async_trait::async_trait;
use tracing::instrument;

use super::error::GhResult;
use super::executor::GhExecutor;
use super::types::{ApiCommit, GhIssue, GhPullRequest};
use crate::config::GithubConfig;
use crate::extract::normalize_repo;
use crate::types::{GithubCommit, GithubIssue, GithubPr};

/// Source of GitHub issues, pull requests and commits for one repository
#[async_trait]
pub trait GithubBackend: Send + Sync {
    /// Repository slug (`owner/name`) this backend reads from
    fn repo(&self) -> &str;

    /// Full PR including commits and diff
    async fn pull_request(&self, number: u64) -> GhResult<GithubPr>;

    async fn commit(&self, sha: &str) -> GhResult<GithubCommit>;

    async fn search_issues(&self, query: &str, limit: u32) -> GhResult<Vec<GithubIssue>>;

    /// PR search; results carry no commits or patch
    async fn search_pull_requests(&self, query: &str, limit: u32) -> GhResult<Vec<GithubPr>>;
}

/// [`GithubBackend`] backed by the `gh` CLI
#[derive(Clone)]
pub struct GhClient {
    repo: String,
    gh: GhExecutor,
}

impl GhClient {
    pub fn new(repo: impl AsRef<str>, token: Option<String>) -> Self {
        Self {
            repo: normalize_repo(repo.as_ref()).to_string(),
            gh: GhExecutor::new(token),
        }
    }

    /// Returns `None` when no repository is configured
    pub fn from_config(config: &GithubConfig) -> Option<Self> {
        let repo = config.repo.as_deref().map(normalize_repo)?;
        if repo.is_empty() {
            return None;
        }
        Some(Self::new(repo, config.token.clone()))
    }

    pub fn executor(&self) -> &GhExecutor {
        &self.gh
    }
}

#[async_trait]
impl GithubBackend for GhClient {
    fn repo(&self) -> &str {
        &self.repo
    }

    #[instrument(skip(self), fields(repo = %self.repo))]
    async fn pull_request(&self, number: u64) -> GhResult<GithubPr> {
        let number_str = number.to_string();
        let args = ["pr", "view", number_str.as_str(), "-R", self.repo.as_str()];

        let pr: GhPullRequest = self.gh.json(&args, GhPullRequest::view_fields()).await?;
        let patch = self
            .gh
            .raw(&["pr", "diff", number_str.as_str(), "-R", self.repo.as_str()])
            .await?;

        Ok(pr.into_github_pr(patch))
    }

    #[instrument(skip(self), fields(repo = %self.repo))]
    async fn commit(&self, sha: &str) -> GhResult<GithubCommit> {
        let endpoint = format!("repos/{}/commits/{}", self.repo, sha);
        let commit: ApiCommit = self.gh.api(&endpoint).await?;
        Ok(commit.into_github_commit())
    }

    #[instrument(skip(self), fields(repo = %self.repo))]
    async fn search_issues(&self, query: &str, limit: u32) -> GhResult<Vec<GithubIssue>> {
        let limit_str = limit.to_string();
        let args: [&str; 10] = [
            "issue", "list", "-R", &self.repo, "--search", query, "-s", "all", "-L", &limit_str,
        ];

        let issues: Vec<GhIssue> = self.gh.json(&args, GhIssue::list_fields()).await?;
        Ok(issues.into_iter().map(GhIssue::into_github_issue).collect())
    }

    #[instrument(skip(self), fields(repo = %self.repo))]
    async fn search_pull_requests(&self, query: &str, limit: u32) -> GhResult<Vec<GithubPr>> {
        let limit_str = limit.to_string();
        let args: [&str; 10] = [
            "pr", "list", "-R", &self.repo, "--search", query, "-s", "all", "-L", &limit_str,
        ];

        let prs: Vec<GhPullRequest> = self.gh.json(&args, GhPullRequest::list_fields()).await?;
        Ok(prs
            .into_iter()
            .map(|pr| pr.into_github_pr(String::new()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_requires_repo() {
        assert!(GhClient::from_config(&GithubConfig::default()).is_none());

        let config = GithubConfig {
            repo: Some("https://github.com/apache/hive.git".into()),
            token: None,
        };
        let client = GhClient::from_config(&config).unwrap();
        assert_eq!(client.repo(), "apache/hive");
    }
}
