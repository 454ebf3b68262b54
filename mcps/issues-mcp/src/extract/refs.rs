//! GitHub commit and pull request references

use std::collections::BTreeSet;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Commit and PR links found in a piece of text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubRefs {
    /// Short (7 character) lower-case commit hashes
    pub commits: BTreeSet<String>,

    /// Canonical PR URLs (`https://github.com/owner/repo/pull/N`)
    pub pull_requests: BTreeSet<String>,
}

impl GithubRefs {
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty() && self.pull_requests.is_empty()
    }

    /// PR numbers parsed back out of the URLs, ascending
    pub fn pr_numbers(&self) -> Vec<u64> {
        let mut numbers: Vec<u64> = self
            .pull_requests
            .iter()
            .filter_map(|url| url.rsplit('/').next())
            .filter_map(|n| n.parse().ok())
            .collect();
        numbers.sort_unstable();
        numbers.dedup();
        numbers
    }

    pub fn merge(&mut self, other: GithubRefs) {
        self.commits.extend(other.commits);
        self.pull_requests.extend(other.pull_requests);
    }
}

/// Reduce `owner/repo`, `https://github.com/owner/repo(.git)` to `owner/repo`
pub(crate) fn normalize_repo(repo: &str) -> &str {
    let repo = repo.trim().trim_end_matches('/');
    let repo = repo.strip_suffix(".git").unwrap_or(repo);
    ["https://github.com/", "http://github.com/", "github.com/"]
        .iter()
        .find_map(|prefix| repo.strip_prefix(prefix))
        .unwrap_or(repo)
}

/// Find commit and PR links pointing at `repo` (`owner/name`)
///
/// Links to other repositories are ignored. Jira wiki links such as
/// `[69d0a3d|https://github.com/apache/hive/commit/69d0...]` match through
/// their URL part.
pub fn extract_github_refs(text: &str, repo: &str) -> GithubRefs {
    let repo = normalize_repo(repo);
    let mut refs = GithubRefs::default();
    if text.is_empty() || repo.is_empty() {
        return refs;
    }

    let base = format!(r"(?i)https?://(?:www\.)?github\.com/{}", regex::escape(repo));
    let (commit_re, pull_re) = match (
        Regex::new(&format!(r"{}/commit/([0-9a-f]{{7,40}})\b", base)),
        Regex::new(&format!(r"{}/pull/(\d+)\b", base)),
    ) {
        (Ok(c), Ok(p)) => (c, p),
        (Err(e), _) | (_, Err(e)) => {
            warn!(repo, error = %e, "invalid GitHub reference pattern");
            return refs;
        }
    };

    for caps in commit_re.captures_iter(text) {
        if let Some(sha) = caps.get(1) {
            let short: String = sha.as_str().chars().take(7).collect();
            refs.commits.insert(short.to_ascii_lowercase());
        }
    }
    for caps in pull_re.captures_iter(text) {
        if let Some(number) = caps.get(1) {
            refs.pull_requests
                .insert(format!("https://github.com/{}/pull/{}", repo, number.as_str()));
        }
    }

    refs
}

#[cfg(test)]
mod tests {
    use super::*;

    const HIVE_COMMENT: &str = "Merged to master via [69d0a3d|https://github.com/apache/hive/commit/69d0a3ddff695597ad8221bae0ead48f8f38b57f], thanks [~clayburn] for your contribution!";

    #[test]
    fn test_commit_from_jira_wiki_link() {
        let refs = extract_github_refs(HIVE_COMMENT, "apache/hive");
        assert_eq!(refs.commits.into_iter().collect::<Vec<_>>(), vec!["69d0a3d"]);
        assert!(refs.pull_requests.is_empty());
    }

    #[test]
    fn test_pull_request_urls_deduplicated() {
        let text = "see https://github.com/apache/hive/pull/5012 and \
                    https://github.com/apache/hive/pull/5012/files plus \
                    https://github.com/apache/hive/pull/99";
        let refs = extract_github_refs(text, "apache/hive");
        assert_eq!(refs.pull_requests.len(), 2);
        assert!(refs
            .pull_requests
            .contains("https://github.com/apache/hive/pull/5012"));
        assert_eq!(refs.pr_numbers(), vec![99, 5012]);
    }

    #[test]
    fn test_other_repositories_ignored() {
        let text = "https://github.com/apache/spark/pull/1 https://github.com/apache/hive-site/commit/abcdef1234";
        let refs = extract_github_refs(text, "apache/hive");
        assert!(refs.is_empty());
    }

    #[test]
    fn test_no_matches_is_empty() {
        assert!(extract_github_refs("nothing to see", "apache/hive").is_empty());
        assert!(extract_github_refs("", "apache/hive").is_empty());
    }

    #[test]
    fn test_repo_given_as_url() {
        let refs = extract_github_refs(HIVE_COMMENT, "https://github.com/apache/hive.git");
        assert_eq!(refs.commits.len(), 1);
    }
}
