//! Issue query service
//!
//! Resolves a free-text or ticket-id query into Jira tickets, then follows
//! the GitHub links found in those tickets to pull requests and commits.
//! Backend failures never fail a query: they are logged and the affected
//! step contributes nothing.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::config::QueryConfig;
use crate::events::{IssuesQueryAction, IssuesQueryObservation};
use crate::extract::{
    clean_text, extract_github_refs, extract_keywords, extract_ticket_keys, find_ticket_keys,
    GithubRefs,
};
use crate::gh::GithubBackend;
use crate::jira::{jql_for_text, JiraBackend};
use crate::types::{GithubCommit, GithubIssue, GithubPr, JiraIssue, TrackerItem};

/// Answers [`IssuesQueryAction`]s from the configured trackers
#[derive(Clone, Default)]
pub struct IssueQueryService {
    jira: Option<Arc<dyn JiraBackend>>,
    github: Option<Arc<dyn GithubBackend>>,
    project: Option<String>,
    settings: QueryConfig,
}

impl IssueQueryService {
    pub fn new(settings: QueryConfig) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    /// Use `backend` for Jira; `project` scopes ticket ids in queries
    pub fn with_jira(mut self, backend: Arc<dyn JiraBackend>, project: Option<String>) -> Self {
        self.jira = Some(backend);
        self.project = project
            .map(|p| p.trim().to_uppercase())
            .filter(|p| !p.is_empty());
        self
    }

    pub fn with_github(mut self, backend: Arc<dyn GithubBackend>) -> Self {
        self.github = Some(backend);
        self
    }

    pub fn has_jira(&self) -> bool {
        self.jira.is_some()
    }

    pub fn has_github(&self) -> bool {
        self.github.is_some()
    }

    #[instrument(skip(self, action), fields(query = %action.query))]
    pub async fn query(&self, action: &IssuesQueryAction) -> IssuesQueryObservation {
        let query = action.query.trim();
        if query.is_empty() {
            return IssuesQueryObservation::new(Vec::new());
        }

        let (tickets, github_issues) =
            tokio::join!(self.find_tickets(query), self.find_github_issues(query));

        let mut keys: BTreeSet<String> = find_ticket_keys(query);
        match &self.project {
            Some(project) => {
                keys.extend(tickets.iter().map(|t| format!("{}-{}", project, t.issue.id)))
            }
            // tickets carry only their number, the query holds the project part
            None => keys.extend(extract_ticket_keys(query, None).into_iter().filter(|key| {
                tickets
                    .iter()
                    .any(|t| key.rsplit('-').next() == Some(t.issue.id.as_str()))
            })),
        }

        let refs = self.collect_refs(&tickets);
        let prs = self.find_pull_requests(&refs, &keys).await;
        let commits = self.find_commits(&refs, &prs).await;

        info!(
            tickets = tickets.len(),
            issues = github_issues.len(),
            prs = prs.len(),
            commits = commits.len(),
            "issues query done"
        );

        IssuesQueryObservation::new(assemble(tickets, github_issues, prs, commits))
    }

    async fn find_tickets(&self, query: &str) -> Vec<JiraIssue> {
        let Some(jira) = &self.jira else {
            return Vec::new();
        };

        let keys = extract_ticket_keys(query, self.project.as_deref());
        if !keys.is_empty() {
            let tickets = self.fetch_tickets(jira.as_ref(), &keys).await;
            if !tickets.is_empty() {
                return tickets;
            }
            // `utf-8` and friends look like keys when no project is set
            debug!(?keys, "no named ticket found, searching by keywords");
        }

        let mut terms = extract_keywords(query, self.settings.keywords);
        if terms.is_empty() {
            terms.push(clean_text(Some(query)));
        }
        let Some(jql) = jql_for_text(self.project.as_deref(), &terms) else {
            return Vec::new();
        };

        debug!(%jql, "searching jira");
        match jira.search(&jql, self.settings.max_results).await {
            Ok(tickets) => tickets,
            Err(e) => {
                warn!(error = %e, "jira search failed");
                Vec::new()
            }
        }
    }

    /// Tickets named in the query, fetched one key at a time
    ///
    /// A key that does not exist or is not visible only drops itself.
    async fn fetch_tickets(
        &self,
        jira: &dyn JiraBackend,
        keys: &BTreeSet<String>,
    ) -> Vec<JiraIssue> {
        let mut tickets = Vec::new();
        for key in keys.iter().take(self.settings.max_results as usize) {
            match jira.get_issue(key).await {
                Ok(Some(ticket)) => tickets.push(ticket),
                Ok(None) => debug!(key, "jira ticket not found"),
                Err(e) => warn!(key, error = %e, "failed to fetch jira ticket"),
            }
        }
        tickets
    }

    fn collect_refs(&self, tickets: &[JiraIssue]) -> GithubRefs {
        let mut refs = GithubRefs::default();
        let Some(github) = &self.github else {
            return refs;
        };

        for ticket in tickets {
            refs.merge(extract_github_refs(&ticket.issue.description, github.repo()));
            for comment in &ticket.issue.comments {
                refs.merge(extract_github_refs(comment, github.repo()));
            }
        }
        refs
    }

    async fn find_github_issues(&self, query: &str) -> Vec<GithubIssue> {
        let Some(github) = &self.github else {
            return Vec::new();
        };

        let search = clean_text(Some(query));
        match github.search_issues(&search, self.settings.max_results).await {
            Ok(issues) => issues,
            Err(e) => {
                warn!(error = %e, "github issue search failed");
                Vec::new()
            }
        }
    }

    async fn find_pull_requests(
        &self,
        refs: &GithubRefs,
        keys: &BTreeSet<String>,
    ) -> Vec<GithubPr> {
        let Some(github) = &self.github else {
            return Vec::new();
        };

        let mut numbers = refs.pr_numbers();
        for key in keys {
            match github.search_pull_requests(key, self.settings.max_results).await {
                Ok(found) => {
                    numbers.extend(found.iter().filter_map(|pr| pr.issue.id.parse::<u64>().ok()))
                }
                Err(e) => warn!(key, error = %e, "github PR search failed"),
            }
        }

        let mut seen = HashSet::new();
        numbers.retain(|n| seen.insert(*n));

        let mut prs = Vec::with_capacity(numbers.len());
        for number in numbers {
            match github.pull_request(number).await {
                Ok(pr) => prs.push(pr),
                Err(e) => warn!(number, error = %e, "failed to fetch PR"),
            }
        }
        prs
    }

    /// Referenced commits that no fetched PR already contains
    async fn find_commits(&self, refs: &GithubRefs, prs: &[GithubPr]) -> Vec<GithubCommit> {
        let Some(github) = &self.github else {
            return Vec::new();
        };

        let mut commits = Vec::new();
        for sha in &refs.commits {
            if prs.iter().any(|pr| pr.contains_commit(sha)) {
                debug!(sha, "commit belongs to a fetched PR");
                continue;
            }
            match github.commit(sha).await {
                Ok(commit) => commits.push(commit),
                Err(e) => warn!(sha, error = %e, "failed to fetch commit"),
            }
        }
        commits
    }
}

/// Jira tickets first, then GitHub issues, PRs and commits, without repeats
fn assemble(
    tickets: Vec<JiraIssue>,
    issues: Vec<GithubIssue>,
    prs: Vec<GithubPr>,
    commits: Vec<GithubCommit>,
) -> Vec<TrackerItem> {
    let items = tickets
        .into_iter()
        .map(TrackerItem::from)
        .chain(issues.into_iter().map(TrackerItem::from))
        .chain(prs.into_iter().map(TrackerItem::from))
        .chain(commits.into_iter().map(TrackerItem::from));

    let mut seen = HashSet::new();
    items.filter(|item| seen.insert(item.dedup_key())).collect()
}
