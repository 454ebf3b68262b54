//! Jira REST client
//!
//! Thin async wrapper over the two endpoints the plugin needs:
//! JQL search and single-issue lookup.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};

use super::error::{JiraError, JiraResult};
use super::types::{RawIssue, SearchResponse, ISSUE_FIELDS};
use crate::config::JiraConfig;
use crate::types::JiraIssue;

/// Longest error body kept in [`JiraError::Status`]
const ERROR_BODY_LIMIT: usize = 200;

/// Source of Jira tickets
#[async_trait]
pub trait JiraBackend: Send + Sync {
    /// Run a JQL search
    async fn search(&self, jql: &str, max_results: u32) -> JiraResult<Vec<JiraIssue>>;

    /// Fetch one ticket by key; `None` when it does not exist
    async fn get_issue(&self, key: &str) -> JiraResult<Option<JiraIssue>>;
}

/// Jira REST API v2 client
#[derive(Clone)]
pub struct JiraClient {
    client: Client,
    base_url: Url,
    username: Option<String>,
    token: Option<String>,
}

impl JiraClient {
    /// Build a client from configuration; performs no network I/O
    pub fn new(config: &JiraConfig, timeout: Duration) -> JiraResult<Self> {
        let url = config
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(JiraError::NotConfigured)?;

        // trailing slash so `join` appends below context paths like /jira
        let base_url = Url::parse(&format!("{}/", url.trim_end_matches('/')))
            .map_err(|_| JiraError::InvalidUrl(url.to_string()))?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("issues-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url,
            username: config.username.clone(),
            token: config.token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn endpoint(&self, path: &str) -> JiraResult<Url> {
        self.base_url
            .join(path)
            .map_err(|_| JiraError::InvalidUrl(format!("{}{}", self.base_url, path)))
    }

    /// Attach credentials: basic auth with a username, bearer token without
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match (&self.username, &self.token) {
            (Some(user), token) => request.basic_auth(user, token.as_ref()),
            (None, Some(token)) => request.bearer_auth(token),
            (None, None) => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> JiraResult<Option<T>> {
        let url = self.endpoint(path)?;
        debug!(%url, "jira GET");

        let response = self
            .authorize(self.client.get(url))
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = response.text().await?;
        if !status.is_success() {
            let body: String = body.chars().take(ERROR_BODY_LIMIT).collect();
            error!(status = status.as_u16(), body = %body, "jira request failed");
            return Err(JiraError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(Some(serde_json::from_str(&body)?))
    }
}

#[async_trait]
impl JiraBackend for JiraClient {
    #[instrument(skip(self))]
    async fn search(&self, jql: &str, max_results: u32) -> JiraResult<Vec<JiraIssue>> {
        let query = [
            ("jql", jql.to_string()),
            ("maxResults", max_results.to_string()),
            ("fields", ISSUE_FIELDS.to_string()),
        ];

        // a 404 here means the search endpoint itself is missing
        let page: SearchResponse = self
            .get_json("rest/api/2/search", &query)
            .await?
            .ok_or(JiraError::Status {
                status: StatusCode::NOT_FOUND.as_u16(),
                body: "search endpoint not found".to_string(),
            })?;

        debug!(total = page.total, returned = page.issues.len(), "jira search done");
        Ok(page
            .issues
            .into_iter()
            .map(RawIssue::into_jira_issue)
            .collect())
    }

    #[instrument(skip(self))]
    async fn get_issue(&self, key: &str) -> JiraResult<Option<JiraIssue>> {
        let path = format!("rest/api/2/issue/{}", key);
        let raw: Option<RawIssue> = self
            .get_json(&path, &[("fields", ISSUE_FIELDS.to_string())])
            .await?;
        Ok(raw.map(RawIssue::into_jira_issue))
    }
}
