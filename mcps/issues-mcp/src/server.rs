//! MCP Server implementation for issue lookups
//!
//! Exposes the issues plugin as MCP tools: a full Jira/GitHub query and the
//! offline reference extraction it is built on.

use std::collections::BTreeSet;

use mcp_common::{
    async_trait, invalid_params, json_success, text_success, EmbeddableError, EmbeddableMcp,
    EmbeddableResult, McpError,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, ServerCapabilities, ServerInfo, Tool},
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::events::IssuesQueryAction;
use crate::extract::{
    clean_text, extract_github_refs, extract_keywords, extract_ticket_ids, find_ticket_keys,
    GithubRefs,
};
use crate::plugin::{IssuesPlugin, PluginError};

const INSTRUCTIONS: &str = "Issues MCP Server - finds Jira tickets and the GitHub issues, \
     pull requests and commits linked to them. Use issues_query with a ticket id \
     (e.g. HIVE-28708) or a short problem description.";

/// The main Issues MCP Server
#[derive(Clone)]
pub struct IssuesMcpServer {
    plugin: IssuesPlugin,
    config: Config,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Parameter Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct IssuesQueryParams {
    #[schemars(description = "Ticket id (e.g. HIVE-28708) or free-text problem description")]
    pub query: String,
    #[schemars(description = "Why the query is being made (optional)")]
    pub thought: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct IssuesQueryJsonParams {
    #[schemars(description = "Ticket id (e.g. HIVE-28708) or free-text problem description")]
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ExtractReferencesParams {
    #[schemars(description = "Text to analyse (ticket description, comment, PR body)")]
    pub text: String,
    #[schemars(description = "Jira project key; defaults to the configured project")]
    pub project: Option<String>,
    #[schemars(description = "GitHub repository as OWNER/REPO; defaults to the configured repository")]
    pub repo: Option<String>,
    #[schemars(description = "Number of keywords to return (default: configured keyword count)")]
    pub top_n: Option<usize>,
}

/// Output of `extract_references`
#[derive(Debug, Serialize, Deserialize)]
pub struct References {
    pub ticket_ids: BTreeSet<String>,
    pub ticket_keys: BTreeSet<String>,
    pub github: GithubRefs,
    pub keywords: Vec<String>,
    pub cleaned: String,
}

// ============================================================================
// Tool Router Implementation
// ============================================================================

#[tool_router]
impl IssuesMcpServer {
    /// Create a server with backends built from `config`
    pub fn new(config: Config) -> Result<Self, PluginError> {
        let mut plugin = IssuesPlugin::new();
        plugin.initialize(&config)?;
        Ok(Self::with_plugin(plugin, config))
    }

    /// Create a server around an already initialized plugin
    pub fn with_plugin(plugin: IssuesPlugin, config: Config) -> Self {
        Self {
            plugin,
            config,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Find Jira tickets, GitHub issues, pull requests and commits related to a query. Returns a concise text summary."
    )]
    async fn issues_query(
        &self,
        Parameters(params): Parameters<IssuesQueryParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = params.query.trim();
        if query.is_empty() {
            return Err(invalid_params("query cannot be empty"));
        }

        tracing::info!("Querying issues for: {}", query);
        let action = IssuesQueryAction::new(query).with_thought(params.thought.unwrap_or_default());
        let observation = self.plugin.query(&action).await;

        if observation.issues.is_empty() {
            return Ok(text_success(format!("No issues found for: {}", query)));
        }
        Ok(text_success(observation.content))
    }

    #[tool(description = "Same as issues_query but returns the full structured records as JSON.")]
    async fn issues_query_json(
        &self,
        Parameters(params): Parameters<IssuesQueryJsonParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = params.query.trim();
        if query.is_empty() {
            return Err(invalid_params("query cannot be empty"));
        }

        tracing::info!("Querying issues (json) for: {}", query);
        let observation = self.plugin.query(&IssuesQueryAction::new(query)).await;

        json_success(&observation)
    }

    #[tool(
        description = "Extract ticket ids, GitHub commit/PR links and ranked keywords from text without calling any tracker."
    )]
    async fn extract_references(
        &self,
        Parameters(params): Parameters<ExtractReferencesParams>,
    ) -> Result<CallToolResult, McpError> {
        let project = params
            .project
            .as_deref()
            .or(self.config.jira.project.as_deref());
        let repo = params.repo.as_deref().or(self.config.github.repo.as_deref());
        let top_n = params.top_n.unwrap_or(self.config.query.keywords);

        let references = References {
            ticket_ids: extract_ticket_ids(&params.text, project),
            ticket_keys: find_ticket_keys(&params.text),
            github: repo
                .map(|r| extract_github_refs(&params.text, r))
                .unwrap_or_default(),
            keywords: extract_keywords(&params.text, top_n),
            cleaned: clean_text(Some(&params.text)),
        };

        json_success(&references)
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for IssuesMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// EmbeddableMcp Implementation
// ============================================================================

#[async_trait]
impl EmbeddableMcp for IssuesMcpServer {
    fn server_name(&self) -> &str {
        IssuesPlugin::NAME
    }

    fn server_description(&self) -> Option<&str> {
        Some(INSTRUCTIONS)
    }

    fn server_version(&self) -> Option<&str> {
        Some(env!("CARGO_PKG_VERSION"))
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
        match name {
            "issues_query" => {
                let params: IssuesQueryParams = serde_json::from_value(params)?;
                self.issues_query(Parameters(params)).await.map_err(Into::into)
            }

            "issues_query_json" => {
                let params: IssuesQueryJsonParams = serde_json::from_value(params)?;
                self.issues_query_json(Parameters(params))
                    .await
                    .map_err(Into::into)
            }

            "extract_references" => {
                let params: ExtractReferencesParams = serde_json::from_value(params)?;
                self.extract_references(Parameters(params))
                    .await
                    .map_err(Into::into)
            }

            _ => Err(EmbeddableError::ToolNotFound(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    fn server() -> IssuesMcpServer {
        let mut config = Config::default();
        config.jira.project = Some("HIVE".into());
        config.github.repo = Some("apache/hive".into());
        // plugin left uninitialized so no tracker is ever contacted
        IssuesMcpServer::with_plugin(IssuesPlugin::new(), config)
    }

    fn text(result: &CallToolResult) -> String {
        match &result.content[0].raw {
            RawContent::Text(t) => t.text.clone(),
            other => panic!("unexpected content: {:?}", other),
        }
    }

    #[test]
    fn test_embeddable_server_name() {
        assert_eq!(server().server_name(), "issues");
    }

    #[test]
    fn test_embeddable_list_tools() {
        let tools = server().list_tools();
        assert_eq!(tools.len(), 3);

        let names: Vec<&str> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"issues_query"));
        assert!(names.contains(&"issues_query_json"));
        assert!(names.contains(&"extract_references"));
    }

    #[tokio::test]
    async fn test_issues_query_without_backends() {
        let result = server()
            .call_tool("issues_query", serde_json::json!({"query": "HIVE-28708"}))
            .await
            .unwrap();
        assert_eq!(text(&result), "No issues found for: HIVE-28708");
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let result = server()
            .call_tool("issues_query_json", serde_json::json!({"query": "  "}))
            .await;
        assert!(matches!(result, Err(EmbeddableError::McpError(_))));
    }

    #[tokio::test]
    async fn test_extract_references_uses_configured_scope() {
        let result = server()
            .call_tool(
                "extract_references",
                serde_json::json!({
                    "text": "HIVE-28708 merged via [69d0a3d|https://github.com/apache/hive/commit/69d0a3ddff695597ad8221bae0ead48f8f38b57f]"
                }),
            )
            .await
            .unwrap();

        let refs: References = serde_json::from_str(&text(&result)).unwrap();
        assert_eq!(refs.ticket_ids.into_iter().collect::<Vec<_>>(), vec!["28708"]);
        assert!(refs.ticket_keys.contains("HIVE-28708"));
        assert!(refs.github.commits.contains("69d0a3d"));
        assert!(refs.cleaned.starts_with("HIVE-28708 merged via ["));
    }

    #[tokio::test]
    async fn test_embeddable_unknown_tool() {
        let result = server()
            .call_tool("nonexistent_tool", serde_json::json!({}))
            .await;
        assert!(matches!(result, Err(EmbeddableError::ToolNotFound(_))));
    }

    #[tokio::test]
    async fn test_bad_params_are_serde_errors() {
        let result = server()
            .call_tool("issues_query", serde_json::json!({"thought": "no query"}))
            .await;
        assert!(matches!(result, Err(EmbeddableError::SerdeError(_))));
    }
}
