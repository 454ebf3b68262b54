//! In-process execution of MCP servers
//!
//! [`EmbeddableMcp`] lets a host call a server's tools directly, without a
//! stdio subprocess in between.
//!
//! ```rust,ignore
//! use mcp_common::EmbeddableMcp;
//! use issues_mcp::{Config, IssuesMcpServer};
//!
//! let server = IssuesMcpServer::new(Config::load()?)?;
//! let result = server
//!     .call_tool("issues_query", serde_json::json!({"query": "HIVE-28708"}))
//!     .await?;
//! ```

use async_trait::async_trait;
use rmcp::model::{CallToolResult, Tool};
use serde_json::Value;

/// Error type for embeddable MCP operations
#[derive(Debug, thiserror::Error)]
pub enum EmbeddableError {
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    /// Tool parameters could not be decoded
    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    /// The tool itself returned an MCP error
    #[error("mcp error: {0}")]
    McpError(String),
}

impl From<rmcp::ErrorData> for EmbeddableError {
    fn from(err: rmcp::ErrorData) -> Self {
        EmbeddableError::McpError(err.message.to_string())
    }
}

pub type EmbeddableResult<T> = Result<T, EmbeddableError>;

/// MCP server whose tools can be called in-process
///
/// Servers built on `#[tool_router]` list their tools through the router and
/// dispatch `call_tool` by name, decoding `params` into the tool's parameter
/// type. Unknown names yield [`EmbeddableError::ToolNotFound`].
#[async_trait]
pub trait EmbeddableMcp: Send + Sync {
    /// Name used for this server in MCP configuration files
    fn server_name(&self) -> &str;

    fn list_tools(&self) -> Vec<Tool>;

    /// Execute tool `name` with a JSON object of parameters
    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult>;

    fn server_description(&self) -> Option<&str> {
        None
    }

    fn server_version(&self) -> Option<&str> {
        None
    }
}
