//! MCP Common - Shared utilities for MCP servers
//!
//! - **Initialization**: [`init_tracing`] sends logs to stderr, keeping stdout
//!   for the protocol
//! - **Results**: helpers for building `CallToolResult` responses
//! - **Errors**: shorthand constructors for MCP error data
//! - **Embeddable**: [`EmbeddableMcp`] trait for in-process execution
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_common::{invalid_params, json_success, McpError};
//! use rmcp::model::CallToolResult;
//!
//! fn lookup(&self, query: &str) -> Result<CallToolResult, McpError> {
//!     if query.is_empty() {
//!         return Err(invalid_params("query cannot be empty"));
//!     }
//!     json_success(&self.find(query))
//! }
//! ```

pub mod embeddable;
pub mod error;
pub mod init;
pub mod result;

pub use embeddable::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
pub use error::{internal_error, invalid_params};
pub use init::init_tracing;
pub use result::{json_success, text_success};

// Re-export rmcp types that are commonly needed
pub use rmcp::{
    model::{CallToolResult, Content, Tool},
    ErrorData as McpError,
};

// Re-export async_trait for implementing EmbeddableMcp
pub use async_trait::async_trait;
