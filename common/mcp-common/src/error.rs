//! Error constructors for MCP tool handlers

use rmcp::ErrorData as McpError;

/// Internal error carrying `message` and no extra data
pub fn internal_error(message: impl Into<String>) -> McpError {
    McpError::internal_error(message.into(), None)
}

/// Invalid-params error; use when a tool argument fails validation
///
/// ```rust,ignore
/// if params.query.trim().is_empty() {
///     return Err(invalid_params("query cannot be empty"));
/// }
/// ```
pub fn invalid_params(message: impl Into<String>) -> McpError {
    McpError::invalid_params(message.into(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_error() {
        let err = internal_error("jira unreachable");
        assert!(err.message.contains("jira unreachable"));
    }

    #[test]
    fn test_invalid_params() {
        let err = invalid_params("query cannot be empty");
        assert!(err.message.contains("query cannot be empty"));
    }
}
