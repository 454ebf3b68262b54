//! Error types for Jira REST operations

use thiserror::Error;

/// Errors that can occur when talking to a Jira server
#[derive(Error, Debug)]
pub enum JiraError {
    /// No server URL configured
    #[error("Jira URL not configured")]
    NotConfigured,

    /// The configured server URL does not parse
    #[error("invalid Jira URL '{0}'")]
    InvalidUrl(String),

    /// Transport-level failure (connect, timeout, TLS)
    #[error("Jira request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Jira returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, truncated
        body: String,
    },

    /// The response body is not the JSON we expect
    #[error("failed to decode Jira response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type alias for Jira operations
pub type JiraResult<T> = Result<T, JiraError>;
