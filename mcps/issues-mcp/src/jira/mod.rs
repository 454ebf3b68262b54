//! Jira REST API access
//!
//! [`JiraClient`] searches tickets by JQL and fetches single tickets,
//! converting them into [`JiraIssue`](crate::types::JiraIssue) records.

pub mod client;
pub mod error;
pub mod jql;
pub mod types;

pub use client::{JiraBackend, JiraClient};
pub use error::{JiraError, JiraResult};
pub use jql::jql_for_text;
