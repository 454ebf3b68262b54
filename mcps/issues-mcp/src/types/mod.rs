//! Normalized tracker records
//!
//! Jira tickets, GitHub issues, pull requests and commits all share the
//! [`Issue`] base shape. [`TrackerItem`] is the closed set of variants an
//! issues query returns; each renders itself to the short text shown to the
//! agent through `Display`.

pub mod github;
pub mod issue;
pub mod item;
pub mod jira;

pub use github::{GithubCommit, GithubIssue, GithubPr};
pub use issue::{Issue, IssueSource};
pub use item::TrackerItem;
pub use jira::JiraIssue;

use chrono::{DateTime, FixedOffset, NaiveDate};

/// Render a tracker timestamp as `%m/%d/%y`
///
/// Accepts RFC 3339 (GitHub), Jira's `2025-01-14T10:20:30.000+0000` form and
/// bare dates. Anything else is returned unchanged.
pub fn short_date(timestamp: &str) -> String {
    let timestamp = timestamp.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return dt.format("%m/%d/%y").to_string();
    }
    if let Ok(dt) = DateTime::<FixedOffset>::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return dt.format("%m/%d/%y").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(timestamp, "%Y-%m-%d") {
        return date.format("%m/%d/%y").to_string();
    }
    timestamp.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_date_formats() {
        assert_eq!(short_date("2025-01-14T10:20:30Z"), "01/14/25");
        assert_eq!(short_date("2025-01-14T10:20:30.000+0000"), "01/14/25");
        assert_eq!(short_date("2025-01-14"), "01/14/25");
        assert_eq!(short_date("yesterday"), "yesterday");
        assert_eq!(short_date(""), "");
    }
}
