//! Base issue shape shared by every tracker record

use std::fmt;

use serde::{Deserialize, Serialize};

/// Longest description rendered into the agent text
const DESCRIPTION_LIMIT: usize = 500;

/// Longest single comment rendered into the agent text
const COMMENT_LIMIT: usize = 300;

/// Only the most recent comments are rendered
const MAX_RENDERED_COMMENTS: usize = 5;

/// Which tracker a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSource {
    Jira,
    Github,
}

impl fmt::Display for IssueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueSource::Jira => write!(f, "jira"),
            IssueSource::Github => write!(f, "github"),
        }
    }
}

/// Normalized view of a tracker item
///
/// Every variant (Jira ticket, GitHub issue, PR, commit) carries this shape.
/// Fields that a tracker does not provide are left empty and skipped when
/// rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Tracker-local identifier (Jira ticket number, PR number, short SHA)
    pub id: String,

    pub source: IssueSource,

    pub title: String,

    /// Creation date, already formatted for display (`%m/%d/%y`)
    #[serde(default)]
    pub created: String,

    #[serde(default)]
    pub description: String,

    /// Ordered status tags, most significant first (e.g. `["Resolved", "Fixed"]`)
    #[serde(default)]
    pub status: Vec<String>,

    #[serde(default)]
    pub comments: Vec<String>,

    /// Ticket keys referenced by this item (e.g. `HIVE-1234`)
    #[serde(default)]
    pub related_tickets: Vec<String>,
}

impl Issue {
    pub fn new(id: impl Into<String>, source: IssueSource, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source,
            title: title.into(),
            created: String::new(),
            description: String::new(),
            status: Vec::new(),
            comments: Vec::new(),
            related_tickets: Vec::new(),
        }
    }

    pub fn with_created(mut self, created: impl Into<String>) -> Self {
        self.created = created.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_status(mut self, status: Vec<String>) -> Self {
        self.status = status;
        self
    }

    pub fn with_comments(mut self, comments: Vec<String>) -> Self {
        self.comments = comments;
        self
    }

    pub fn with_related_tickets(mut self, related: Vec<String>) -> Self {
        self.related_tickets = related;
        self
    }

    /// Write the header line followed by the common fields
    ///
    /// `header` is written directly before the id (`"Jira issue "`, `"GitHub PR #"`).
    ///
    /// `extra` lines are inserted after the status line so variants can add
    /// their own fields (component, commit list, ...) in a stable position.
    pub(crate) fn render(
        &self,
        f: &mut fmt::Formatter<'_>,
        header: &str,
        extra: &[(&str, String)],
    ) -> fmt::Result {
        write!(f, "{}{}", header, self.id)?;
        if !self.title.is_empty() {
            write!(f, ": {}", self.title)?;
        }

        if !self.created.is_empty() {
            write!(f, "\nCreated: {}", self.created)?;
        }
        if !self.status.is_empty() {
            write!(f, "\nStatus: {}", self.status.join(", "))?;
        }
        for (label, value) in extra {
            if !value.is_empty() {
                write!(f, "\n{}: {}", label, value)?;
            }
        }
        if !self.related_tickets.is_empty() {
            write!(f, "\nRelated tickets: {}", self.related_tickets.join(", "))?;
        }
        if !self.description.is_empty() {
            write!(
                f,
                "\nDescription: {}",
                truncate(&self.description, DESCRIPTION_LIMIT)
            )?;
        }
        if !self.comments.is_empty() {
            write!(f, "\nComments:")?;
            let skip = self.comments.len().saturating_sub(MAX_RENDERED_COMMENTS);
            if skip > 0 {
                write!(f, "\n({} earlier comments omitted)", skip)?;
            }
            for comment in self.comments.iter().skip(skip) {
                write!(f, "\n- {}", truncate(comment, COMMENT_LIMIT))?;
            }
        }
        Ok(())
    }
}

/// Cut `text` to at most `limit` characters, marking the cut with `...`
pub(crate) fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate("abc", 10), "abc");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo wörld", 5), "héllo...");
    }

    #[test]
    fn test_source_serializes_lowercase() {
        let json = serde_json::to_string(&IssueSource::Github).unwrap();
        assert_eq!(json, "\"github\"");
    }
}
