//! JQL query builders

/// Quote a JQL string literal
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// JQL full-text search for any of `terms`, optionally scoped to a project
pub fn jql_for_text<S: AsRef<str>>(project: Option<&str>, terms: &[S]) -> Option<String> {
    let clauses: Vec<String> = terms
        .iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .map(|t| format!("text ~ {}", quote(t)))
        .collect();
    if clauses.is_empty() {
        return None;
    }

    let text = clauses.join(" OR ");
    let jql = match project.filter(|p| !p.is_empty()) {
        Some(project) => format!("project = {} AND ({})", quote(project), text),
        None => format!("({})", text),
    };
    Some(format!("{} ORDER BY updated DESC", jql))
}
