//! Text cleanup and ticket id extraction

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

static HTML_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

// Innermost brace group; applied until nothing matches so nested groups go too
static BRACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{[^{}]*\}").unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

// Removed tags leave `word .` behind; runs after whitespace is collapsed
static SPACE_BEFORE_PUNCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" ([.,;:!?])").unwrap());

static ANY_TICKET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b[A-Z][A-Z0-9]*-(\d+)\b").unwrap());

// Keys without a project scope must be upper case, `utf-8` is not a ticket
static TICKET_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z][A-Z0-9]+)-(\d+)\b").unwrap());

/// Strip HTML tags and `{...}` fragments and collapse whitespace
///
/// `None` and empty input give an empty string. The result is stable:
/// cleaning it again returns it unchanged.
pub fn clean_text(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };
    if text.is_empty() {
        return String::new();
    }

    let text = text.replace("&nbsp;", " ");
    let mut cleaned = HTML_TAG_RE.replace_all(&text, " ").into_owned();
    while BRACE_RE.is_match(&cleaned) {
        cleaned = BRACE_RE.replace_all(&cleaned, " ").into_owned();
    }

    let collapsed = WHITESPACE_RE.replace_all(&cleaned, " ");
    SPACE_BEFORE_PUNCT_RE
        .replace_all(collapsed.trim(), "$1")
        .into_owned()
}

fn ticket_regex(project: Option<&str>) -> Option<Regex> {
    match project.map(str::trim).filter(|p| !p.is_empty()) {
        Some(project) => {
            let pattern = format!(r"(?i)\b{}-(\d+)\b", regex::escape(project));
            match Regex::new(&pattern) {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!(project, error = %e, "invalid ticket pattern");
                    None
                }
            }
        }
        None => Some(ANY_TICKET_RE.clone()),
    }
}

/// First `PROJECT-123` ticket in `text`, returned as its number
///
/// Matching ignores case. With no project any `[A-Z]+-digits` id counts.
pub fn extract_ticket_id(text: &str, project: Option<&str>) -> Option<String> {
    let re = ticket_regex(project)?;
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Every distinct `PROJECT-123` ticket number in `text`
pub fn extract_ticket_ids(text: &str, project: Option<&str>) -> BTreeSet<String> {
    let Some(re) = ticket_regex(project) else {
        return BTreeSet::new();
    };
    re.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Every distinct ticket key in `text`, upper-cased
///
/// Matches like [`extract_ticket_ids`] but keeps the project part, so
/// `hive-42` comes back as `HIVE-42`. Without a project any `x-digits`
/// token counts, including single-letter keys such as `X-5` and false
/// hits like `UTF-8`.
pub fn extract_ticket_keys(text: &str, project: Option<&str>) -> BTreeSet<String> {
    let Some(re) = ticket_regex(project) else {
        return BTreeSet::new();
    };
    re.find_iter(text)
        .map(|m| m.as_str().to_uppercase())
        .collect()
}

/// Every distinct upper-case ticket key (`HIVE-1234`) in `text`, any project
pub fn find_ticket_keys(text: &str) -> BTreeSet<String> {
    TICKET_KEY_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_strips_markup() {
        let raw = "<p>Merged   to <b>master</b></p>\n{code}ignored{code} done";
        assert_eq!(clean_text(Some(raw)), "Merged to master ignored done");
    }

    #[test]
    fn test_clean_text_nested_braces() {
        assert_eq!(clean_text(Some("a {{b}} c")), "a c");
    }

    #[test]
    fn test_clean_text_no_space_before_punctuation() {
        let raw = "The Hive project publishes Build Scans to <b>ge.apache.org</b>.";
        assert_eq!(
            clean_text(Some(raw)),
            "The Hive project publishes Build Scans to ge.apache.org."
        );
        assert_eq!(
            clean_text(Some("Fixed in {code}x{code}, see <i>notes</i> : done")),
            "Fixed in x, see notes: done"
        );
    }

    #[test]
    fn test_clean_text_none_and_empty() {
        assert_eq!(clean_text(None), "");
        assert_eq!(clean_text(Some("")), "");
        assert_eq!(clean_text(Some("   \n\t ")), "");
    }

    #[test]
    fn test_clean_text_idempotent() {
        let inputs = [
            "<div>Hello\n\n world</div>",
            "{color:red}warning{color} <<x>y>",
            "a < b > c {d",
            "plain text",
            "{{{}}} }{",
            "see <b>docs</b> . , ; done",
            "a . . b ! ?",
        ];
        for input in inputs {
            let once = clean_text(Some(input));
            assert_eq!(clean_text(Some(&once)), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_extract_ticket_ids_case_insensitive() {
        let ids = extract_ticket_ids("See HIVE-1234 and hive-5678", Some("HIVE"));
        let expected: BTreeSet<String> = ["1234", "5678"].iter().map(|s| s.to_string()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_extract_ticket_ids_dedup_and_scope() {
        let ids = extract_ticket_ids("HIVE-1, HIVE-1, SPARK-2", Some("HIVE"));
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec!["1"]);
    }

    #[test]
    fn test_extract_ticket_id_first_match() {
        assert_eq!(
            extract_ticket_id("fixes hive-42 then HIVE-7", Some("HIVE")),
            Some("42".to_string())
        );
        assert_eq!(extract_ticket_id("no ticket here", Some("HIVE")), None);
        assert_eq!(extract_ticket_id("SPARK-9 only", None), Some("9".to_string()));
    }

    #[test]
    fn test_extract_ticket_keys_upper_cases() {
        let keys = extract_ticket_keys("compare hive-28708 with HIVE-99 and SPARK-1", Some("hive"));
        assert_eq!(keys.into_iter().collect::<Vec<_>>(), vec!["HIVE-28708", "HIVE-99"]);

        let keys = extract_ticket_keys("look at hive-28708 and x-5", None);
        assert_eq!(keys.into_iter().collect::<Vec<_>>(), vec!["HIVE-28708", "X-5"]);
        assert!(extract_ticket_keys("no tickets", None).is_empty());
    }

    #[test]
    fn test_find_ticket_keys_upper_case_only() {
        let keys = find_ticket_keys("HIVE-1 relates to SPARK-22, encoding utf-8, HIVE-1");
        assert_eq!(keys.into_iter().collect::<Vec<_>>(), vec!["HIVE-1", "SPARK-22"]);
    }
}
