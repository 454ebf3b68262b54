//! Keyword ranking
//!
//! Scoring is done by the [`rake`] crate; this module supplies the stop list
//! and shapes the ranked phrases into search terms.

use std::collections::HashSet;
use std::sync::LazyLock;

use rake::{KeywordScore, Rake, StopWords};

const STOP_LIST: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
    "any", "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "could", "did", "do", "does", "doing", "done", "down",
    "during", "each", "else", "few", "for", "from", "further", "get", "gets", "got", "had",
    "has", "have", "having", "he", "her", "here", "hers", "him", "his", "how", "i", "if", "in",
    "into", "is", "it", "its", "itself", "just", "let", "like", "may", "me", "might", "more",
    "most", "must", "my", "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or",
    "other", "our", "ours", "out", "over", "own", "please", "same", "see", "she", "should",
    "so", "some", "such", "than", "thanks", "that", "the", "their", "them", "then", "there",
    "these", "they", "this", "those", "through", "to", "too", "under", "until", "up", "us",
    "use", "used", "using", "very", "via", "was", "we", "were", "what", "when", "where",
    "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
];

static RAKE: LazyLock<Rake> = LazyLock::new(|| {
    let mut stop_words = StopWords::new();
    stop_words.extend(STOP_LIST.iter().map(|w| w.to_string()));
    Rake::new(stop_words)
});

/// Top `top_n` key phrases of `text`, best first, lower-cased
pub fn extract_keywords(text: &str, top_n: usize) -> Vec<String> {
    if top_n == 0 || text.trim().is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<KeywordScore> = RAKE.run(&text.to_lowercase());
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut seen = HashSet::new();
    ranked
        .into_iter()
        .map(|k| k.keyword.trim().to_string())
        .filter(|k| !k.is_empty() && seen.insert(k.clone()))
        .take(top_n)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_repeated_phrase_first() {
        let text = "Compilation fails on flaky test. The flaky test fails again";
        let keywords = extract_keywords(text, 2);
        assert_eq!(keywords.len(), 2);
        assert!(keywords[0].contains("flaky test"), "{:?}", keywords);
    }

    #[test]
    fn test_empty_input_and_zero_limit() {
        assert!(extract_keywords("", 5).is_empty());
        assert!(extract_keywords("   ", 5).is_empty());
        assert!(extract_keywords("flaky test", 0).is_empty());
    }

    #[test]
    fn test_stop_words_only() {
        assert!(extract_keywords("the and of to", 3).is_empty());
    }

    #[test]
    fn test_lower_cased_and_limited() {
        let keywords = extract_keywords("Backport HIVE-28708 to Branch. Build Scan moved", 2);
        assert!(keywords.len() <= 2);
        assert!(keywords.iter().all(|k| *k == k.to_lowercase()));
        assert!(keywords.iter().any(|k| k.contains("hive") || k.contains("build scan")));
    }

    #[test]
    fn test_phrases_are_unique() {
        let keywords = extract_keywords("build scan. build scan. build scan", 5);
        assert_eq!(keywords, vec!["build scan".to_string()]);
    }
}
