//! Compiled knowledge patterns and best-match selection.

use regex::{Regex, RegexBuilder};

use format_core::KnowledgeEntry;

/// One `|`-separated alternative of a knowledge pattern.
///
/// Alternatives are compiled once when the cache loads. Anything the regex
/// engine rejects is matched as a plain lower-cased substring instead.
#[derive(Debug, Clone)]
pub enum PatternMatcher {
    Regex(Regex),
    Substring(String),
}

impl PatternMatcher {
    pub fn compile(alternative: &str) -> Self {
        match RegexBuilder::new(alternative).case_insensitive(true).build() {
            Ok(re) => PatternMatcher::Regex(re),
            Err(_) => PatternMatcher::Substring(alternative.to_lowercase()),
        }
    }

    /// `query` is expected to be lower-cased already.
    pub fn is_match(&self, query: &str) -> bool {
        match self {
            PatternMatcher::Regex(re) => re.is_match(query),
            PatternMatcher::Substring(needle) => query.contains(needle.as_str()),
        }
    }
}

/// A knowledge entry with its alternatives compiled.
#[derive(Debug, Clone)]
pub struct CompiledEntry {
    pub entry: KnowledgeEntry,
    matchers: Vec<PatternMatcher>,
}

impl CompiledEntry {
    pub fn compile(entry: KnowledgeEntry) -> Self {
        let matchers = entry.alternatives().map(PatternMatcher::compile).collect();
        Self { entry, matchers }
    }

    pub fn matchers(&self) -> &[PatternMatcher] {
        &self.matchers
    }

    pub fn matches(&self, query: &str) -> bool {
        self.matchers.iter().any(|m| m.is_match(query))
    }
}

/// The matching entry with the strictly highest positive score.
///
/// Ties keep the entry seen first, so callers pass entries ordered by
/// weight descending.
pub fn best_match<'a>(entries: &'a [CompiledEntry], query: &str) -> Option<(&'a CompiledEntry, f64)> {
    let mut best: Option<(&CompiledEntry, f64)> = None;
    let mut highest = 0.0;

    for candidate in entries {
        if !candidate.matches(query) {
            continue;
        }
        let score = candidate.entry.score();
        if score > highest {
            highest = score;
            best = Some((candidate, score));
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn entry(pattern: &str, weight: i32, usage_count: i32, feedback: i32) -> KnowledgeEntry {
        KnowledgeEntry {
            id: Uuid::new_v4(),
            category: "test".to_string(),
            pattern: pattern.to_string(),
            response: format!("response for {}", pattern),
            weight,
            usage_count,
            feedback,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn compiled(entries: Vec<KnowledgeEntry>) -> Vec<CompiledEntry> {
        entries.into_iter().map(CompiledEntry::compile).collect()
    }

    #[test]
    fn test_regex_is_case_insensitive_and_unanchored() {
        let m = PatternMatcher::compile("Python");
        assert!(matches!(m, PatternMatcher::Regex(_)));
        assert!(m.is_match("i like python a lot"));
    }

    #[test]
    fn test_invalid_regex_falls_back_to_substring() {
        let m = PatternMatcher::compile("c++(");
        match &m {
            PatternMatcher::Substring(s) => assert_eq!(s, "c++("),
            other => panic!("expected substring matcher, got {:?}", other),
        }
        assert!(m.is_match("is c++( valid"));
        assert!(!m.is_match("c++"));
    }

    #[test]
    fn test_empty_alternatives_are_not_compiled() {
        let c = CompiledEntry::compile(entry("hello||", 1, 0, 0));
        assert_eq!(c.matchers().len(), 1);
        assert!(!c.matches("goodbye"));
    }

    #[test]
    fn test_highest_score_wins() {
        let entries = compiled(vec![
            entry("rust", 5, 0, 0),
            entry("rust|cargo", 5, 100, 0),
        ]);
        let (winner, score) = best_match(&entries, "tell me about rust").unwrap();
        assert_eq!(winner.entry.pattern, "rust|cargo");
        assert!((score - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_ties_keep_first() {
        let entries = compiled(vec![entry("rust", 5, 0, 0), entry("rust", 5, 0, 0)]);
        let (winner, _) = best_match(&entries, "rust").unwrap();
        assert_eq!(winner.entry.id, entries[0].entry.id);
    }

    #[test]
    fn test_non_positive_scores_never_win() {
        let entries = compiled(vec![entry("rust", 0, 0, 0), entry("rust", 5, 0, -40)]);
        assert!(best_match(&entries, "rust").is_none());
    }

    #[test]
    fn test_no_match() {
        let entries = compiled(vec![entry("python", 8, 0, 0)]);
        assert!(best_match(&entries, "what is the speed of light?").is_none());
    }
}
