//! Centralized default constants for the FormAT assistant.
//!
//! **This module is the single source of truth** for shared default values.
//! Crates reference these constants instead of defining their own magic
//! numbers. Organized by domain area.

// =============================================================================
// QUERY MATCHER
// =============================================================================

/// Substrings that mark a query as factual and route it to live search first.
pub const FACTUAL_TRIGGERS: &[&str] = &[
    "what", "who", "where", "when", "how", "tell me", "research", "search",
];

/// Search result titles that indicate a placeholder rather than a real hit.
pub const PLACEHOLDER_RESULT_TITLES: &[&str] = &["No Results", "Search Completed"];

/// Per-use multiplier contribution to the match score.
pub const USAGE_SCORE_FACTOR: f64 = 0.01;

/// Per-feedback-point multiplier contribution to the match score.
pub const FEEDBACK_SCORE_FACTOR: f64 = 0.05;

/// Weight given to knowledge added without an explicit weight.
pub const KNOWLEDGE_WEIGHT: i32 = 5;

// =============================================================================
// BACKGROUND TRAINING
// =============================================================================

/// Interval between background training cycles (seconds).
pub const TRAINING_INTERVAL_SECS: u64 = 300;

/// Maximum unprocessed training records consumed per cycle.
pub const TRAINING_BATCH_LIMIT: i64 = 100;

/// Category assigned to knowledge mined from unknown queries.
pub const LEARNED_CATEGORY: &str = "learned";

/// Weight assigned to knowledge mined from unknown queries.
pub const LEARNED_WEIGHT: i32 = 3;

/// Words must be longer than this to count as keywords.
pub const KEYWORD_MIN_LEN: usize = 3;

/// Maximum keywords joined into a learned pattern.
pub const LEARNED_PATTERN_KEYWORDS: usize = 3;

/// Entries used more than this many times are eligible for decay.
pub const DECAY_USAGE_THRESHOLD: i32 = 10;

/// Entries with feedback below this value are eligible for decay.
pub const DECAY_FEEDBACK_THRESHOLD: i32 = -5;

/// Decay never reduces a weight below this floor.
pub const MIN_WEIGHT: i32 = 1;

/// Upper bound on a single scheduled task run (seconds).
pub const TASK_TIMEOUT_SECS: u64 = 120;

/// Capacity of scheduler event broadcast channels.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

// =============================================================================
// WEB SEARCH
// =============================================================================

/// HTML search endpoint host.
pub const SEARCH_BASE_URL: &str = "https://html.duckduckgo.com";

/// Timeout for one search request (seconds).
pub const SEARCH_TIMEOUT_SECS: u64 = 15;

/// Maximum results returned by one search.
pub const SEARCH_MAX_RESULTS: usize = 5;

/// Desktop browser User-Agent sent with search and translation requests.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

// =============================================================================
// TRANSLATION
// =============================================================================

/// Timeout for one translation provider call (seconds).
pub const TRANSLATE_TIMEOUT_SECS: u64 = 5;

/// Google-Translate-compatible endpoint host.
pub const GOOGLE_TRANSLATE_URL: &str = "https://translate.googleapis.com";

/// DeepL-compatible endpoint host.
pub const DEEPL_API_URL: &str = "https://api-free.deepl.com";

/// MyMemory-compatible endpoint host.
pub const MYMEMORY_API_URL: &str = "https://api.mymemory.translated.net";

/// LibreTranslate-compatible endpoint host.
pub const LIBRETRANSLATE_URL: &str = "https://libretranslate.de";

/// Final fallback endpoint host (MyMemory-compatible).
pub const FALLBACK_TRANSLATE_URL: &str = "https://api.mymemory.translated.net";

// =============================================================================
// HISTORY
// =============================================================================

/// Rows returned by per-user history endpoints.
pub const HISTORY_LIMIT: i64 = 5;

/// Characters of a question kept in its history summary.
pub const QUESTION_SUMMARY_CHARS: usize = 100;

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 5000;

/// Default database URL when `DATABASE_URL` is unset.
pub const DATABASE_URL: &str = "postgres://localhost/format";

/// Pool ceiling when `DB_MAX_CONNECTIONS` is unset.
pub const DB_MAX_CONNECTIONS: u32 = 10;

/// Acquire timeout when `DB_CONNECT_TIMEOUT_SECS` is unset.
pub const DB_CONNECT_TIMEOUT_SECS: u64 = 30;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decay_thresholds_are_consistent() {
        assert!(MIN_WEIGHT >= 1);
        assert!(DECAY_FEEDBACK_THRESHOLD < 0);
        assert!(LEARNED_WEIGHT > MIN_WEIGHT);
    }

    #[test]
    fn factual_triggers_are_lowercase() {
        for t in FACTUAL_TRIGGERS {
            assert_eq!(*t, t.to_lowercase());
        }
    }
}
