//! Core traits for the assistant's storage and provider seams.
//!
//! Concrete implementations live in `format-db` (PostgreSQL and in-memory
//! mocks), `format-search`, and `format-translate`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// KNOWLEDGE REPOSITORY
// =============================================================================

/// Repository for knowledge entries.
#[async_trait]
pub trait KnowledgeRepository: Send + Sync {
    /// Number of stored entries.
    async fn count(&self) -> Result<i64>;

    /// All entries ordered by weight descending (oldest first among equals).
    async fn list_by_weight(&self) -> Result<Vec<KnowledgeEntry>>;

    /// Fetch a single entry.
    async fn get(&self, id: Uuid) -> Result<Option<KnowledgeEntry>>;

    /// Insert a new entry with zero usage and feedback.
    async fn insert(&self, entry: NewKnowledgeEntry) -> Result<Uuid>;

    /// Increment `usage_count` by one.
    async fn increment_usage(&self, id: Uuid) -> Result<()>;

    /// Add `delta` to `feedback`. Fails with `NotFound` for unknown ids.
    async fn adjust_feedback(&self, id: Uuid, delta: i32) -> Result<()>;

    /// Entries with `usage_count > min_usage` and `feedback < max_feedback`.
    async fn list_decay_candidates(
        &self,
        min_usage: i32,
        max_feedback: i32,
    ) -> Result<Vec<KnowledgeEntry>>;

    /// Overwrite an entry's weight.
    async fn set_weight(&self, id: Uuid, weight: i32) -> Result<()>;
}

// =============================================================================
// TRAINING REPOSITORY
// =============================================================================

/// Repository for the query training log.
#[async_trait]
pub trait TrainingRepository: Send + Sync {
    /// Log a query.
    async fn insert(
        &self,
        input: &str,
        category: TrainingCategory,
        actual_output: Option<&str>,
    ) -> Result<Uuid>;

    /// Oldest unprocessed records, at most `limit`.
    async fn list_unprocessed(&self, limit: i64) -> Result<Vec<TrainingRecord>>;

    /// Flip `processed` to true.
    ///
    /// Returns `false` if the record was already processed (or does not
    /// exist), so each record transitions exactly once.
    async fn mark_processed(&self, id: Uuid) -> Result<bool>;
}

// =============================================================================
// HISTORY REPOSITORY
// =============================================================================

/// Repository for per-user search and question history.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    async fn insert_search(&self, entry: NewSearchHistory) -> Result<Uuid>;

    /// Newest first.
    async fn list_search_for_user(&self, user_id: &str, limit: i64)
        -> Result<Vec<SearchHistoryEntry>>;

    /// Every user's searches, newest first.
    async fn list_all_search(&self) -> Result<Vec<SearchHistoryEntry>>;

    async fn insert_question(&self, entry: NewQuestionHistory) -> Result<Uuid>;

    /// Newest first.
    async fn list_questions_for_user(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<QuestionHistoryEntry>>;
}

// =============================================================================
// PROVIDER TRAITS
// =============================================================================

/// Live web search.
///
/// Implementations are total: network and parse failures yield an empty list.
#[async_trait]
pub trait WebSearch: Send + Sync {
    async fn search(&self, query: &str) -> Vec<SearchResult>;
}

/// Search backend that never finds anything.
pub struct NoOpSearch;

#[async_trait]
impl WebSearch for NoOpSearch {
    async fn search(&self, _query: &str) -> Vec<SearchResult> {
        Vec::new()
    }
}

/// One translation backend in the fan-out chain.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Name reported in translation sources.
    fn name(&self) -> &str;

    /// Whether this provider can translate into `target` (a normalized
    /// two-letter code). Unsupported targets skip the provider without a call.
    fn supports(&self, _target: &str) -> bool {
        true
    }

    /// Translate `text` into `target`.
    ///
    /// Any error (transport, timeout, unexpected response shape) tells the
    /// fan-out to move on to the next provider.
    async fn translate(&self, text: &str, target: &str) -> Result<TranslationResult>;
}
