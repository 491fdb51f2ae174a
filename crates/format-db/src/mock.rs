//! In-memory repositories for deterministic testing.
//!
//! Each mock records how often it was called and can be switched into a
//! failing mode, where every operation returns `Error::Internal`.
//!
//! ```rust,ignore
//! use format_db::mock::MockKnowledgeRepository;
//!
//! let repo = MockKnowledgeRepository::new();
//! repo.set_failing(true);
//! assert!(repo.count().await.is_err());
//! ```

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use format_core::{
    Error, HistoryRepository, KnowledgeEntry, KnowledgeRepository, NewKnowledgeEntry,
    NewQuestionHistory, NewSearchHistory, QuestionHistoryEntry, Result, SearchHistoryEntry,
    TrainingCategory, TrainingRecord, TrainingRepository,
};

/// Shared failure switch and call counter.
#[derive(Debug, Default)]
struct CallTracker {
    failing: AtomicBool,
    calls: AtomicUsize,
}

impl CallTracker {
    fn enter(&self, op: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::Internal(format!("mock failure: {}", op)));
        }
        Ok(())
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panicking test thread must not poison the other tests' view.
    m.lock().unwrap_or_else(|e| e.into_inner())
}

// =============================================================================
// KNOWLEDGE
// =============================================================================

/// In-memory knowledge store.
#[derive(Clone, Default)]
pub struct MockKnowledgeRepository {
    entries: Arc<Mutex<Vec<KnowledgeEntry>>>,
    tracker: Arc<CallTracker>,
}

impl MockKnowledgeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with fully specified entries (usage and feedback included).
    pub fn with_entries(entries: Vec<KnowledgeEntry>) -> Self {
        let repo = Self::default();
        *lock(&repo.entries) = entries;
        repo
    }

    /// Make every subsequent call fail.
    pub fn set_failing(&self, failing: bool) {
        self.tracker.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of trait calls so far.
    pub fn call_count(&self) -> usize {
        self.tracker.calls.load(Ordering::SeqCst)
    }

    /// Snapshot of the stored entries in insertion order.
    pub fn entries(&self) -> Vec<KnowledgeEntry> {
        lock(&self.entries).clone()
    }

    /// Snapshot of one entry, bypassing the failure switch.
    pub fn entry(&self, id: Uuid) -> Option<KnowledgeEntry> {
        lock(&self.entries).iter().find(|e| e.id == id).cloned()
    }
}

#[async_trait]
impl KnowledgeRepository for MockKnowledgeRepository {
    async fn count(&self) -> Result<i64> {
        self.tracker.enter("count")?;
        Ok(lock(&self.entries).len() as i64)
    }

    async fn list_by_weight(&self) -> Result<Vec<KnowledgeEntry>> {
        self.tracker.enter("list_by_weight")?;
        let mut entries = lock(&self.entries).clone();
        // Stable sort keeps insertion order among equal weights.
        entries.sort_by(|a, b| b.weight.cmp(&a.weight));
        Ok(entries)
    }

    async fn get(&self, id: Uuid) -> Result<Option<KnowledgeEntry>> {
        self.tracker.enter("get")?;
        Ok(self.entry(id))
    }

    async fn insert(&self, entry: NewKnowledgeEntry) -> Result<Uuid> {
        self.tracker.enter("insert")?;
        entry.validate()?;
        let now = Utc::now();
        let id = Uuid::now_v7();
        lock(&self.entries).push(KnowledgeEntry {
            id,
            category: entry.category,
            pattern: entry.pattern,
            response: entry.response,
            weight: entry.weight,
            usage_count: 0,
            feedback: 0,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn increment_usage(&self, id: Uuid) -> Result<()> {
        self.tracker.enter("increment_usage")?;
        if let Some(e) = lock(&self.entries).iter_mut().find(|e| e.id == id) {
            e.usage_count += 1;
        }
        Ok(())
    }

    async fn adjust_feedback(&self, id: Uuid, delta: i32) -> Result<()> {
        self.tracker.enter("adjust_feedback")?;
        let mut entries = lock(&self.entries);
        let entry = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| Error::NotFound(format!("Knowledge entry {}", id)))?;
        entry.feedback += delta;
        entry.updated_at = Utc::now();
        Ok(())
    }

    async fn list_decay_candidates(
        &self,
        min_usage: i32,
        max_feedback: i32,
    ) -> Result<Vec<KnowledgeEntry>> {
        self.tracker.enter("list_decay_candidates")?;
        Ok(lock(&self.entries)
            .iter()
            .filter(|e| e.usage_count > min_usage && e.feedback < max_feedback)
            .cloned()
            .collect())
    }

    async fn set_weight(&self, id: Uuid, weight: i32) -> Result<()> {
        self.tracker.enter("set_weight")?;
        if weight < 0 {
            return Err(Error::InvalidInput(format!(
                "Knowledge weight must be non-negative, got {}",
                weight
            )));
        }
        if let Some(e) = lock(&self.entries).iter_mut().find(|e| e.id == id) {
            e.weight = weight;
            e.updated_at = Utc::now();
        }
        Ok(())
    }
}

// =============================================================================
// TRAINING
// =============================================================================

/// In-memory training log.
#[derive(Clone, Default)]
pub struct MockTrainingRepository {
    records: Arc<Mutex<Vec<TrainingRecord>>>,
    tracker: Arc<CallTracker>,
}

impl MockTrainingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.tracker.failing.store(failing, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.tracker.calls.load(Ordering::SeqCst)
    }

    /// Snapshot of every record in insertion order.
    pub fn records(&self) -> Vec<TrainingRecord> {
        lock(&self.records).clone()
    }

    /// Insert a record with an arbitrary category string.
    pub fn push_raw(&self, input: &str, category: &str) -> Uuid {
        let id = Uuid::now_v7();
        lock(&self.records).push(TrainingRecord {
            id,
            input: input.to_string(),
            category: category.to_string(),
            actual_output: None,
            processed: false,
            created_at: Utc::now(),
        });
        id
    }
}

#[async_trait]
impl TrainingRepository for MockTrainingRepository {
    async fn insert(
        &self,
        input: &str,
        category: TrainingCategory,
        actual_output: Option<&str>,
    ) -> Result<Uuid> {
        self.tracker.enter("insert")?;
        let id = Uuid::now_v7();
        lock(&self.records).push(TrainingRecord {
            id,
            input: input.to_string(),
            category: category.as_str().to_string(),
            actual_output: actual_output.map(str::to_string),
            processed: false,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn list_unprocessed(&self, limit: i64) -> Result<Vec<TrainingRecord>> {
        self.tracker.enter("list_unprocessed")?;
        let take = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        Ok(lock(&self.records)
            .iter()
            .filter(|r| !r.processed)
            .take(take)
            .cloned()
            .collect())
    }

    async fn mark_processed(&self, id: Uuid) -> Result<bool> {
        self.tracker.enter("mark_processed")?;
        let mut records = lock(&self.records);
        match records.iter_mut().find(|r| r.id == id && !r.processed) {
            Some(r) => {
                r.processed = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// =============================================================================
// HISTORY
// =============================================================================

/// In-memory search and question history.
#[derive(Clone, Default)]
pub struct MockHistoryRepository {
    searches: Arc<Mutex<Vec<SearchHistoryEntry>>>,
    questions: Arc<Mutex<Vec<QuestionHistoryEntry>>>,
    tracker: Arc<CallTracker>,
}

impl MockHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.tracker.failing.store(failing, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.tracker.calls.load(Ordering::SeqCst)
    }

    pub fn searches(&self) -> Vec<SearchHistoryEntry> {
        lock(&self.searches).clone()
    }

    pub fn questions(&self) -> Vec<QuestionHistoryEntry> {
        lock(&self.questions).clone()
    }
}

/// Newest first, relying on insertion order rather than timestamps so
/// entries created within the same clock tick still order deterministically.
fn newest_first<T: Clone>(items: &[T], keep: impl Fn(&T) -> bool, limit: usize) -> Vec<T> {
    items
        .iter()
        .rev()
        .filter(|i| keep(i))
        .take(limit)
        .cloned()
        .collect()
}

#[async_trait]
impl HistoryRepository for MockHistoryRepository {
    async fn insert_search(&self, entry: NewSearchHistory) -> Result<Uuid> {
        self.tracker.enter("insert_search")?;
        let id = Uuid::now_v7();
        lock(&self.searches).push(SearchHistoryEntry {
            id,
            user_id: entry.user_id,
            query: entry.query,
            summary: entry.summary,
            results: entry.results,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn list_search_for_user(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<SearchHistoryEntry>> {
        self.tracker.enter("list_search_for_user")?;
        let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        Ok(newest_first(
            &lock(&self.searches),
            |e| e.user_id == user_id,
            limit,
        ))
    }

    async fn list_all_search(&self) -> Result<Vec<SearchHistoryEntry>> {
        self.tracker.enter("list_all_search")?;
        Ok(newest_first(&lock(&self.searches), |_| true, usize::MAX))
    }

    async fn insert_question(&self, entry: NewQuestionHistory) -> Result<Uuid> {
        self.tracker.enter("insert_question")?;
        let id = Uuid::now_v7();
        lock(&self.questions).push(QuestionHistoryEntry {
            id,
            user_id: entry.user_id,
            question: entry.question,
            summary: entry.summary,
            answer: entry.answer,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn list_questions_for_user(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<QuestionHistoryEntry>> {
        self.tracker.enter("list_questions_for_user")?;
        let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        Ok(newest_first(
            &lock(&self.questions),
            |e| e.user_id == user_id,
            limit,
        ))
    }
}
