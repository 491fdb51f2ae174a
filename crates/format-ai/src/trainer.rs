//! Background knowledge growth and decay.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use format_core::defaults::{
    DECAY_FEEDBACK_THRESHOLD, DECAY_USAGE_THRESHOLD, KEYWORD_MIN_LEN, LEARNED_CATEGORY,
    LEARNED_PATTERN_KEYWORDS, LEARNED_WEIGHT, MIN_WEIGHT, TRAINING_BATCH_LIMIT,
};
use format_core::{KnowledgeRepository, NewKnowledgeEntry, Result, TrainingRepository};

use crate::cache::KnowledgeCache;

/// What one training cycle did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrainingReport {
    /// Records marked processed.
    pub processed: usize,
    /// "learned" entries inserted.
    pub learned: usize,
    /// Entries whose weight was lowered.
    pub decayed: usize,
}

/// Lower-case, drop everything but ASCII letters and whitespace, and keep
/// words longer than three characters.
pub fn extract_keywords(input: &str) -> Vec<String> {
    let cleaned: String = input
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .filter(|w| w.len() > KEYWORD_MIN_LEN)
        .map(str::to_string)
        .collect()
}

/// Knowledge entry learned from an unanswered query's keywords.
pub fn learned_entry(keywords: &[String]) -> Option<NewKnowledgeEntry> {
    let first = keywords.first()?;
    let pattern = keywords
        .iter()
        .take(LEARNED_PATTERN_KEYWORDS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("|");
    let response = format!(
        "I'm learning about topics related to \"{}\". This is an area I'm developing knowledge in. Try /search for more detailed information.",
        first
    );
    Some(NewKnowledgeEntry::new(
        LEARNED_CATEGORY,
        pattern,
        response,
        LEARNED_WEIGHT,
    ))
}

/// Mines unanswered queries into new entries and decays poorly rated ones.
pub struct KnowledgeTrainer {
    knowledge: Arc<dyn KnowledgeRepository>,
    training: Arc<dyn TrainingRepository>,
    cache: Arc<KnowledgeCache>,
    batch_limit: i64,
}

impl KnowledgeTrainer {
    pub fn new(
        knowledge: Arc<dyn KnowledgeRepository>,
        training: Arc<dyn TrainingRepository>,
        cache: Arc<KnowledgeCache>,
    ) -> Self {
        Self {
            knowledge,
            training,
            cache,
            batch_limit: TRAINING_BATCH_LIMIT,
        }
    }

    pub fn with_batch_limit(mut self, limit: i64) -> Self {
        self.batch_limit = limit.max(1);
        self
    }

    /// Run one cycle: learn, mark processed, decay, refresh the cache.
    #[instrument(skip(self), fields(subsystem = "ai", component = "trainer", op = "run_cycle"))]
    pub async fn run_cycle(&self) -> Result<TrainingReport> {
        let start = Instant::now();
        let mut report = TrainingReport::default();

        let batch = self.training.list_unprocessed(self.batch_limit).await?;
        debug!(batch_size = batch.len(), "Fetched unprocessed training records");

        for record in &batch {
            if record.is_unknown() {
                if let Some(entry) = learned_entry(&extract_keywords(&record.input)) {
                    match self.knowledge.insert(entry).await {
                        Ok(id) => {
                            report.learned += 1;
                            debug!(entry_id = %id, "Learned entry from unknown query");
                        }
                        Err(e) => {
                            warn!(error = %e, record_id = %record.id, "Failed to insert learned entry");
                        }
                    }
                }
            }

            if self.training.mark_processed(record.id).await? {
                report.processed += 1;
            }
        }

        let candidates = self
            .knowledge
            .list_decay_candidates(DECAY_USAGE_THRESHOLD, DECAY_FEEDBACK_THRESHOLD)
            .await?;
        for entry in candidates {
            let weight = (entry.weight - 1).max(MIN_WEIGHT);
            if weight != entry.weight {
                self.knowledge.set_weight(entry.id, weight).await?;
                report.decayed += 1;
            }
        }

        self.cache.refresh(self.knowledge.as_ref()).await?;

        info!(
            processed = report.processed,
            learned = report.learned,
            decayed = report.decayed,
            duration_ms = start.elapsed().as_millis() as u64,
            "Training cycle completed"
        );
        Ok(report)
    }
}
