//! Query answering over the knowledge store with live search first.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use format_core::defaults::{FACTUAL_TRIGGERS, KNOWLEDGE_WEIGHT, PLACEHOLDER_RESULT_TITLES};
use format_core::{
    KnowledgeRepository, NewKnowledgeEntry, Result, SearchResult, TrainingCategory,
    TrainingRepository, WebSearch,
};

use crate::cache::KnowledgeCache;
use crate::generator::{self, ContentType};
use crate::matcher::{best_match, CompiledEntry};
use crate::responses;
use crate::seed::base_knowledge;

/// Whether a lower-cased query looks like a factual question.
pub fn has_factual_intent(lower_query: &str) -> bool {
    FACTUAL_TRIGGERS.iter().any(|t| lower_query.contains(t))
}

/// Search hits usable as a direct answer.
pub fn usable_result(result: &SearchResult) -> bool {
    !result.description.trim().is_empty()
        && !PLACEHOLDER_RESULT_TITLES
            .iter()
            .any(|p| result.title.contains(p))
}

/// Answers free-text queries.
///
/// Factual questions go to live search first. Everything else is matched
/// against the knowledge cache, and anything unmatched gets a creative
/// fallback while being logged for the background trainer.
pub struct QueryAssistant {
    knowledge: Arc<dyn KnowledgeRepository>,
    training: Arc<dyn TrainingRepository>,
    search: Arc<dyn WebSearch>,
    cache: Arc<KnowledgeCache>,
}

impl QueryAssistant {
    pub fn new(
        knowledge: Arc<dyn KnowledgeRepository>,
        training: Arc<dyn TrainingRepository>,
        search: Arc<dyn WebSearch>,
        cache: Arc<KnowledgeCache>,
    ) -> Self {
        Self {
            knowledge,
            training,
            search,
            cache,
        }
    }

    pub fn cache(&self) -> &Arc<KnowledgeCache> {
        &self.cache
    }

    /// Seed an empty store with the base set, then load the cache.
    ///
    /// Returns the number of seeded entries (zero if the store had data).
    #[instrument(skip(self), fields(subsystem = "ai", component = "assistant", op = "initialize"))]
    pub async fn initialize(&self) -> Result<usize> {
        let mut seeded = 0;
        if self.knowledge.count().await? == 0 {
            for entry in base_knowledge() {
                self.knowledge.insert(entry).await?;
                seeded += 1;
            }
            info!(seeded, "Knowledge store seeded with base knowledge");
        }

        let loaded = self.cache.refresh(self.knowledge.as_ref()).await?;
        info!(entry_count = loaded, "Assistant initialized");
        Ok(seeded)
    }

    /// Answer a query. Never fails; store trouble yields a creative fallback.
    #[instrument(skip(self), fields(subsystem = "ai", component = "assistant", op = "process_query"))]
    pub async fn process_query(&self, query: &str) -> String {
        let lower = query.trim().to_lowercase();

        if has_factual_intent(&lower) {
            let results = self.search.search(query).await;
            if let Some(hit) = results.iter().find(|r| usable_result(r)) {
                debug!(url = %hit.url, "Answered from live search");
                return responses::live_search_answer(query, &hit.description, &hit.url);
            }
            debug!(result_count = results.len(), "Live search gave no usable result");
        }

        let entries = match self.entries().await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "Knowledge store unavailable, using creative fallback");
                return self.creative(query);
            }
        };

        let Some((winner, score)) = best_match(&entries, &lower) else {
            self.log_training(query, TrainingCategory::Unknown, None)
                .await;
            return self.creative(query);
        };
        debug!(
            entry_id = %winner.entry.id,
            category = %winner.entry.category,
            score,
            "Knowledge match"
        );

        if let Err(e) = self.knowledge.increment_usage(winner.entry.id).await {
            warn!(error = %e, entry_id = %winner.entry.id, "Usage update failed, using creative fallback");
            return self.creative(query);
        }
        self.cache.record_usage(winner.entry.id).await;

        self.log_training(query, TrainingCategory::Query, Some(&winner.entry.response))
            .await;
        responses::enhance(&winner.entry.response, query)
    }

    /// Record a positive or negative signal for an entry.
    #[instrument(skip(self), fields(subsystem = "ai", component = "assistant", op = "feedback"))]
    pub async fn learn_from_feedback(&self, entry_id: Uuid, positive: bool) -> Result<()> {
        let delta = if positive { 1 } else { -1 };
        self.knowledge.adjust_feedback(entry_id, delta).await?;
        self.cache.refresh(self.knowledge.as_ref()).await?;
        debug!(delta, "Feedback recorded");
        Ok(())
    }

    /// Insert a new knowledge entry (`weight` defaults to 5).
    #[instrument(skip(self, response), fields(subsystem = "ai", component = "assistant", op = "add_knowledge"))]
    pub async fn add_knowledge(
        &self,
        category: &str,
        pattern: &str,
        response: &str,
        weight: Option<i32>,
    ) -> Result<Uuid> {
        let entry = NewKnowledgeEntry::new(
            category,
            pattern,
            response,
            weight.unwrap_or(KNOWLEDGE_WEIGHT),
        );
        entry.validate()?;

        let id = self.knowledge.insert(entry).await?;
        self.cache.refresh(self.knowledge.as_ref()).await?;
        info!(entry_id = %id, "Knowledge added");
        Ok(id)
    }

    /// Render templated content for `prompt` and log it as a generation record.
    #[instrument(skip(self), fields(subsystem = "ai", component = "assistant", op = "generate"))]
    pub async fn generate_content(&self, prompt: &str, kind: ContentType) -> String {
        let content = generator::generate(kind, prompt);
        let input = format!("generate:{}:{}", kind, prompt);
        self.log_training(&input, TrainingCategory::Generation, Some(&content))
            .await;
        debug!(kind = %kind, "Content generated");
        content
    }

    /// The cache snapshot, loading it on first use.
    async fn entries(&self) -> Result<Arc<Vec<CompiledEntry>>> {
        if !self.cache.is_loaded().await {
            self.cache.refresh(self.knowledge.as_ref()).await?;
        }
        Ok(self.cache.snapshot().await)
    }

    async fn log_training(&self, input: &str, category: TrainingCategory, output: Option<&str>) {
        if let Err(e) = self.training.insert(input, category, output).await {
            warn!(error = %e, category = %category, "Failed to log training record");
        }
    }

    fn creative(&self, query: &str) -> String {
        responses::creative_response(&mut rand::thread_rng(), query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use format_core::{Error, KnowledgeEntry, NoOpSearch, SearchCategory};
    use format_db::mock::{MockKnowledgeRepository, MockTrainingRepository};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedSearch {
        results: Vec<SearchResult>,
        calls: AtomicUsize,
    }

    impl FixedSearch {
        fn new(results: Vec<SearchResult>) -> Arc<Self> {
            Arc::new(Self {
                results,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl WebSearch for FixedSearch {
        async fn search(&self, _query: &str) -> Vec<SearchResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.results.clone()
        }
    }

    fn hit(title: &str, description: &str, url: &str) -> SearchResult {
        SearchResult {
            title: title.to_string(),
            url: url.to_string(),
            description: description.to_string(),
            category: SearchCategory::Web,
        }
    }

    fn stored(pattern: &str, response: &str, weight: i32) -> KnowledgeEntry {
        KnowledgeEntry {
            id: Uuid::now_v7(),
            category: "test".to_string(),
            pattern: pattern.to_string(),
            response: response.to_string(),
            weight,
            usage_count: 0,
            feedback: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    struct Fixture {
        knowledge: MockKnowledgeRepository,
        training: MockTrainingRepository,
        assistant: QueryAssistant,
    }

    fn fixture(entries: Vec<KnowledgeEntry>, search: Arc<dyn WebSearch>) -> Fixture {
        let knowledge = MockKnowledgeRepository::with_entries(entries);
        let training = MockTrainingRepository::new();
        let assistant = QueryAssistant::new(
            Arc::new(knowledge.clone()),
            Arc::new(training.clone()),
            search,
            Arc::new(KnowledgeCache::new()),
        );
        Fixture {
            knowledge,
            training,
            assistant,
        }
    }

    fn is_creative(answer: &str, query: &str) -> bool {
        (0..responses::CREATIVE_TEMPLATE_COUNT)
            .any(|i| responses::creative_template(i, query) == answer)
    }

    #[tokio::test]
    async fn test_live_search_short_circuits_knowledge() {
        let search = FixedSearch::new(vec![hit(
            "Speed of light",
            "299,792,458 m/s",
            "https://en.wikipedia.org/wiki/Speed_of_light",
        )]);
        let f = fixture(vec![stored("light", "Light!", 9)], search.clone());

        let answer = f.assistant.process_query("What is the speed of light?").await;

        assert!(answer.starts_with("Live Search Result for \"What is the speed of light?\""));
        assert!(answer.ends_with("Source: https://en.wikipedia.org/wiki/Speed_of_light"));
        assert_eq!(search.calls.load(Ordering::SeqCst), 1);
        assert_eq!(f.knowledge.call_count(), 0);
        assert!(f.training.records().is_empty());
    }

    #[tokio::test]
    async fn test_placeholder_and_empty_results_are_skipped() {
        let search = FixedSearch::new(vec![
            hit("No Results found", "nothing", "https://x"),
            hit("Search Completed", "done", "https://y"),
            hit("Real", "", "https://z"),
        ]);
        let f = fixture(vec![stored("speed", "Fast things.", 5)], search);

        let answer = f.assistant.process_query("what is speed").await;
        assert_eq!(answer, "Fast things.");
    }

    #[tokio::test]
    async fn test_no_trigger_skips_search_and_matches_knowledge() {
        let search = FixedSearch::new(vec![hit("t", "d", "https://u")]);
        let entry = stored("python", "Python is great.", 8);
        let id = entry.id;
        let f = fixture(vec![entry], search.clone());

        let answer = f.assistant.process_query("I love Python").await;

        assert_eq!(answer, "Python is great.");
        assert_eq!(search.calls.load(Ordering::SeqCst), 0);
        assert_eq!(f.knowledge.entry(id).unwrap().usage_count, 1);

        let records = f.training.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].category, "query");
        assert_eq!(records[0].actual_output.as_deref(), Some("Python is great."));

        let cached = f.assistant.cache().snapshot().await;
        assert_eq!(cached[0].entry.usage_count, 1);
    }

    #[tokio::test]
    async fn test_highest_score_entry_wins() {
        let f = fixture(
            vec![
                stored("rust", "Weighted answer.", 4),
                stored("rust", "Heavier answer.", 6),
            ],
            Arc::new(NoOpSearch),
        );
        assert_eq!(f.assistant.process_query("rust").await, "Heavier answer.");
    }

    #[tokio::test]
    async fn test_response_enhancements() {
        let f = fixture(vec![stored("python", "Python.", 8)], Arc::new(NoOpSearch));
        let answer = f.assistant.process_query("python help?").await;
        assert_eq!(
            answer,
            "Python.\n\nFeel free to ask follow-up questions!\n\n💡 Tip: Use /help to see all available commands."
        );
    }

    #[tokio::test]
    async fn test_unmatched_query_gets_creative_fallback_and_is_logged() {
        let f = fixture(vec![stored("python", "Python.", 8)], Arc::new(NoOpSearch));
        let query = "What is the speed of light?";

        let answer = f.assistant.process_query(query).await;

        assert!(is_creative(&answer, query));
        assert!(answer.contains(query));
        let records = f.training.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].category, "unknown");
        assert!(records[0].actual_output.is_none());
    }

    #[tokio::test]
    async fn test_seeded_store_has_no_catch_all() {
        let f = fixture(vec![], Arc::new(NoOpSearch));
        assert_eq!(f.assistant.initialize().await.unwrap(), 25);

        let query = "What is the speed of light?";
        let answer = f.assistant.process_query(query).await;
        assert!(is_creative(&answer, query));
    }

    #[tokio::test]
    async fn test_initialize_skips_seeding_non_empty_store() {
        let f = fixture(vec![stored("x", "y", 1)], Arc::new(NoOpSearch));
        assert_eq!(f.assistant.initialize().await.unwrap(), 0);
        assert_eq!(f.assistant.cache().len().await, 1);
    }

    #[tokio::test]
    async fn test_store_failure_degrades_to_creative() {
        let f = fixture(vec![stored("python", "Python.", 8)], Arc::new(NoOpSearch));
        f.knowledge.set_failing(true);

        let answer = f.assistant.process_query("python").await;
        assert!(is_creative(&answer, "python"));
    }

    #[tokio::test]
    async fn test_usage_update_failure_degrades_to_creative() {
        let f = fixture(vec![stored("python", "Python.", 8)], Arc::new(NoOpSearch));
        f.assistant.cache().refresh(&f.knowledge).await.unwrap();
        f.knowledge.set_failing(true);

        let answer = f.assistant.process_query("python").await;
        assert!(is_creative(&answer, "python"));
    }

    #[tokio::test]
    async fn test_training_log_failure_is_ignored() {
        let f = fixture(vec![stored("python", "Python.", 8)], Arc::new(NoOpSearch));
        f.training.set_failing(true);
        assert_eq!(f.assistant.process_query("python").await, "Python.");
    }

    #[tokio::test]
    async fn test_feedback_adjusts_and_refreshes() {
        let entry = stored("python", "Python.", 8);
        let id = entry.id;
        let f = fixture(vec![entry], Arc::new(NoOpSearch));

        f.assistant.learn_from_feedback(id, true).await.unwrap();
        f.assistant.learn_from_feedback(id, true).await.unwrap();
        f.assistant.learn_from_feedback(id, false).await.unwrap();

        assert_eq!(f.knowledge.entry(id).unwrap().feedback, 1);
        assert_eq!(f.assistant.cache().snapshot().await[0].entry.feedback, 1);
    }

    #[tokio::test]
    async fn test_feedback_unknown_entry() {
        let f = fixture(vec![], Arc::new(NoOpSearch));
        let err = f
            .assistant
            .learn_from_feedback(Uuid::new_v4(), true)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_add_knowledge_defaults_and_validation() {
        let f = fixture(vec![], Arc::new(NoOpSearch));

        let id = f
            .assistant
            .add_knowledge("tools", "cargo|crate", "Cargo builds Rust.", None)
            .await
            .unwrap();
        assert_eq!(f.knowledge.entry(id).unwrap().weight, 5);
        assert_eq!(f.assistant.process_query("cargo").await, "Cargo builds Rust.");

        let err = f
            .assistant
            .add_knowledge("tools", "x", "y", Some(-1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(f
            .assistant
            .add_knowledge("", "x", "y", None)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_generate_content_is_logged_as_generation() {
        let f = fixture(vec![], Arc::new(NoOpSearch));

        let content = f
            .assistant
            .generate_content("weekly update", ContentType::Email)
            .await;

        assert!(content.starts_with("**Subject: weekly update**"));
        let records = f.training.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].input, "generate:email:weekly update");
        assert_eq!(records[0].category, "generation");
        assert_eq!(records[0].actual_output.as_deref(), Some(content.as_str()));
        assert!(!records[0].is_unknown());
    }

    #[tokio::test]
    async fn test_generate_content_survives_training_log_failure() {
        let f = fixture(vec![], Arc::new(NoOpSearch));
        f.training.set_failing(true);

        let content = f
            .assistant
            .generate_content("gardening", ContentType::General)
            .await;

        assert!(content.starts_with("## Gardening\n"));
        assert!(f.training.records().is_empty());
    }
}
