//! Background tasks registered with the scheduler.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use format_ai::KnowledgeTrainer;
use format_jobs::{ScheduledTask, TaskContext, TaskResult};

/// Runs a knowledge training cycle on each tick.
pub struct TrainingTask {
    trainer: Arc<KnowledgeTrainer>,
    interval: Duration,
}

impl TrainingTask {
    pub fn new(trainer: Arc<KnowledgeTrainer>, interval: Duration) -> Self {
        Self { trainer, interval }
    }
}

#[async_trait]
impl ScheduledTask for TrainingTask {
    fn name(&self) -> &str {
        "knowledge_training"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    async fn run(&self, ctx: TaskContext) -> TaskResult {
        match self.trainer.run_cycle().await {
            Ok(report) => {
                info!(
                    run = ctx.run,
                    processed = report.processed,
                    learned = report.learned,
                    decayed = report.decayed,
                    "Training cycle finished"
                );
                TaskResult::Success(Some(format!(
                    "processed {}, learned {}, decayed {}",
                    report.processed, report.learned, report.decayed
                )))
            }
            Err(e) => TaskResult::Failed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use format_ai::KnowledgeCache;
    use format_db::mock::{MockKnowledgeRepository, MockTrainingRepository};

    fn task(knowledge: &MockKnowledgeRepository, training: &MockTrainingRepository) -> TrainingTask {
        let trainer = KnowledgeTrainer::new(
            Arc::new(knowledge.clone()),
            Arc::new(training.clone()),
            Arc::new(KnowledgeCache::new()),
        );
        TrainingTask::new(Arc::new(trainer), Duration::from_secs(300))
    }

    #[tokio::test]
    async fn test_successful_cycle_reports_counts() {
        let knowledge = MockKnowledgeRepository::new();
        let training = MockTrainingRepository::new();
        training.push_raw("quantum entanglement basics", "unknown");

        let result = task(&knowledge, &training).run(TaskContext { run: 1 }).await;

        assert_eq!(
            result,
            TaskResult::Success(Some("processed 1, learned 1, decayed 0".into()))
        );
        assert_eq!(knowledge.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_fails_run() {
        let knowledge = MockKnowledgeRepository::new();
        let training = MockTrainingRepository::new();
        training.set_failing(true);

        let result = task(&knowledge, &training).run(TaskContext { run: 1 }).await;

        assert!(matches!(result, TaskResult::Failed(_)));
    }
}
