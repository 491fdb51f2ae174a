//! The unit of scheduled work.

use std::time::Duration;

use async_trait::async_trait;

/// Context passed to each run of a task.
#[derive(Debug, Clone, Copy)]
pub struct TaskContext {
    /// 1-based run counter for this task.
    pub run: u64,
}

/// Outcome of one task run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    /// Completed, with an optional human-readable summary.
    Success(Option<String>),
    /// Failed with an error message. The task still runs on the next tick.
    Failed(String),
}

/// A named handler the scheduler invokes on a fixed interval.
///
/// The first run happens one full interval after the scheduler starts.
#[async_trait]
pub trait ScheduledTask: Send + Sync {
    fn name(&self) -> &str;

    fn interval(&self) -> Duration;

    async fn run(&self, ctx: TaskContext) -> TaskResult;
}
