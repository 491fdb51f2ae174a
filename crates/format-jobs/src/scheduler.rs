//! Interval scheduler that runs each task on its own tokio task.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, timeout, Instant, MissedTickBehavior};
use tracing::{debug, error, info, instrument, warn};

use format_core::{defaults, Result};

use crate::config::SchedulerConfig;
use crate::task::{ScheduledTask, TaskContext, TaskResult};

/// Event emitted by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerEvent {
    /// Scheduler started with this many tasks.
    SchedulerStarted { tasks: usize },
    /// A task run began.
    TaskStarted { task: String, run: u64 },
    /// A task run finished successfully.
    TaskCompleted {
        task: String,
        run: u64,
        summary: Option<String>,
    },
    /// A task run reported failure.
    TaskFailed {
        task: String,
        run: u64,
        error: String,
    },
    /// A task run exceeded the configured timeout.
    TaskTimedOut { task: String, run: u64 },
    /// All task loops have exited.
    SchedulerStopped,
}

/// Handle for controlling a running scheduler.
pub struct SchedulerHandle {
    shutdown_tx: watch::Sender<bool>,
    event_tx: broadcast::Sender<SchedulerEvent>,
    loops: Vec<JoinHandle<()>>,
}

impl SchedulerHandle {
    /// Number of task loops running.
    pub fn task_count(&self) -> usize {
        self.loops.len()
    }

    /// Get a receiver for scheduler events.
    pub fn events(&self) -> broadcast::Receiver<SchedulerEvent> {
        self.event_tx.subscribe()
    }

    /// Signal every loop to stop and wait for them to exit.
    ///
    /// A run already in progress finishes (or times out) first. A scheduler
    /// with no running loops stops immediately.
    pub async fn shutdown(self) -> Result<()> {
        self.shutdown_tx.send_replace(true);

        for handle in self.loops {
            if let Err(e) = handle.await {
                error!(error = ?e, "Scheduled task loop panicked");
            }
        }

        let _ = self.event_tx.send(SchedulerEvent::SchedulerStopped);
        info!(subsystem = "jobs", component = "scheduler", "Scheduler stopped");
        Ok(())
    }
}

/// Runs registered tasks on their intervals until shut down.
pub struct Scheduler {
    config: SchedulerConfig,
    tasks: Vec<Arc<dyn ScheduledTask>>,
    event_tx: broadcast::Sender<SchedulerEvent>,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        let (event_tx, _) = broadcast::channel(defaults::EVENT_CHANNEL_CAPACITY);
        Self {
            config,
            tasks: Vec::new(),
            event_tx,
        }
    }

    /// Register a task.
    pub fn with_task<T: ScheduledTask + 'static>(mut self, task: T) -> Self {
        debug!(task = task.name(), interval_secs = task.interval().as_secs(), "Registered scheduled task");
        self.tasks.push(Arc::new(task));
        self
    }

    /// Register an already shared task.
    pub fn with_shared_task(mut self, task: Arc<dyn ScheduledTask>) -> Self {
        self.tasks.push(task);
        self
    }

    /// Get a receiver for scheduler events.
    pub fn events(&self) -> broadcast::Receiver<SchedulerEvent> {
        self.event_tx.subscribe()
    }

    /// Spawn one loop per task and return a handle for control.
    pub fn start(self) -> SchedulerHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        if !self.config.enabled {
            info!(subsystem = "jobs", component = "scheduler", "Scheduler is disabled, not starting");
            return SchedulerHandle {
                shutdown_tx,
                event_tx: self.event_tx,
                loops: Vec::new(),
            };
        }

        let loops = self
            .tasks
            .iter()
            .map(|task| {
                let task = task.clone();
                let shutdown_rx = shutdown_rx.clone();
                let event_tx = self.event_tx.clone();
                let task_timeout = self.config.task_timeout;
                tokio::spawn(async move {
                    run_loop(task, task_timeout, shutdown_rx, event_tx).await;
                })
            })
            .collect::<Vec<_>>();

        info!(
            subsystem = "jobs",
            component = "scheduler",
            task_count = loops.len(),
            "Scheduler started"
        );
        let _ = self.event_tx.send(SchedulerEvent::SchedulerStarted { tasks: loops.len() });

        SchedulerHandle {
            shutdown_tx,
            event_tx: self.event_tx,
            loops,
        }
    }
}

#[instrument(skip_all, fields(subsystem = "jobs", task = task.name()))]
async fn run_loop(
    task: Arc<dyn ScheduledTask>,
    task_timeout: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
    event_tx: broadcast::Sender<SchedulerEvent>,
) {
    let period = task.interval().max(Duration::from_millis(1));
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut run = 0u64;

    loop {
        if *shutdown_rx.borrow() {
            break;
        }

        tokio::select! {
            biased;
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    break;
                }
                continue;
            }
            _ = ticker.tick() => {}
        }

        run += 1;
        execute(task.as_ref(), run, task_timeout, &event_tx).await;
    }

    debug!("Task loop exited");
}

async fn execute(
    task: &dyn ScheduledTask,
    run: u64,
    task_timeout: Duration,
    event_tx: &broadcast::Sender<SchedulerEvent>,
) {
    let name = task.name().to_string();
    let start = Instant::now();
    let _ = event_tx.send(SchedulerEvent::TaskStarted {
        task: name.clone(),
        run,
    });

    let event = match timeout(task_timeout, task.run(TaskContext { run })).await {
        Ok(TaskResult::Success(summary)) => {
            info!(
                run,
                duration_ms = start.elapsed().as_millis() as u64,
                "Scheduled task completed"
            );
            SchedulerEvent::TaskCompleted {
                task: name,
                run,
                summary,
            }
        }
        Ok(TaskResult::Failed(error)) => {
            error!(run, error = %error, "Scheduled task failed");
            SchedulerEvent::TaskFailed {
                task: name,
                run,
                error,
            }
        }
        Err(_) => {
            warn!(
                run,
                timeout_secs = task_timeout.as_secs(),
                "Scheduled task timed out"
            );
            SchedulerEvent::TaskTimedOut { task: name, run }
        }
    };
    let _ = event_tx.send(event);
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU64, Ordering};

    enum Behavior {
        Succeed,
        Fail,
        Hang,
    }

    struct TestTask {
        interval: Duration,
        behavior: Behavior,
        runs: Arc<AtomicU64>,
    }

    impl TestTask {
        fn new(interval_secs: u64, behavior: Behavior) -> (Self, Arc<AtomicU64>) {
            let runs = Arc::new(AtomicU64::new(0));
            (
                Self {
                    interval: Duration::from_secs(interval_secs),
                    behavior,
                    runs: runs.clone(),
                },
                runs,
            )
        }
    }

    #[async_trait]
    impl ScheduledTask for TestTask {
        fn name(&self) -> &str {
            "test"
        }

        fn interval(&self) -> Duration {
            self.interval
        }

        async fn run(&self, ctx: TaskContext) -> TaskResult {
            self.runs.store(ctx.run, Ordering::SeqCst);
            match self.behavior {
                Behavior::Succeed => TaskResult::Success(Some(format!("run {}", ctx.run))),
                Behavior::Fail => TaskResult::Failed("boom".into()),
                Behavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    TaskResult::Success(None)
                }
            }
        }
    }

    async fn next_terminal(rx: &mut broadcast::Receiver<SchedulerEvent>) -> SchedulerEvent {
        loop {
            match rx.recv().await.unwrap() {
                SchedulerEvent::TaskStarted { .. } | SchedulerEvent::SchedulerStarted { .. } => {}
                other => return other,
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_run_after_one_full_interval() {
        let (task, runs) = TestTask::new(300, Behavior::Succeed);
        let scheduler = Scheduler::new(SchedulerConfig::default()).with_task(task);
        let mut events = scheduler.events();
        let started = Instant::now();
        let handle = scheduler.start();

        let event = next_terminal(&mut events).await;
        assert_eq!(
            event,
            SchedulerEvent::TaskCompleted {
                task: "test".into(),
                run: 1,
                summary: Some("run 1".into()),
            }
        );
        assert!(started.elapsed() >= Duration::from_secs(300));

        next_terminal(&mut events).await;
        assert_eq!(runs.load(Ordering::SeqCst), 2);
        assert!(started.elapsed() >= Duration::from_secs(600));

        handle.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_is_reported_and_loop_continues() {
        let (task, _) = TestTask::new(10, Behavior::Fail);
        let scheduler = Scheduler::new(SchedulerConfig::default()).with_task(task);
        let mut events = scheduler.events();
        let handle = scheduler.start();

        for run in 1..=2 {
            assert_eq!(
                next_terminal(&mut events).await,
                SchedulerEvent::TaskFailed {
                    task: "test".into(),
                    run,
                    error: "boom".into(),
                }
            );
        }
        handle.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_task_times_out() {
        let (task, _) = TestTask::new(10, Behavior::Hang);
        let config = SchedulerConfig::default().with_task_timeout(Duration::from_secs(5));
        let scheduler = Scheduler::new(config).with_task(task);
        let mut events = scheduler.events();
        let handle = scheduler.start();

        assert_eq!(
            next_terminal(&mut events).await,
            SchedulerEvent::TaskTimedOut {
                task: "test".into(),
                run: 1,
            }
        );
        handle.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_before_first_tick_runs_nothing() {
        let (task, runs) = TestTask::new(300, Behavior::Succeed);
        let scheduler = Scheduler::new(SchedulerConfig::default()).with_task(task);
        let mut events = scheduler.events();
        let handle = scheduler.start();
        assert_eq!(handle.task_count(), 1);

        handle.shutdown().await.unwrap();

        assert_eq!(runs.load(Ordering::SeqCst), 0);
        assert_eq!(
            next_terminal(&mut events).await,
            SchedulerEvent::SchedulerStopped
        );
    }

    #[tokio::test]
    async fn test_disabled_scheduler_spawns_nothing() {
        let (task, runs) = TestTask::new(1, Behavior::Succeed);
        let config = SchedulerConfig::default().with_enabled(false);
        let handle = Scheduler::new(config).with_task(task).start();
        assert_eq!(handle.task_count(), 0);

        assert!(handle.shutdown().await.is_ok());
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_shutdown_without_tasks_is_clean() {
        let scheduler = Scheduler::new(SchedulerConfig::default());
        let mut events = scheduler.events();
        let handle = scheduler.start();
        assert_eq!(handle.task_count(), 0);

        assert!(handle.shutdown().await.is_ok());
        assert_eq!(
            next_terminal(&mut events).await,
            SchedulerEvent::SchedulerStopped
        );
    }
}
