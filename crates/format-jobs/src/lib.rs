//! # format-jobs
//!
//! Interval task scheduling for the FormAT assistant.
//!
//! Each registered [`ScheduledTask`] runs on its own tokio task with an
//! interval ticker. Missed ticks are delayed rather than bursted, the first
//! run happens one full interval after start, and every run is bounded by a
//! timeout. Lifecycle events are published on a broadcast channel.
//!
//! ## Example
//!
//! ```ignore
//! use format_jobs::{Scheduler, SchedulerConfig};
//!
//! let handle = Scheduler::new(SchedulerConfig::from_env())
//!     .with_task(TrainingTask::new(trainer, interval))
//!     .start();
//!
//! let mut events = handle.events();
//! tokio::spawn(async move {
//!     while let Ok(event) = events.recv().await {
//!         println!("Event: {:?}", event);
//!     }
//! });
//!
//! handle.shutdown().await?;
//! ```

pub mod config;
pub mod scheduler;
pub mod task;

pub use config::SchedulerConfig;
pub use scheduler::{Scheduler, SchedulerEvent, SchedulerHandle};
pub use task::{ScheduledTask, TaskContext, TaskResult};
