//! Scheduler configuration.

use std::time::Duration;

use format_core::defaults;

/// Scheduler settings.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// When false, `start` spawns nothing.
    pub enabled: bool,
    /// Interval between knowledge training cycles.
    pub training_interval: Duration,
    /// Upper bound on a single task run.
    pub task_timeout: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            training_interval: Duration::from_secs(defaults::TRAINING_INTERVAL_SECS),
            task_timeout: Duration::from_secs(defaults::TASK_TIMEOUT_SECS),
        }
    }
}

impl SchedulerConfig {
    /// Create config from environment variables (with defaults).
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `TRAINING_ENABLED` | `true` | Run background tasks |
    /// | `TRAINING_INTERVAL_SECS` | `300` | Seconds between training cycles |
    /// | `TASK_TIMEOUT_SECS` | `120` | Per-run timeout |
    pub fn from_env() -> Self {
        let d = Self::default();

        let enabled = std::env::var("TRAINING_ENABLED")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        let training_interval = std::env::var("TRAINING_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(d.training_interval);

        let task_timeout = std::env::var("TASK_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(d.task_timeout);

        Self {
            enabled,
            training_interval,
            task_timeout,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_training_interval(mut self, interval: Duration) -> Self {
        self.training_interval = interval;
        self
    }

    pub fn with_task_timeout(mut self, timeout: Duration) -> Self {
        self.task_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SchedulerConfig::default();
        assert!(config.enabled);
        assert_eq!(config.training_interval, Duration::from_secs(300));
        assert_eq!(config.task_timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_builders() {
        let config = SchedulerConfig::default()
            .with_enabled(false)
            .with_training_interval(Duration::from_secs(5))
            .with_task_timeout(Duration::from_secs(1));
        assert!(!config.enabled);
        assert_eq!(config.training_interval, Duration::from_secs(5));
        assert_eq!(config.task_timeout, Duration::from_secs(1));
    }
}
