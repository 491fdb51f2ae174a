//! Search client configuration.

use std::time::Duration;

use format_core::defaults;

/// Search client settings.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Endpoint base; `/html/` is appended.
    pub base_url: String,
    /// Whole-request timeout.
    pub timeout: Duration,
    /// Maximum results returned per query.
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::SEARCH_BASE_URL.to_string(),
            timeout: Duration::from_secs(defaults::SEARCH_TIMEOUT_SECS),
            max_results: defaults::SEARCH_MAX_RESULTS,
        }
    }
}

impl SearchConfig {
    /// Create config from environment variables (with defaults).
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `SEARCH_BASE_URL` | `https://html.duckduckgo.com` |
    /// | `SEARCH_TIMEOUT_SECS` | `15` |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let base_url = std::env::var("SEARCH_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.base_url);

        let timeout = std::env::var("SEARCH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        Self {
            base_url,
            timeout,
            ..defaults
        }
    }

    /// Point the client at a different endpoint (tests use a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the HTML results page.
    pub fn search_url(&self) -> String {
        format!("{}/html/", self.base_url.trim_end_matches('/'))
    }
}
