//! Translation provider configuration.

use std::time::Duration;

use format_core::defaults;

/// Endpoints and limits for the provider chain.
#[derive(Debug, Clone)]
pub struct TranslateConfig {
    /// Per-provider call timeout.
    pub timeout: Duration,
    pub google_url: String,
    pub deepl_url: String,
    /// Sent as `Authorization: DeepL-Auth-Key <key>` when present.
    pub deepl_api_key: Option<String>,
    pub mymemory_url: String,
    pub libretranslate_url: String,
    pub fallback_url: String,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(defaults::TRANSLATE_TIMEOUT_SECS),
            google_url: defaults::GOOGLE_TRANSLATE_URL.to_string(),
            deepl_url: defaults::DEEPL_API_URL.to_string(),
            deepl_api_key: None,
            mymemory_url: defaults::MYMEMORY_API_URL.to_string(),
            libretranslate_url: defaults::LIBRETRANSLATE_URL.to_string(),
            fallback_url: defaults::FALLBACK_TRANSLATE_URL.to_string(),
        }
    }
}

fn env_or(name: &str, default: String) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
}

impl TranslateConfig {
    /// Create config from environment variables (with defaults).
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `TRANSLATE_TIMEOUT_SECS` | `5` |
    /// | `GOOGLE_TRANSLATE_URL` | `https://translate.googleapis.com` |
    /// | `DEEPL_API_URL` | `https://api-free.deepl.com` |
    /// | `DEEPL_API_KEY` | unset |
    /// | `MYMEMORY_API_URL` | `https://api.mymemory.translated.net` |
    /// | `LIBRETRANSLATE_URL` | `https://libretranslate.de` |
    /// | `FALLBACK_TRANSLATE_URL` | `https://api.mymemory.translated.net` |
    pub fn from_env() -> Self {
        let d = Self::default();

        let timeout = std::env::var("TRANSLATE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(d.timeout);

        Self {
            timeout,
            google_url: env_or("GOOGLE_TRANSLATE_URL", d.google_url),
            deepl_url: env_or("DEEPL_API_URL", d.deepl_url),
            deepl_api_key: std::env::var("DEEPL_API_KEY")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            mymemory_url: env_or("MYMEMORY_API_URL", d.mymemory_url),
            libretranslate_url: env_or("LIBRETRANSLATE_URL", d.libretranslate_url),
            fallback_url: env_or("FALLBACK_TRANSLATE_URL", d.fallback_url),
        }
    }

    /// Route every provider to one base URL.
    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        let base = base.into();
        self.google_url = base.clone();
        self.deepl_url = base.clone();
        self.mymemory_url = base.clone();
        self.libretranslate_url = base.clone();
        self.fallback_url = base;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TranslateConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.deepl_api_key.is_none());
        assert_eq!(config.google_url, "https://translate.googleapis.com");
    }

    #[test]
    fn test_with_base_url_routes_all_providers() {
        let config = TranslateConfig::default().with_base_url("http://localhost:1234");
        for url in [
            &config.google_url,
            &config.deepl_url,
            &config.mymemory_url,
            &config.libretranslate_url,
            &config.fallback_url,
        ] {
            assert_eq!(url, "http://localhost:1234");
        }
    }
}
