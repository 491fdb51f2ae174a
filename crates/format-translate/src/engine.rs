//! Sequential first-success translation fan-out.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use format_core::{Error, Result, TranslationOutcome, TranslationProvider, TranslationResult};

use crate::config::TranslateConfig;
use crate::languages;
use crate::providers::{DeepLProvider, GoogleProvider, LibreTranslateProvider, MyMemoryProvider};

/// Tries providers in order and returns the first usable translation.
///
/// `translate` never fails: unsupported targets and total provider failure
/// are reported through the returned message with empty `sources`.
pub struct TranslationEngine {
    providers: Vec<Arc<dyn TranslationProvider>>,
    call_timeout: Duration,
}

impl TranslationEngine {
    /// Standard chain: Google → DeepL → MyMemory → LibreTranslate → Fallback.
    pub fn new(config: TranslateConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        let providers: Vec<Arc<dyn TranslationProvider>> = vec![
            Arc::new(GoogleProvider::new(client.clone(), config.google_url)),
            Arc::new(DeepLProvider::new(
                client.clone(),
                config.deepl_url,
                config.deepl_api_key,
            )),
            Arc::new(MyMemoryProvider::new(client.clone(), config.mymemory_url)),
            Arc::new(LibreTranslateProvider::new(
                client.clone(),
                config.libretranslate_url,
            )),
            Arc::new(MyMemoryProvider::fallback(client, config.fallback_url)),
        ];

        info!(
            subsystem = "translate",
            component = "engine",
            provider_count = providers.len(),
            timeout_secs = config.timeout.as_secs(),
            "Translation engine initialized"
        );

        Ok(Self::with_providers(providers, config.timeout))
    }

    pub fn from_env() -> Result<Self> {
        Self::new(TranslateConfig::from_env())
    }

    /// Custom provider chain, tried in the given order.
    pub fn with_providers(
        providers: Vec<Arc<dyn TranslationProvider>>,
        call_timeout: Duration,
    ) -> Self {
        Self {
            providers,
            call_timeout,
        }
    }

    /// Provider names in chain order.
    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    /// Translate `text` into `target` (any case; only the first two
    /// characters are significant).
    #[instrument(
        skip(self, text, target),
        fields(
            subsystem = "translate",
            component = "engine",
            target_lang = %target,
            text_len = text.len()
        )
    )]
    pub async fn translate(&self, text: &str, target: &str) -> TranslationOutcome {
        let code = languages::normalize(target);
        if !languages::is_supported(&code) {
            debug!("Unsupported target language");
            return TranslationOutcome {
                translation: format!(
                    "Language \"{}\" is not supported. Supported: {}",
                    target,
                    languages::supported_list()
                ),
                sources: Vec::new(),
            };
        }

        let start = Instant::now();
        let mut results: Vec<TranslationResult> = Vec::new();

        for provider in &self.providers {
            if !provider.supports(&code) {
                debug!(
                    provider = provider.name(),
                    target_lang = %code,
                    "Provider skipped for language"
                );
                continue;
            }

            match tokio::time::timeout(self.call_timeout, provider.translate(text, &code)).await {
                Ok(Ok(result)) => {
                    debug!(
                        provider = provider.name(),
                        confidence = result.confidence,
                        "Provider succeeded"
                    );
                    results.push(result);
                    break;
                }
                Ok(Err(e)) => {
                    warn!(provider = provider.name(), error = %e, "Translation provider failed");
                }
                Err(_) => {
                    warn!(
                        provider = provider.name(),
                        timeout_ms = self.call_timeout.as_millis() as u64,
                        "Translation provider timed out"
                    );
                }
            }
        }

        match pick_best(results) {
            Some(best) => {
                info!(
                    provider = %best.source,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Translation completed"
                );
                TranslationOutcome {
                    translation: best.text,
                    sources: vec![best.source],
                }
            }
            None => {
                warn!(
                    target_lang = %code,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "All translation providers failed"
                );
                TranslationOutcome {
                    translation: format!(
                        "Unable to translate to \"{}\". Please try again later.",
                        target
                    ),
                    sources: Vec::new(),
                }
            }
        }
    }
}

/// Highest confidence wins; earlier results win ties.
///
/// The loop above stops at the first success, so this only ever sees one
/// result. It stays so the chain can be switched to collect-all later.
fn pick_best(results: Vec<TranslationResult>) -> Option<TranslationResult> {
    results.into_iter().reduce(|best, next| {
        if next.confidence > best.confidence {
            next
        } else {
            best
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted provider that counts its calls.
    struct ScriptedProvider {
        name: &'static str,
        answer: Option<&'static str>,
        only: Option<&'static str>,
        delay: Option<Duration>,
        calls: AtomicUsize,
    }

    impl ScriptedProvider {
        fn ok(name: &'static str, answer: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                answer: Some(answer),
                only: None,
                delay: None,
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(name: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                answer: None,
                only: None,
                delay: None,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TranslationProvider for ScriptedProvider {
        fn name(&self) -> &str {
            self.name
        }

        fn supports(&self, target: &str) -> bool {
            self.only.map_or(true, |only| only == target)
        }

        async fn translate(&self, _text: &str, _target: &str) -> Result<TranslationResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            match self.answer {
                Some(text) => Ok(TranslationResult {
                    text: text.to_string(),
                    source: self.name.to_string(),
                    confidence: 0.5,
                }),
                None => Err(Error::Provider(format!("{} down", self.name))),
            }
        }
    }

    fn engine(providers: Vec<Arc<ScriptedProvider>>) -> TranslationEngine {
        let chain = providers
            .into_iter()
            .map(|p| p as Arc<dyn TranslationProvider>)
            .collect();
        TranslationEngine::with_providers(chain, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_first_success_short_circuits() {
        let first = ScriptedProvider::ok("First", "hola");
        let second = ScriptedProvider::ok("Second", "buenas");
        let e = engine(vec![first.clone(), second.clone()]);

        let out = e.translate("hello", "es").await;

        assert_eq!(out.translation, "hola");
        assert_eq!(out.sources, vec!["First".to_string()]);
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 0);
    }

    #[tokio::test]
    async fn test_failures_fall_through_in_order() {
        let a = ScriptedProvider::failing("A");
        let b = ScriptedProvider::failing("B");
        let c = ScriptedProvider::ok("C", "bonjour");
        let d = ScriptedProvider::ok("D", "salut");
        let e = engine(vec![a.clone(), b.clone(), c.clone(), d.clone()]);

        let out = e.translate("hello", "fr").await;

        assert_eq!(out.translation, "bonjour");
        assert_eq!(out.sources, vec!["C".to_string()]);
        assert_eq!((a.calls(), b.calls(), c.calls(), d.calls()), (1, 1, 1, 0));
    }

    #[tokio::test]
    async fn test_unsupported_language_calls_nothing() {
        let p = ScriptedProvider::ok("P", "x");
        let e = engine(vec![p.clone()]);

        let out = e.translate("hello", "xx").await;

        assert!(out.sources.is_empty());
        assert!(out.translation.contains("\"xx\""));
        assert!(out.translation.contains("Supported: en, ar"));
        assert_eq!(p.calls(), 0);
    }

    #[tokio::test]
    async fn test_target_is_normalized() {
        let p = ScriptedProvider::ok("P", "olá");
        let out = engine(vec![p]).translate("hello", "PT-br").await;
        assert_eq!(out.translation, "olá");
    }

    #[tokio::test]
    async fn test_all_fail_message() {
        let e = engine(vec![
            ScriptedProvider::failing("A"),
            ScriptedProvider::failing("B"),
        ]);
        let out = e.translate("hello", "de").await;
        assert_eq!(
            out.translation,
            "Unable to translate to \"de\". Please try again later."
        );
        assert!(out.sources.is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_provider_is_skipped_without_call() {
        let picky = Arc::new(ScriptedProvider {
            name: "Picky",
            answer: Some("never"),
            only: Some("de"),
            delay: None,
            calls: AtomicUsize::new(0),
        });
        let general = ScriptedProvider::ok("General", "مرحبا");
        let e = engine(vec![picky.clone(), general]);

        let out = e.translate("hello", "ar").await;

        assert_eq!(out.sources, vec!["General".to_string()]);
        assert_eq!(picky.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_provider_times_out() {
        let slow = Arc::new(ScriptedProvider {
            name: "Slow",
            answer: Some("late"),
            only: None,
            delay: Some(Duration::from_secs(30)),
            calls: AtomicUsize::new(0),
        });
        let fast = ScriptedProvider::ok("Fast", "pronto");
        let chain: Vec<Arc<dyn TranslationProvider>> = vec![
            slow as Arc<dyn TranslationProvider>,
            fast as Arc<dyn TranslationProvider>,
        ];
        let e = TranslationEngine::with_providers(chain, Duration::from_secs(5));

        let out = e.translate("hello", "it").await;

        assert_eq!(out.sources, vec!["Fast".to_string()]);
    }

    #[test]
    fn test_pick_best_prefers_confidence_then_order() {
        let r = |text: &str, confidence: f32| TranslationResult {
            text: text.to_string(),
            source: text.to_string(),
            confidence,
        };
        assert!(pick_best(vec![]).is_none());
        assert_eq!(
            pick_best(vec![r("a", 0.8), r("b", 0.9), r("c", 0.9)]).unwrap().text,
            "b"
        );
    }

    #[test]
    fn test_standard_chain_order() {
        let e = TranslationEngine::new(TranslateConfig::default()).unwrap();
        assert_eq!(
            e.provider_names(),
            vec!["Google Translate", "DeepL", "MyMemory", "LibreTranslate", "Fallback"]
        );
    }
}
