use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::Deserialize;

use format_core::{Error, Result, TranslationProvider, TranslationResult};

use super::{empty_translation, endpoint, ensure_success};
use crate::languages::deepl_code;

const NAME: &str = "DeepL";
const CONFIDENCE: f32 = 0.96;

#[derive(Debug, Deserialize)]
struct DeepLResponse {
    #[serde(default)]
    translations: Vec<DeepLTranslation>,
}

#[derive(Debug, Deserialize)]
struct DeepLTranslation {
    #[serde(default)]
    text: String,
}

/// DeepL free-tier form API. Only languages with a DeepL code are attempted.
pub struct DeepLProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl DeepLProvider {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }
}

#[async_trait]
impl TranslationProvider for DeepLProvider {
    fn name(&self) -> &str {
        NAME
    }

    fn supports(&self, target: &str) -> bool {
        deepl_code(target).is_some()
    }

    async fn translate(&self, text: &str, target: &str) -> Result<TranslationResult> {
        let target_lang = deepl_code(target)
            .ok_or_else(|| Error::Provider(format!("{} does not support {}", NAME, target)))?;

        let mut request = self
            .client
            .post(endpoint(&self.base_url, "/v2/translate"))
            .form(&[("text", text), ("target_lang", target_lang)]);
        if let Some(key) = &self.api_key {
            request = request.header(AUTHORIZATION, format!("DeepL-Auth-Key {}", key));
        }

        let response = request.send().await?;
        ensure_success(NAME, &response)?;

        let body: DeepLResponse = response.json().await?;
        let text = body
            .translations
            .into_iter()
            .next()
            .map(|t| t.text)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| empty_translation(NAME))?;

        Ok(TranslationResult {
            text,
            source: NAME.to_string(),
            confidence: CONFIDENCE,
        })
    }
}
