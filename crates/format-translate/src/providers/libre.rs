use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use format_core::{Result, TranslationProvider, TranslationResult};

use super::{empty_translation, endpoint, ensure_success};

const NAME: &str = "LibreTranslate";
const CONFIDENCE: f32 = 0.85;

#[derive(Debug, Serialize)]
struct LibreRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LibreResponse {
    #[serde(default)]
    translated_text: Option<String>,
}

/// Public LibreTranslate instance.
pub struct LibreTranslateProvider {
    client: Client,
    base_url: String,
}

impl LibreTranslateProvider {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl TranslationProvider for LibreTranslateProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn translate(&self, text: &str, target: &str) -> Result<TranslationResult> {
        let response = self
            .client
            .post(endpoint(&self.base_url, "/translate"))
            .json(&LibreRequest {
                q: text,
                source: "auto",
                target,
            })
            .send()
            .await?;
        ensure_success(NAME, &response)?;

        let body: LibreResponse = response.json().await?;
        let text = body
            .translated_text
            .filter(|t| !t.is_empty())
            .ok_or_else(|| empty_translation(NAME))?;

        Ok(TranslationResult {
            text,
            source: NAME.to_string(),
            confidence: CONFIDENCE,
        })
    }
}
