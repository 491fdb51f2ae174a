use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde_json::Value;

use format_core::{defaults, Error, Result, TranslationProvider, TranslationResult};

use super::{empty_translation, endpoint, ensure_success};

const NAME: &str = "Google Translate";
const CONFIDENCE: f32 = 0.95;

/// Unauthenticated `gtx` client endpoint.
pub struct GoogleProvider {
    client: Client,
    base_url: String,
}

impl GoogleProvider {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

/// Concatenate the first element of every segment in `body[0]`.
fn extract_text(body: &Value) -> Result<String> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| Error::Provider(format!("{}: unexpected response shape", NAME)))?;

    let text: String = segments
        .iter()
        .filter_map(|segment| match segment {
            Value::Array(parts) => parts.first().and_then(Value::as_str),
            other => other.as_str(),
        })
        .collect();

    if text.is_empty() {
        return Err(empty_translation(NAME));
    }
    Ok(text)
}

#[async_trait]
impl TranslationProvider for GoogleProvider {
    fn name(&self) -> &str {
        NAME
    }

    async fn translate(&self, text: &str, target: &str) -> Result<TranslationResult> {
        let response = self
            .client
            .get(endpoint(&self.base_url, "/translate_a/single"))
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .header(USER_AGENT, defaults::BROWSER_USER_AGENT)
            .send()
            .await?;
        ensure_success(NAME, &response)?;

        let body: Value = response.json().await?;
        Ok(TranslationResult {
            text: extract_text(&body)?,
            source: NAME.to_string(),
            confidence: CONFIDENCE,
        })
    }
}
