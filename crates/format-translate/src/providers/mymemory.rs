use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use format_core::{Error, Result, TranslationProvider, TranslationResult};

use super::{empty_translation, endpoint, ensure_success};

const DEFAULT_CONFIDENCE: f32 = 0.8;

/// MyMemory-compatible `/get` endpoint.
///
/// Serves both the primary MyMemory slot, whose confidence comes from the
/// response's `match` score, and the last-resort fallback slot, which
/// reports a fixed confidence.
pub struct MyMemoryProvider {
    client: Client,
    base_url: String,
    name: String,
    fixed_confidence: Option<f32>,
}

impl MyMemoryProvider {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            name: "MyMemory".to_string(),
            fixed_confidence: None,
        }
    }

    /// The last provider in the chain.
    pub fn fallback(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            name: "Fallback".to_string(),
            fixed_confidence: Some(0.75),
        }
    }
}

fn status_ok(body: &Value) -> bool {
    match body.get("responseStatus") {
        Some(Value::Number(n)) => n.as_i64() == Some(200),
        Some(Value::String(s)) => s == "200",
        _ => false,
    }
}

/// `(translatedText, match)` from a successful response.
fn extract(body: &Value) -> Option<(String, Option<f32>)> {
    if !status_ok(body) {
        return None;
    }
    let data = body.get("responseData")?;
    let text = data
        .get("translatedText")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())?;
    let score = data
        .get("match")
        .and_then(Value::as_f64)
        .map(|m| m as f32)
        .filter(|m| *m > 0.0);
    Some((text.to_string(), score))
}

#[async_trait]
impl TranslationProvider for MyMemoryProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn translate(&self, text: &str, target: &str) -> Result<TranslationResult> {
        let langpair = format!("en|{}", target);
        let response = self
            .client
            .get(endpoint(&self.base_url, "/get"))
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .send()
            .await?;
        ensure_success(&self.name, &response)?;

        let body: Value = response.json().await?;
        if !status_ok(&body) {
            return Err(Error::Provider(format!(
                "{} responseStatus was not 200",
                self.name
            )));
        }
        let (translated, score) = extract(&body).ok_or_else(|| empty_translation(&self.name))?;

        let confidence = self
            .fixed_confidence
            .or(score)
            .unwrap_or(DEFAULT_CONFIDENCE)
            .clamp(0.0, 1.0);

        Ok(TranslationResult {
            text: translated,
            source: self.name.clone(),
            confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_with_match() {
        let body = json!({
            "responseStatus": 200,
            "responseData": {"translatedText": "Bonjour", "match": 0.92}
        });
        let (text, score) = extract(&body).unwrap();
        assert_eq!(text, "Bonjour");
        assert!((score.unwrap() - 0.92).abs() < 1e-6);
    }

    #[test]
    fn test_zero_match_means_no_score() {
        let body = json!({
            "responseStatus": 200,
            "responseData": {"translatedText": "Hallo", "match": 0}
        });
        assert_eq!(extract(&body).unwrap().1, None);
    }

    #[test]
    fn test_non_200_status_rejected() {
        let body = json!({
            "responseStatus": 429,
            "responseData": {"translatedText": "QUOTA EXCEEDED"}
        });
        assert!(extract(&body).is_none());
    }

    #[test]
    fn test_string_status_accepted() {
        let body = json!({
            "responseStatus": "200",
            "responseData": {"translatedText": "Ciao"}
        });
        assert!(extract(&body).is_some());
    }
}
