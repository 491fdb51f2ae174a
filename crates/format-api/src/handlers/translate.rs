use axum::{extract::State, Json};
use serde::Deserialize;

use format_core::TranslationOutcome;

use super::require_text;
use crate::{error::ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_target")]
    pub to: String,
}

fn default_target() -> String {
    "en".to_string()
}

pub async fn translate(
    State(state): State<AppState>,
    Json(body): Json<TranslateRequest>,
) -> ApiResult<Json<TranslationOutcome>> {
    require_text(&body.text, "Text")?;
    Ok(Json(state.translator.translate(&body.text, &body.to).await))
}
