//! Question answering and knowledge management.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use format_ai::ContentType;
use format_core::{defaults::QUESTION_SUMMARY_CHARS, NewQuestionHistory};

use super::require_text;
use crate::{error::ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: String,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

/// `Q: <first 100 chars>...`
pub fn question_summary(question: &str) -> String {
    let head: String = question.chars().take(QUESTION_SUMMARY_CHARS).collect();
    format!("Q: {}...", head)
}

pub async fn ask(
    State(state): State<AppState>,
    Json(body): Json<AskRequest>,
) -> ApiResult<Json<AskResponse>> {
    require_text(&body.question, "Question")?;

    let answer = state.assistant.process_query(&body.question).await;

    if let Some(user_id) = body.user_id.filter(|u| !u.is_empty()) {
        let id = state
            .history
            .insert_question(NewQuestionHistory {
                user_id,
                summary: question_summary(&body.question),
                question: body.question,
                answer: answer.clone(),
            })
            .await?;
        debug!(history_id = %id, "Question history recorded");
    }

    Ok(Json(AskResponse { answer }))
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,
    /// blog, code, email, social, story or general; anything else is general.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub content: String,
    /// The content type actually rendered.
    #[serde(rename = "type")]
    pub kind: String,
}

pub async fn generate(
    State(state): State<AppState>,
    Json(body): Json<GenerateRequest>,
) -> ApiResult<Json<GenerateResponse>> {
    require_text(&body.prompt, "Prompt")?;

    let kind = body
        .kind
        .as_deref()
        .map(ContentType::from_name)
        .unwrap_or_default();
    let content = state.assistant.generate_content(&body.prompt, kind).await;

    Ok(Json(GenerateResponse {
        content,
        kind: kind.to_string(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct AddKnowledgeRequest {
    pub category: String,
    pub pattern: String,
    pub response: String,
    pub weight: Option<i32>,
}

pub async fn add_knowledge(
    State(state): State<AppState>,
    Json(body): Json<AddKnowledgeRequest>,
) -> ApiResult<impl IntoResponse> {
    let id = state
        .assistant
        .add_knowledge(&body.category, &body.pattern, &body.response, body.weight)
        .await?;

    Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": id }))))
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub entry_id: Uuid,
    pub positive: bool,
}

pub async fn feedback(
    State(state): State<AppState>,
    Json(body): Json<FeedbackRequest>,
) -> ApiResult<StatusCode> {
    state
        .assistant
        .learn_from_feedback(body.entry_id, body.positive)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
