//! Per-user search and question history.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use format_core::defaults::HISTORY_LIMIT;

use crate::{error::ApiResult, AppState};

#[derive(Debug, Serialize)]
pub struct HistoryResponse<T> {
    pub history: Vec<T>,
}

pub async fn all_searches(
    State(state): State<AppState>,
) -> ApiResult<Json<HistoryResponse<format_core::SearchHistoryEntry>>> {
    let history = state.history.list_all_search().await?;
    Ok(Json(HistoryResponse { history }))
}

pub async fn user_searches(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<HistoryResponse<format_core::SearchHistoryEntry>>> {
    let history = state
        .history
        .list_search_for_user(&user_id, HISTORY_LIMIT)
        .await?;
    Ok(Json(HistoryResponse { history }))
}

pub async fn user_questions(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<HistoryResponse<format_core::QuestionHistoryEntry>>> {
    let history = state
        .history
        .list_questions_for_user(&user_id, HISTORY_LIMIT)
        .await?;
    Ok(Json(HistoryResponse { history }))
}
