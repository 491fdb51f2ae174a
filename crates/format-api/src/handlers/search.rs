//! Live web search.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use format_core::{defaults::SEARCH_MAX_RESULTS, NewSearchHistory, SearchResult};

use super::require_text;
use crate::{error::ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// `Searched: "<query>" - Found <n> results about <first word>`
pub fn search_summary(query: &str, count: usize) -> String {
    let first_word = query.split(' ').next().unwrap_or_default();
    format!(
        "Searched: \"{}\" - Found {} results about {}",
        query, count, first_word
    )
}

async fn run_search(state: &AppState, query: &str) -> Vec<SearchResult> {
    let mut results = state.search.search(query).await;
    results.truncate(SEARCH_MAX_RESULTS);
    debug!(result_count = results.len(), "Search finished");
    results
}

pub async fn search(
    State(state): State<AppState>,
    Json(body): Json<SearchRequest>,
) -> ApiResult<Json<SearchResponse>> {
    require_text(&body.query, "Query")?;
    let results = run_search(&state, &body.query).await;
    Ok(Json(SearchResponse {
        results,
        summary: None,
    }))
}

pub async fn search_with_history(
    State(state): State<AppState>,
    Json(body): Json<SearchRequest>,
) -> ApiResult<Json<SearchResponse>> {
    require_text(&body.query, "Query")?;
    let results = run_search(&state, &body.query).await;
    let summary = search_summary(&body.query, results.len());

    if let Some(user_id) = body.user_id.filter(|u| !u.is_empty()) {
        state
            .history
            .insert_search(NewSearchHistory {
                user_id,
                query: body.query,
                summary: summary.clone(),
                results: results.clone(),
            })
            .await?;
    }

    Ok(Json(SearchResponse {
        results,
        summary: Some(summary),
    }))
}
