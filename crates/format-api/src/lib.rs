//! # format-api
//!
//! HTTP surface of the FormAT assistant: question answering, web search
//! with per-user history, translation, and knowledge management.
//!
//! [`router`] builds the full route table over an [`AppState`], so tests can
//! drive it in-process with mock repositories.

pub mod error;
pub mod handlers;
pub mod tasks;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use format_ai::QueryAssistant;
use format_core::{HistoryRepository, WebSearch};
use format_translate::TranslationEngine;

pub use error::{ApiError, ApiResult};
pub use tasks::TrainingTask;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<QueryAssistant>,
    pub search: Arc<dyn WebSearch>,
    pub translator: Arc<TranslationEngine>,
    pub history: Arc<dyn HistoryRepository>,
}

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Build the route table with tracing and request-id middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/ask", post(handlers::ai::ask))
        .route("/api/ai/knowledge", post(handlers::ai::add_knowledge))
        .route("/api/ai/feedback", post(handlers::ai::feedback))
        .route("/api/generate", post(handlers::ai::generate))
        .route("/api/search", post(handlers::search::search))
        .route(
            "/api/search-with-history",
            post(handlers::search::search_with_history),
        )
        .route("/api/history/search/all", get(handlers::history::all_searches))
        .route(
            "/api/history/search/:user_id",
            get(handlers::history::user_searches),
        )
        .route(
            "/api/history/questions/:user_id",
            get(handlers::history::user_questions),
        )
        .route("/api/translate", post(handlers::translate::translate))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .with_state(state)
}

/// Parse a comma-separated origin list, dropping invalid entries.
///
/// Returns `None` for an empty value or `*`, meaning any origin.
pub fn parse_allowed_origins(raw: &str) -> Option<Vec<HeaderValue>> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "*" {
        return None;
    }

    let origins = raw
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect::<Vec<_>>();

    (!origins.is_empty()).then_some(origins)
}

/// CORS layer for `CORS_ALLOWED_ORIGINS` (unset means any origin).
pub fn cors_layer(allowed: Option<&str>) -> CorsLayer {
    let origin = match allowed.and_then(parse_allowed_origins) {
        Some(list) => AllowOrigin::list(list),
        None => AllowOrigin::from(Any),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(std::time::Duration::from_secs(3600))
}
