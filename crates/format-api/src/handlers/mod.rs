//! Route handlers.

pub mod ai;
pub mod history;
pub mod search;
pub mod translate;

use axum::{response::IntoResponse, Json};

use crate::error::ApiError;

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Reject a missing or whitespace-only field.
pub(crate) fn require_text(value: &str, field: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest(format!("{} required", field)));
    }
    Ok(())
}
