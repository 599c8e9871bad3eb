//! Axum route handlers for the Recommendation API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::assessment::RecommendResponse;
use crate::recommendation::pipeline::recommend;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    /// Free text or text containing a job-posting URL.
    /// Older clients send the same value as `description`.
    #[serde(alias = "description")]
    pub query: String,
}

/// POST /recommend
///
/// Returns 200 with a possibly empty list whenever the pipeline completes, including when the
/// model's output could not be decoded.
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, AppError> {
    let query = request.query.trim();
    if query.is_empty() {
        return Err(AppError::Validation("query cannot be empty".to_string()));
    }

    let recommended_assessments = recommend(&state, query).await?;

    Ok(Json(RecommendResponse {
        recommended_assessments,
    }))
}
