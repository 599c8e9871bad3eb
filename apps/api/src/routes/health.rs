use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// The process only serves once the catalog and index are loaded, so this is always healthy.
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
