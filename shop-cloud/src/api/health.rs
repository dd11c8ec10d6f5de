//! Health check endpoint

use axum::Json;
use serde_json::{Value, json};

use crate::util::now_millis;

/// GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": now_millis(),
    }))
}
