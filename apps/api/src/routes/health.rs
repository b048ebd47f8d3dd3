use axum::Json;
use serde_json::{json, Value};

use crate::llm_client;

/// GET /health
/// Reports liveness along with the build version and the active model, so a
/// probe can tell which deployment answered.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "screener-api",
        "model": llm_client::MODEL,
    }))
}
