//! Health check endpoint

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

/// GET /health - 健康检查 (公开接口)
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
