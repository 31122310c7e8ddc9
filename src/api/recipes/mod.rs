//! Recipe API 模块
//!
//! The per-product recipe routes are mounted by the products module; this
//! router only carries the standalone recipe-item deletion route.

pub mod handler;

use axum::{Router, routing::delete};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/recipe-items", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/{id}", delete(handler::remove_item))
}
