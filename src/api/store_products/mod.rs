//! Store-Product Placement API 模块
//!
//! Mounted under `/api/stores` by the stores module; the public
//! "which stores carry this product" route is mounted by the products
//! module.

pub mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

/// Placement routes, relative to `/api/stores`
pub fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/{store_id}/products",
            get(handler::list_by_store).post(handler::add_many),
        )
        .route(
            "/{store_id}/products/{product_id}",
            delete(handler::remove).patch(handler::toggle),
        )
}
