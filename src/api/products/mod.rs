//! Product API 模块

pub mod form;
pub mod handler;

use axum::{
    Router,
    routing::get,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        // Which active stores carry this product
        .route(
            "/{id}/stores",
            get(crate::api::store_products::handler::stores_for_product),
        )
        // Bill of materials
        .route(
            "/{id}/recipe",
            get(crate::api::recipes::handler::list_for_product)
                .post(crate::api::recipes::handler::add_item),
        )
}
