//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`units`] - 计量单位接口
//! - [`categories`] - 分类管理接口
//! - [`products`] - 商品管理接口 (含图片上传)
//! - [`movements`] - 库存流水接口
//! - [`recipes`] - 配方接口
//! - [`stores`] - 门店管理接口
//! - [`store_products`] - 门店商品关联接口
//! - [`catalog`] - 橱窗目录接口
//! - [`home_products`] - 首页展示接口

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

pub mod catalog;
pub mod categories;
pub mod health;
pub mod home_products;
pub mod movements;
pub mod products;
pub mod recipes;
pub mod store_products;
pub mod stores;
pub mod units;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(units::router())
        .merge(categories::router())
        .merge(products::router())
        .merge(movements::router())
        .merge(recipes::router())
        .merge(stores::router())
        .merge(catalog::router())
        .merge(home_products::router())
}

/// Build the fully configured application with middleware and state
pub fn build_app(state: ServerState) -> Router {
    build_router()
        // ========== Tower HTTP Middleware ==========
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Request ID - Generate unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        .with_state(state)
}
