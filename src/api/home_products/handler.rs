//! Home Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{HomeProduct, HomeProductCreate, HomeProductUpdate, HomeSection};
use crate::db::repository::home_product;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub section: Option<HomeSection>,
}

/// GET /api/home-products?section= - 首页展示条目 (按位置排序)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<HomeProduct>>> {
    let entries = home_product::find_active(&state.db, query.section).await?;
    Ok(Json(entries))
}

/// POST /api/home-products - 创建首页条目 (productId 可选)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<HomeProductCreate>,
) -> AppResult<(StatusCode, Json<HomeProduct>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    let created = home_product::create(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/home-products/:id - 更新首页条目
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<HomeProductUpdate>,
) -> AppResult<Json<HomeProduct>> {
    if let Some(ref name) = payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    let updated = home_product::update(&state.db, id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/home-products/:id - 删除首页条目
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<bool>>> {
    let deleted = home_product::delete(&state.db, id).await?;
    if !deleted {
        return Err(AppError::not_found(format!(
            "Home product {} not found",
            id
        )));
    }
    Ok(ok_with_message(true, "Home product deleted"))
}
