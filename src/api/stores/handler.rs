//! Store API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{Store, StoreCreate, StoreUpdate};
use crate::db::repository::store;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, validate_required_text,
};
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default)]
    pub active_only: bool,
}

/// GET /api/stores - 获取门店列表 (按显示顺序)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Store>>> {
    let stores = store::find_all(&state.db, query.active_only).await?;
    Ok(Json(stores))
}

/// GET /api/stores/:store_id - 获取单个门店
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(store_id): Path<i64>,
) -> AppResult<Json<Store>> {
    let found = store::find_by_id(&state.db, store_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Store {} not found", store_id)))?;
    Ok(Json(found))
}

/// POST /api/stores - 创建门店
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<StoreCreate>,
) -> AppResult<(StatusCode, Json<Store>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.address, "address", MAX_ADDRESS_LEN)?;

    let created = store::create(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/stores/:store_id - 更新门店
pub async fn update(
    State(state): State<ServerState>,
    Path(store_id): Path<i64>,
    Json(payload): Json<StoreUpdate>,
) -> AppResult<Json<Store>> {
    if let Some(ref name) = payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(ref address) = payload.address {
        validate_required_text(address, "address", MAX_ADDRESS_LEN)?;
    }

    let updated = store::update(&state.db, store_id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/stores/:store_id - 删除门店 (关联上架记录级联删除)
pub async fn delete(
    State(state): State<ServerState>,
    Path(store_id): Path<i64>,
) -> AppResult<Json<AppResponse<bool>>> {
    let deleted = store::delete(&state.db, store_id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Store {} not found", store_id)));
    }
    Ok(ok_with_message(true, "Store deleted"))
}
