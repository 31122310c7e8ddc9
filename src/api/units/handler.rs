//! Unit API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::models::{Unit, UnitCreate, UnitUpdate};
use crate::db::repository::unit;
use crate::utils::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_required_text};
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

/// GET /api/units - 获取所有单位
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Unit>>> {
    let units = unit::find_all(&state.db).await?;
    Ok(Json(units))
}

/// GET /api/units/:id - 获取单个单位
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Unit>> {
    let found = unit::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Unit {} not found", id)))?;
    Ok(Json(found))
}

/// POST /api/units - 创建单位
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UnitCreate>,
) -> AppResult<(StatusCode, Json<Unit>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.abbreviation, "abbreviation", MAX_SHORT_TEXT_LEN)?;

    let created = unit::create(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/units/:id - 更新单位
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<UnitUpdate>,
) -> AppResult<Json<Unit>> {
    if let Some(ref name) = payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    let updated = unit::update(&state.db, id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/units/:id - 删除单位 (仍被商品引用时拒绝)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<bool>>> {
    let deleted = unit::delete(&state.db, id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Unit {} not found", id)));
    }
    Ok(ok_with_message(true, "Unit deleted"))
}
