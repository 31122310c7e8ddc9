//! Catalog Showcase API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{CatalogCreate, CatalogEntry, CatalogSection, CatalogUpdate};
use crate::db::repository::catalog;
use crate::pricing::{WholesaleTier, wholesale};
use crate::utils::time::now_millis;
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub section: Option<CatalogSection>,
    pub store_id: Option<i64>,
}

/// GET /api/catalog?section=&storeId= - 橱窗内容 (在时间窗口内的激活条目)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<CatalogEntry>>> {
    let entries =
        catalog::find_active(&state.db, query.section, query.store_id, now_millis()).await?;
    Ok(Json(entries))
}

/// POST /api/catalog - 创建橱窗条目
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CatalogCreate>,
) -> AppResult<(StatusCode, Json<CatalogEntry>)> {
    let override_rules = normalize_override(payload.wholesale_override_rules.clone())?;
    let created = catalog::create(&state.db, payload, override_rules).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/catalog/:id - 更新橱窗条目
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CatalogUpdate>,
) -> AppResult<Json<CatalogEntry>> {
    // Absent → leave untouched; an empty tier list clears the override
    let override_rules = match payload.wholesale_override_rules.clone() {
        Some(value) => Some(
            wholesale::normalize_value(value)
                .map_err(|e| AppError::validation(e.to_string()))?,
        ),
        None => None,
    };
    let updated = catalog::update(&state.db, id, payload, override_rules).await?;
    Ok(Json(updated))
}

/// DELETE /api/catalog/:id - 删除橱窗条目
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<bool>>> {
    let deleted = catalog::delete(&state.db, id).await?;
    if !deleted {
        return Err(AppError::not_found(format!(
            "Catalog entry {} not found",
            id
        )));
    }
    Ok(ok_with_message(true, "Catalog entry deleted"))
}

fn normalize_override(
    value: Option<serde_json::Value>,
) -> Result<Option<Vec<WholesaleTier>>, AppError> {
    match value {
        Some(v) => wholesale::normalize_value(v).map_err(|e| AppError::validation(e.to_string())),
        None => Ok(None),
    }
}
