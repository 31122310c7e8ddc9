//! Inventory Movement API Handlers

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{Movement, MovementCreate};
use crate::db::repository::movement;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub product_id: i64,
}

/// GET /api/movements?productId= - 商品库存流水 (新→旧)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Movement>>> {
    let movements = movement::find_by_product(&state.db, query.product_id).await?;
    Ok(Json(movements))
}

/// POST /api/movements - 登记库存流水并更新库存
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MovementCreate>,
) -> AppResult<(StatusCode, Json<Movement>)> {
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    if !payload.quantity.is_finite() {
        return Err(AppError::validation("quantity must be a finite number"));
    }

    let created = movement::create(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
