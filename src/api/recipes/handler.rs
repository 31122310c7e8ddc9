//! Recipe API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::models::{RecipeItem, RecipeItemCreate, RecipeItemWithProduct};
use crate::db::repository::recipe;
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

/// GET /api/products/:id/recipe - 商品配方 (含投入品名称)
pub async fn list_for_product(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<RecipeItemWithProduct>>> {
    let items = recipe::find_for_product(&state.db, id).await?;
    Ok(Json(items))
}

/// POST /api/products/:id/recipe - 添加配方行
pub async fn add_item(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<RecipeItemCreate>,
) -> AppResult<(StatusCode, Json<RecipeItem>)> {
    if !payload.quantity.is_finite() || payload.quantity <= 0.0 {
        return Err(AppError::validation("quantity must be a positive number"));
    }
    let created = recipe::create(&state.db, id, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /api/recipe-items/:id - 删除配方行
pub async fn remove_item(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<bool>>> {
    let removed = recipe::delete(&state.db, id).await?;
    if !removed {
        return Err(AppError::not_found(format!("Recipe item {} not found", id)));
    }
    Ok(ok_with_message(true, "Recipe item deleted"))
}
