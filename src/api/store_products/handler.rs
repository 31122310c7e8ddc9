//! Store-Product Placement API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::store_product::{AssignProducts, PlacementToggle};
use crate::db::models::{StoreProduct, StoreProductView, StorePublic};
use crate::db::repository::{store, store_product};
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

fn default_active_only() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Defaults to true: only active placements
    #[serde(default = "default_active_only")]
    pub active_only: bool,
    /// Case-insensitive substring match on the product name
    #[serde(default)]
    pub q: String,
}

/// GET /api/stores/:store_id/products - 门店上架商品列表
pub async fn list_by_store(
    State(state): State<ServerState>,
    Path(store_id): Path<i64>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<StoreProductView>>> {
    let rows =
        store_product::find_by_store(&state.db, store_id, query.active_only, &query.q).await?;
    Ok(Json(rows))
}

/// POST /api/stores/:store_id/products - 批量上架商品
///
/// Idempotent per id: existing placements are re-activated instead of
/// duplicated. The per-id operations run concurrently; a failure in one
/// does not roll back the others — the response carries the rows that
/// succeeded.
pub async fn add_many(
    State(state): State<ServerState>,
    Path(store_id): Path<i64>,
    Json(payload): Json<AssignProducts>,
) -> AppResult<(StatusCode, Json<Vec<StoreProduct>>)> {
    let product_ids = payload.product_ids.unwrap_or_default();
    if product_ids.is_empty() {
        return Err(AppError::validation(
            "productIds is required (non-empty array)",
        ));
    }

    if store::find_by_id(&state.db, store_id).await?.is_none() {
        return Err(AppError::not_found(format!("Store {} not found", store_id)));
    }

    let ops = product_ids
        .iter()
        .map(|product_id| store_product::find_or_create(&state.db, store_id, *product_id));
    let results = futures::future::join_all(ops).await;

    let mut rows = Vec::with_capacity(product_ids.len());
    for (product_id, result) in product_ids.iter().zip(results) {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                tracing::error!(store_id, product_id, error = %e, "Failed to assign product to store");
            }
        }
    }

    Ok((StatusCode::CREATED, Json(rows)))
}

/// DELETE /api/stores/:store_id/products/:product_id - 下架 (删除关联)
pub async fn remove(
    State(state): State<ServerState>,
    Path((store_id, product_id)): Path<(i64, i64)>,
) -> AppResult<Json<AppResponse<bool>>> {
    let removed = store_product::remove(&state.db, store_id, product_id).await?;
    if !removed {
        return Err(AppError::not_found(format!(
            "Placement ({store_id}, {product_id}) not found"
        )));
    }
    Ok(ok_with_message(true, "Product unassigned from store"))
}

/// PATCH /api/stores/:store_id/products/:product_id - 切换激活状态
pub async fn toggle(
    State(state): State<ServerState>,
    Path((store_id, product_id)): Path<(i64, i64)>,
    Json(payload): Json<PlacementToggle>,
) -> AppResult<Json<StoreProduct>> {
    let updated = store_product::set_active(&state.db, store_id, product_id, payload.is_active)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!("Placement ({store_id}, {product_id}) not found"))
        })?;
    Ok(Json(updated))
}

/// GET /api/products/:id/stores - 哪些门店在售该商品 (按门店顺序)
pub async fn stores_for_product(
    State(state): State<ServerState>,
    Path(product_id): Path<i64>,
) -> AppResult<Json<Vec<StorePublic>>> {
    let stores = store_product::stores_for_product(&state.db, product_id).await?;
    Ok(Json(stores))
}
