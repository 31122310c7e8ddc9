//! Product API Handlers
//!
//! Create and update accept multipart forms with an optional `image` file.
//! Image files are written before the row mutation; deletions are staged
//! and executed after it succeeds, guarded by the shared-reference check.

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};

use super::form;
use crate::core::ServerState;
use crate::db::models::{Product, ProductWithRefs};
use crate::db::repository::product;
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

/// GET /api/products - 获取所有商品 (成品 → 半成品 → 原料)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<ProductWithRefs>>> {
    let products = product::find_all(&state.db).await?;
    Ok(Json(products))
}

/// GET /api/products/:id - 获取单个商品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ProductWithRefs>> {
    let found = product::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))?;
    Ok(Json(found))
}

/// POST /api/products - 创建商品 (multipart, 可选图片)
pub async fn create(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Product>)> {
    let form = form::read_form(multipart).await?;
    let mut cmd = form::parse_create(&form.fields)?;

    // The image file lands on disk before the INSERT; it is compensated
    // away below if the INSERT does not go through.
    let mut temp_file = None;
    if let Some(data) = &form.image {
        let filename = state.images.save_upload(data)?;
        cmd.primary_image_url = Some(filename.clone());
        temp_file = Some(filename);
    }

    match product::create(&state.db, cmd).await {
        Ok(created) => Ok((StatusCode::CREATED, Json(created))),
        Err(e) => {
            if let Some(filename) = temp_file {
                state.images.remove_quietly(&filename).await;
            }
            Err(e.into())
        }
    }
}

/// PUT /api/products/:id - 更新商品 (multipart, 可选图片, 可选 clearImage)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> AppResult<Json<Product>> {
    let row = product::find_row(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))?;

    let form = form::read_form(multipart).await?;
    let parsed = form::parse_update(&form.fields)?;
    let mut update = parsed.update;

    // Stage file deletions; they run only after the UPDATE commits
    let mut stale_files: Vec<String> = Vec::new();
    let mut new_file: Option<String> = None;

    if parsed.clear_image && let Some(old) = &row.primary_image_url {
        stale_files.push(old.clone());
        update.primary_image_url = Some(None);
    }

    if let Some(data) = &form.image {
        let filename = state.images.save_upload(data)?;
        if let Some(old) = &row.primary_image_url
            && !stale_files.contains(old)
        {
            stale_files.push(old.clone());
        }
        new_file = Some(filename.clone());
        update.primary_image_url = Some(Some(filename));
    }

    match product::update(&state.db, id, update).await {
        Ok(updated) => {
            for filename in &stale_files {
                state
                    .images
                    .remove_if_unreferenced(&state.db, filename, Some(id))
                    .await;
            }
            Ok(Json(updated))
        }
        Err(e) => {
            if let Some(filename) = new_file {
                state.images.remove_quietly(&filename).await;
            }
            Err(e.into())
        }
    }
}

/// DELETE /api/products/:id - 删除商品 (图片不再被引用时一并删除)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AppResponse<bool>>> {
    let row = product::find_row(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))?;

    let deleted = product::delete(&state.db, id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Product {} not found", id)));
    }

    if let Some(filename) = &row.primary_image_url {
        state
            .images
            .remove_if_unreferenced(&state.db, filename, Some(id))
            .await;
    }

    Ok(ok_with_message(true, "Product deleted"))
}
