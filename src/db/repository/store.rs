//! Store Repository

use super::{RepoError, RepoResult};
use crate::db::models::{Store, StoreCreate, StoreUpdate};
use crate::utils::time::now_millis;
use sqlx::SqlitePool;

const STORE_SELECT: &str = "SELECT id, name, address, description, image_url, phone, email, \
     city, province, latitude, longitude, position, is_active, created_by, created_at, \
     updated_at FROM store";

pub async fn find_all(pool: &SqlitePool, active_only: bool) -> RepoResult<Vec<Store>> {
    let sql = if active_only {
        format!("{STORE_SELECT} WHERE is_active = 1 ORDER BY position, id")
    } else {
        format!("{STORE_SELECT} ORDER BY position, id")
    };
    let stores = sqlx::query_as::<_, Store>(&sql).fetch_all(pool).await?;
    Ok(stores)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Store>> {
    let sql = format!("{STORE_SELECT} WHERE id = ?");
    let store = sqlx::query_as::<_, Store>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(store)
}

pub async fn create(pool: &SqlitePool, data: StoreCreate) -> RepoResult<Store> {
    let now = now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO store (name, address, description, image_url, phone, email, city, \
         province, latitude, longitude, position, is_active, created_by, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 1, ?, ?, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.address)
    .bind(&data.description)
    .bind(&data.image_url)
    .bind(&data.phone)
    .bind(&data.email)
    .bind(&data.city)
    .bind(&data.province)
    .bind(data.latitude)
    .bind(data.longitude)
    .bind(data.position.unwrap_or(0))
    .bind(data.created_by)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create store".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: StoreUpdate) -> RepoResult<Store> {
    let rows = sqlx::query(
        "UPDATE store SET name = COALESCE(?1, name), address = COALESCE(?2, address), \
         description = COALESCE(?3, description), image_url = COALESCE(?4, image_url), \
         phone = COALESCE(?5, phone), email = COALESCE(?6, email), city = COALESCE(?7, city), \
         province = COALESCE(?8, province), latitude = COALESCE(?9, latitude), \
         longitude = COALESCE(?10, longitude), position = COALESCE(?11, position), \
         is_active = COALESCE(?12, is_active), updated_at = ?13 WHERE id = ?14",
    )
    .bind(&data.name)
    .bind(&data.address)
    .bind(&data.description)
    .bind(&data.image_url)
    .bind(&data.phone)
    .bind(&data.email)
    .bind(&data.city)
    .bind(&data.province)
    .bind(data.latitude)
    .bind(data.longitude)
    .bind(data.position)
    .bind(data.is_active)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Store {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Store {id} not found")))
}

/// Hard delete. Placements cascade via the FK.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM store WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
