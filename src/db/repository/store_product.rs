//! Store-Product Placement Repository

use super::{RepoError, RepoResult};
use crate::db::models::{StorePublic, StoreProduct, StoreProductView, StoreProductViewRow};
use crate::utils::time::now_millis;
use sqlx::SqlitePool;

const STORE_PRODUCT_SELECT: &str = "SELECT id, store_id, product_id, is_active, created_at, \
     updated_at FROM store_product";

const PLACEMENT_VIEW_SELECT: &str = "SELECT sp.id AS link_id, sp.store_id, sp.product_id, \
     sp.is_active, sp.created_at, sp.updated_at, \
     p.name AS product_name, p.price AS product_price, \
     p.primary_image_url AS product_image, p.kind AS product_kind, \
     p.is_active AS product_is_active, \
     c.id AS category_id, c.name AS category_name, \
     u.id AS unit_id, u.name AS unit_name, u.abbreviation AS unit_abbreviation \
     FROM store_product sp \
     JOIN product p ON p.id = sp.product_id AND p.kind = 'final' AND p.is_active = 1 \
     LEFT JOIN category c ON c.id = p.category_id \
     LEFT JOIN unit u ON u.id = p.unit_id";

/// Placements of a store joined to their (final, active) products.
/// `search` filters by case-insensitive substring on the product name.
pub async fn find_by_store(
    pool: &SqlitePool,
    store_id: i64,
    active_only: bool,
    search: &str,
) -> RepoResult<Vec<StoreProductView>> {
    let mut sql = format!("{PLACEMENT_VIEW_SELECT} WHERE sp.store_id = ?");
    if active_only {
        sql.push_str(" AND sp.is_active = 1");
    }
    let search = search.trim();
    if !search.is_empty() {
        sql.push_str(" AND lower(p.name) LIKE ?");
    }
    sql.push_str(" ORDER BY sp.created_at DESC, sp.id DESC");

    let mut query = sqlx::query_as::<_, StoreProductViewRow>(&sql).bind(store_id);
    if !search.is_empty() {
        query = query.bind(format!("%{}%", search.to_lowercase()));
    }
    let rows = query.fetch_all(pool).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn find_one(
    pool: &SqlitePool,
    store_id: i64,
    product_id: i64,
) -> RepoResult<Option<StoreProduct>> {
    let sql = format!("{STORE_PRODUCT_SELECT} WHERE store_id = ? AND product_id = ?");
    let row = sqlx::query_as::<_, StoreProduct>(&sql)
        .bind(store_id)
        .bind(product_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Idempotent assignment: create the placement, or re-activate it when it
/// already exists. Two calls with the same pair leave exactly one active row.
pub async fn find_or_create(
    pool: &SqlitePool,
    store_id: i64,
    product_id: i64,
) -> RepoResult<StoreProduct> {
    if let Some(existing) = find_one(pool, store_id, product_id).await? {
        if existing.is_active {
            return Ok(existing);
        }
        return set_active(pool, store_id, product_id, true)
            .await?
            .ok_or_else(|| RepoError::Database("Placement vanished during activation".into()));
    }

    let now = now_millis();
    let insert = sqlx::query_scalar::<_, i64>(
        "INSERT INTO store_product (store_id, product_id, is_active, created_at, updated_at) \
         VALUES (?, ?, 1, ?, ?) RETURNING id",
    )
    .bind(store_id)
    .bind(product_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await;

    match insert {
        Ok(_) => {}
        // Lost a race with a concurrent insert of the same pair; the
        // winner's row is the one to keep, just make sure it is active.
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            set_active(pool, store_id, product_id, true).await?;
        }
        Err(e) => return Err(e.into()),
    }

    find_one(pool, store_id, product_id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create placement".into()))
}

/// Remove the placement row entirely
pub async fn remove(pool: &SqlitePool, store_id: i64, product_id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM store_product WHERE store_id = ? AND product_id = ?")
        .bind(store_id)
        .bind(product_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Flip the activation flag; `None` when the placement does not exist
pub async fn set_active(
    pool: &SqlitePool,
    store_id: i64,
    product_id: i64,
    is_active: bool,
) -> RepoResult<Option<StoreProduct>> {
    let rows = sqlx::query(
        "UPDATE store_product SET is_active = ?, updated_at = ? \
         WHERE store_id = ? AND product_id = ?",
    )
    .bind(is_active)
    .bind(now_millis())
    .bind(store_id)
    .bind(product_id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Ok(None);
    }
    find_one(pool, store_id, product_id).await
}

/// Active stores carrying a product, ordered by display position
pub async fn stores_for_product(
    pool: &SqlitePool,
    product_id: i64,
) -> RepoResult<Vec<StorePublic>> {
    let stores = sqlx::query_as::<_, StorePublic>(
        "SELECT s.id AS store_id, s.name, s.address, s.city, s.province, \
         s.image_url, s.is_active \
         FROM store_product sp \
         JOIN store s ON s.id = sp.store_id \
         WHERE sp.product_id = ? AND sp.is_active = 1 AND s.is_active = 1 \
         ORDER BY s.position ASC, s.id ASC",
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;
    Ok(stores)
}
