//! Home Product Repository

use super::{RepoError, RepoResult};
use crate::db::models::{HomeProduct, HomeProductCreate, HomeProductUpdate, HomeSection};
use crate::utils::time::now_millis;
use sqlx::SqlitePool;

const HOME_PRODUCT_SELECT: &str = "SELECT id, product_id, name, description, image_url, \
     price_override, section, badge, position, is_active, created_by, created_at, updated_at \
     FROM home_product";

pub async fn find_active(
    pool: &SqlitePool,
    section: Option<HomeSection>,
) -> RepoResult<Vec<HomeProduct>> {
    let mut sql = format!("{HOME_PRODUCT_SELECT} WHERE is_active = 1");
    if section.is_some() {
        sql.push_str(" AND section = ?");
    }
    sql.push_str(" ORDER BY position, id");

    let mut query = sqlx::query_as::<_, HomeProduct>(&sql);
    if let Some(section) = section {
        query = query.bind(section);
    }
    let rows = query.fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<HomeProduct>> {
    let sql = format!("{HOME_PRODUCT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, HomeProduct>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: HomeProductCreate) -> RepoResult<HomeProduct> {
    // product_id is optional: purely visual entries are allowed
    if let Some(product_id) = data.product_id {
        let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM product WHERE id = ?")
            .bind(product_id)
            .fetch_one(pool)
            .await?;
        if exists == 0 {
            return Err(RepoError::NotFound(format!(
                "Product {product_id} not found"
            )));
        }
    }

    let now = now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO home_product (product_id, name, description, image_url, price_override, \
         section, badge, position, is_active, created_by, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(data.product_id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(&data.image_url)
    .bind(data.price_override)
    .bind(data.section)
    .bind(&data.badge)
    .bind(data.position.unwrap_or(0))
    .bind(data.is_active.unwrap_or(true))
    .bind(data.created_by)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create home product".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: HomeProductUpdate) -> RepoResult<HomeProduct> {
    let rows = sqlx::query(
        "UPDATE home_product SET product_id = COALESCE(?1, product_id), \
         name = COALESCE(?2, name), description = COALESCE(?3, description), \
         image_url = COALESCE(?4, image_url), price_override = COALESCE(?5, price_override), \
         section = COALESCE(?6, section), badge = COALESCE(?7, badge), \
         position = COALESCE(?8, position), is_active = COALESCE(?9, is_active), \
         updated_at = ?10 WHERE id = ?11",
    )
    .bind(data.product_id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(&data.image_url)
    .bind(data.price_override)
    .bind(data.section)
    .bind(&data.badge)
    .bind(data.position)
    .bind(data.is_active)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Home product {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Home product {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM home_product WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
