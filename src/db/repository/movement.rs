//! Inventory Movement Repository
//!
//! Movements are append-only: there is no update or delete here. Creating a
//! movement also applies the stock delta to the product row.

use super::{RepoError, RepoResult};
use crate::db::models::{Movement, MovementCreate, MovementKind};
use crate::utils::time::now_millis;
use sqlx::SqlitePool;

const MOVEMENT_SELECT: &str = "SELECT id, product_id, quantity, price, description, kind, \
     reference_type, reference_id, date, created_by FROM inventory_movement";

pub async fn find_by_product(pool: &SqlitePool, product_id: i64) -> RepoResult<Vec<Movement>> {
    let sql = format!("{MOVEMENT_SELECT} WHERE product_id = ? ORDER BY date DESC, id DESC");
    let movements = sqlx::query_as::<_, Movement>(&sql)
        .bind(product_id)
        .fetch_all(pool)
        .await?;
    Ok(movements)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Movement>> {
    let sql = format!("{MOVEMENT_SELECT} WHERE id = ?");
    let movement = sqlx::query_as::<_, Movement>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(movement)
}

/// Record a movement and apply its stock delta. The two statements are not
/// wrapped in a transaction, matching the rest of the write paths.
pub async fn create(pool: &SqlitePool, data: MovementCreate) -> RepoResult<Movement> {
    let exists =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM product WHERE id = ?")
            .bind(data.product_id)
            .fetch_one(pool)
            .await?;
    if exists == 0 {
        return Err(RepoError::NotFound(format!(
            "Product {} not found",
            data.product_id
        )));
    }

    let date = data.date.unwrap_or_else(now_millis);
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO inventory_movement (product_id, quantity, price, description, kind, \
         reference_type, reference_id, date, created_by) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(data.product_id)
    .bind(data.quantity)
    .bind(data.price)
    .bind(&data.description)
    .bind(data.kind)
    .bind(&data.reference_type)
    .bind(data.reference_id)
    .bind(date)
    .bind(data.created_by)
    .fetch_one(pool)
    .await?;

    apply_stock_delta(pool, data.product_id, data.kind, data.quantity).await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create movement".into()))
}

/// in/production add, out subtracts, adjustment sets the absolute level
async fn apply_stock_delta(
    pool: &SqlitePool,
    product_id: i64,
    kind: MovementKind,
    quantity: f64,
) -> RepoResult<()> {
    let sql = match kind {
        MovementKind::In | MovementKind::Production => {
            "UPDATE product SET stock = stock + ?, updated_at = ? WHERE id = ?"
        }
        MovementKind::Out => "UPDATE product SET stock = stock - ?, updated_at = ? WHERE id = ?",
        MovementKind::Adjustment => "UPDATE product SET stock = ?, updated_at = ? WHERE id = ?",
    };
    sqlx::query(sql)
        .bind(quantity)
        .bind(now_millis())
        .bind(product_id)
        .execute(pool)
        .await?;
    Ok(())
}
