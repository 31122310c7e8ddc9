//! Recipe Repository

use super::{RepoError, RepoResult};
use crate::db::models::{RecipeItem, RecipeItemCreate, RecipeItemWithProduct};
use sqlx::SqlitePool;

/// Recipe lines of a final/intermediate product, with input display fields
pub async fn find_for_product(
    pool: &SqlitePool,
    final_product_id: i64,
) -> RepoResult<Vec<RecipeItemWithProduct>> {
    let items = sqlx::query_as::<_, RecipeItemWithProduct>(
        "SELECT r.id, r.final_product_id, r.input_product_id, r.quantity, \
         r.quantity_in_grams, r.item_kind, \
         p.name AS input_name, p.stock AS input_stock, u.abbreviation AS unit_abbreviation \
         FROM recipe_item r \
         JOIN product p ON p.id = r.input_product_id \
         LEFT JOIN unit u ON u.id = p.unit_id \
         WHERE r.final_product_id = ? ORDER BY r.id",
    )
    .bind(final_product_id)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

/// Add a recipe line. Both ends must exist; cycles are not checked.
pub async fn create(
    pool: &SqlitePool,
    final_product_id: i64,
    data: RecipeItemCreate,
) -> RepoResult<RecipeItem> {
    for (label, id) in [
        ("Final product", final_product_id),
        ("Input product", data.input_product_id),
    ] {
        let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM product WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await?;
        if exists == 0 {
            return Err(RepoError::NotFound(format!("{label} {id} not found")));
        }
    }

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO recipe_item (final_product_id, input_product_id, quantity, \
         quantity_in_grams, item_kind) VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(final_product_id)
    .bind(data.input_product_id)
    .bind(data.quantity)
    .bind(data.quantity_in_grams)
    .bind(data.item_kind)
    .fetch_one(pool)
    .await?;

    let item = sqlx::query_as::<_, RecipeItem>(
        "SELECT id, final_product_id, input_product_id, quantity, quantity_in_grams, \
         item_kind FROM recipe_item WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    item.ok_or_else(|| RepoError::Database("Failed to create recipe item".into()))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM recipe_item WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
