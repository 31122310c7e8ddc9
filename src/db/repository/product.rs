//! Product Repository

use super::{RepoError, RepoResult};
use crate::db::models::{
    Product, ProductCreate, ProductKind, ProductRow, ProductUpdate, ProductWithRefs,
    ProductWithRefsRow,
};
use crate::pricing::rules_to_json;
use crate::utils::time::now_millis;
use sqlx::SqlitePool;

const PRODUCT_WITH_REFS_SELECT: &str = "SELECT p.id, p.name, p.description, p.kind, p.unit_id, \
     p.category_id, p.standard_weight_grams, p.net_weight, p.stock, p.min_stock, p.price, \
     p.distributor_price, p.tax_rate, p.sku, p.barcode, p.wholesale_rules, p.primary_image_url, \
     p.is_active, p.created_at, p.updated_at, \
     c.name AS category_name, u.name AS unit_name, u.abbreviation AS unit_abbreviation \
     FROM product p \
     LEFT JOIN category c ON c.id = p.category_id \
     LEFT JOIN unit u ON u.id = p.unit_id";

/// Find all products joined with category and unit, ordered so that final
/// goods come first, then intermediates, then raw materials. Relative
/// insertion order is preserved inside each group (stable partition).
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<ProductWithRefs>> {
    let sql = format!("{PRODUCT_WITH_REFS_SELECT} ORDER BY p.id");
    let rows = sqlx::query_as::<_, ProductWithRefsRow>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(order_by_kind(rows.into_iter().map(Into::into).collect()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<ProductWithRefs>> {
    let sql = format!("{PRODUCT_WITH_REFS_SELECT} WHERE p.id = ?");
    let row = sqlx::query_as::<_, ProductWithRefsRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Into::into))
}

/// Plain row fetch without joins (used by mutation paths)
pub async fn find_row(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let row = sqlx::query_as::<_, ProductRow>("SELECT * FROM product WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Into::into))
}

pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<Product> {
    check_unit_exists(pool, data.unit_id).await?;
    if let Some(category_id) = data.category_id {
        check_category_exists(pool, category_id).await?;
    }

    let rules_json = data.wholesale_rules.as_deref().map(rules_to_json);
    let now = now_millis();

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO product (name, description, kind, unit_id, category_id, \
         standard_weight_grams, net_weight, stock, min_stock, price, distributor_price, \
         tax_rate, sku, barcode, wholesale_rules, primary_image_url, is_active, \
         created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.kind)
    .bind(data.unit_id)
    .bind(data.category_id)
    .bind(data.standard_weight_grams)
    .bind(data.net_weight)
    .bind(data.stock)
    .bind(data.min_stock)
    .bind(data.price)
    .bind(data.distributor_price)
    .bind(data.tax_rate)
    .bind(&data.sku)
    .bind(&data.barcode)
    .bind(&rules_json)
    .bind(&data.primary_image_url)
    .bind(data.is_active)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    find_row(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ProductUpdate) -> RepoResult<Product> {
    if let Some(unit_id) = data.unit_id {
        check_unit_exists(pool, unit_id).await?;
    }
    if let Some(category_id) = data.category_id {
        check_category_exists(pool, category_id).await?;
    }

    let set_rules = data.wholesale_rules.is_some();
    let rules_json = data
        .wholesale_rules
        .flatten()
        .as_deref()
        .map(rules_to_json);
    let set_image = data.primary_image_url.is_some();
    let image_url = data.primary_image_url.flatten();

    let rows = sqlx::query(
        "UPDATE product SET \
         name = COALESCE(?1, name), \
         description = COALESCE(?2, description), \
         kind = COALESCE(?3, kind), \
         unit_id = COALESCE(?4, unit_id), \
         category_id = COALESCE(?5, category_id), \
         standard_weight_grams = COALESCE(?6, standard_weight_grams), \
         net_weight = COALESCE(?7, net_weight), \
         stock = COALESCE(?8, stock), \
         min_stock = COALESCE(?9, min_stock), \
         price = COALESCE(?10, price), \
         distributor_price = COALESCE(?11, distributor_price), \
         tax_rate = COALESCE(?12, tax_rate), \
         sku = COALESCE(?13, sku), \
         barcode = COALESCE(?14, barcode), \
         is_active = COALESCE(?15, is_active), \
         wholesale_rules = CASE WHEN ?16 THEN ?17 ELSE wholesale_rules END, \
         primary_image_url = CASE WHEN ?18 THEN ?19 ELSE primary_image_url END, \
         updated_at = ?20 \
         WHERE id = ?21",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.kind)
    .bind(data.unit_id)
    .bind(data.category_id)
    .bind(data.standard_weight_grams)
    .bind(data.net_weight)
    .bind(data.stock)
    .bind(data.min_stock)
    .bind(data.price)
    .bind(data.distributor_price)
    .bind(data.tax_rate)
    .bind(&data.sku)
    .bind(&data.barcode)
    .bind(data.is_active)
    .bind(set_rules)
    .bind(&rules_json)
    .bind(set_image)
    .bind(&image_url)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }
    find_row(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM product WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Count products referencing an image filename, excluding the row being
/// mutated. The image file may be deleted from disk only when this is zero.
pub async fn count_image_refs(
    pool: &SqlitePool,
    filename: &str,
    exclude_id: Option<i64>,
) -> RepoResult<i64> {
    let count = if let Some(id) = exclude_id {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM product WHERE primary_image_url = ? AND id != ?",
        )
        .bind(filename)
        .bind(id)
        .fetch_one(pool)
        .await?
    } else {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM product WHERE primary_image_url = ?")
            .bind(filename)
            .fetch_one(pool)
            .await?
    };
    Ok(count)
}

async fn check_unit_exists(pool: &SqlitePool, unit_id: i64) -> RepoResult<()> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM unit WHERE id = ?")
        .bind(unit_id)
        .fetch_one(pool)
        .await?;
    if count == 0 {
        return Err(RepoError::Validation(format!(
            "unitId {unit_id} does not reference an existing unit"
        )));
    }
    Ok(())
}

async fn check_category_exists(pool: &SqlitePool, category_id: i64) -> RepoResult<()> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM category WHERE id = ?")
        .bind(category_id)
        .fetch_one(pool)
        .await?;
    if count == 0 {
        return Err(RepoError::Validation(format!(
            "categoryId {category_id} does not reference an existing category"
        )));
    }
    Ok(())
}

/// Stable partition: final → intermediate → raw
fn order_by_kind(products: Vec<ProductWithRefs>) -> Vec<ProductWithRefs> {
    let mut finals = Vec::new();
    let mut intermediates = Vec::new();
    let mut raws = Vec::new();
    for p in products {
        match p.product.kind {
            ProductKind::Final => finals.push(p),
            ProductKind::Intermediate => intermediates.push(p),
            ProductKind::Raw => raws.push(p),
        }
    }
    finals.extend(intermediates);
    finals.extend(raws);
    finals
}
