//! Catalog Showcase Repository

use super::{RepoError, RepoResult};
use crate::db::models::{CatalogCreate, CatalogEntry, CatalogEntryRow, CatalogSection, CatalogUpdate};
use crate::pricing::{WholesaleTier, rules_to_json};
use crate::utils::time::now_millis;
use sqlx::SqlitePool;

const CATALOG_SELECT: &str = "SELECT id, product_id, section, title, subtitle, image_url, \
     badge, position, is_active, price_override, wholesale_override_rules, store_id, \
     starts_at, ends_at, created_at, updated_at FROM catalog_entry";

/// Active entries for a section (optionally store-scoped), inside their
/// time window when bounds are set, ordered by position.
pub async fn find_active(
    pool: &SqlitePool,
    section: Option<CatalogSection>,
    store_id: Option<i64>,
    now: i64,
) -> RepoResult<Vec<CatalogEntry>> {
    let mut sql = format!(
        "{CATALOG_SELECT} WHERE is_active = 1 \
         AND (starts_at IS NULL OR starts_at <= ?) \
         AND (ends_at IS NULL OR ends_at >= ?)"
    );
    if section.is_some() {
        sql.push_str(" AND section = ?");
    }
    if store_id.is_some() {
        sql.push_str(" AND (store_id IS NULL OR store_id = ?)");
    }
    sql.push_str(" ORDER BY position, id");

    let mut query = sqlx::query_as::<_, CatalogEntryRow>(&sql).bind(now).bind(now);
    if let Some(section) = section {
        query = query.bind(section);
    }
    if let Some(store_id) = store_id {
        query = query.bind(store_id);
    }
    let rows = query.fetch_all(pool).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<CatalogEntry>> {
    let sql = format!("{CATALOG_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, CatalogEntryRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Into::into))
}

pub async fn create(
    pool: &SqlitePool,
    data: CatalogCreate,
    override_rules: Option<Vec<WholesaleTier>>,
) -> RepoResult<CatalogEntry> {
    let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM product WHERE id = ?")
        .bind(data.product_id)
        .fetch_one(pool)
        .await?;
    if exists == 0 {
        return Err(RepoError::NotFound(format!(
            "Product {} not found",
            data.product_id
        )));
    }

    // Check duplicate (product, section, store) before inserting
    let duplicate = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM catalog_entry WHERE product_id = ? AND section = ? \
         AND COALESCE(store_id, 0) = COALESCE(?, 0)",
    )
    .bind(data.product_id)
    .bind(data.section)
    .bind(data.store_id)
    .fetch_one(pool)
    .await?;
    if duplicate > 0 {
        return Err(RepoError::Duplicate(
            "An entry for this product, section and store already exists".into(),
        ));
    }

    let rules_json = override_rules.as_deref().map(rules_to_json);
    let now = now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO catalog_entry (product_id, section, title, subtitle, image_url, badge, \
         position, is_active, price_override, wholesale_override_rules, store_id, starts_at, \
         ends_at, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(data.product_id)
    .bind(data.section)
    .bind(&data.title)
    .bind(&data.subtitle)
    .bind(&data.image_url)
    .bind(&data.badge)
    .bind(data.position.unwrap_or(0))
    .bind(data.is_active.unwrap_or(true))
    .bind(data.price_override)
    .bind(&rules_json)
    .bind(data.store_id)
    .bind(data.starts_at)
    .bind(data.ends_at)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => RepoError::Duplicate(
            "An entry for this product, section and store already exists".into(),
        ),
        other => other.into(),
    })?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create catalog entry".into()))
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: CatalogUpdate,
    override_rules: Option<Option<Vec<WholesaleTier>>>,
) -> RepoResult<CatalogEntry> {
    let set_rules = override_rules.is_some();
    let rules_json = override_rules.flatten().as_deref().map(rules_to_json);

    let rows = sqlx::query(
        "UPDATE catalog_entry SET \
         section = COALESCE(?1, section), \
         title = COALESCE(?2, title), \
         subtitle = COALESCE(?3, subtitle), \
         image_url = COALESCE(?4, image_url), \
         badge = COALESCE(?5, badge), \
         position = COALESCE(?6, position), \
         is_active = COALESCE(?7, is_active), \
         price_override = COALESCE(?8, price_override), \
         wholesale_override_rules = CASE WHEN ?9 THEN ?10 ELSE wholesale_override_rules END, \
         store_id = COALESCE(?11, store_id), \
         starts_at = COALESCE(?12, starts_at), \
         ends_at = COALESCE(?13, ends_at), \
         updated_at = ?14 \
         WHERE id = ?15",
    )
    .bind(data.section)
    .bind(&data.title)
    .bind(&data.subtitle)
    .bind(&data.image_url)
    .bind(&data.badge)
    .bind(data.position)
    .bind(data.is_active)
    .bind(data.price_override)
    .bind(set_rules)
    .bind(&rules_json)
    .bind(data.store_id)
    .bind(data.starts_at)
    .bind(data.ends_at)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Catalog entry {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Catalog entry {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM catalog_entry WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
