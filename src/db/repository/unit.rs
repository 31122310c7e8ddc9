//! Unit Repository

use super::{RepoError, RepoResult};
use crate::db::models::{Unit, UnitCreate, UnitUpdate};
use sqlx::SqlitePool;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Unit>> {
    let units = sqlx::query_as::<_, Unit>(
        "SELECT id, name, abbreviation, description, factor FROM unit ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(units)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Unit>> {
    let unit = sqlx::query_as::<_, Unit>(
        "SELECT id, name, abbreviation, description, factor FROM unit WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(unit)
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<Unit>> {
    let unit = sqlx::query_as::<_, Unit>(
        "SELECT id, name, abbreviation, description, factor FROM unit WHERE name = ? LIMIT 1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(unit)
}

pub async fn create(pool: &SqlitePool, data: UnitCreate) -> RepoResult<Unit> {
    if find_by_name(pool, &data.name).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Unit '{}' already exists",
            data.name
        )));
    }

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO unit (name, abbreviation, description, factor) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.abbreviation)
    .bind(&data.description)
    .bind(data.factor.unwrap_or(0.0))
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create unit".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: UnitUpdate) -> RepoResult<Unit> {
    let rows = sqlx::query(
        "UPDATE unit SET name = COALESCE(?1, name), abbreviation = COALESCE(?2, abbreviation), \
         description = COALESCE(?3, description), factor = COALESCE(?4, factor) WHERE id = ?5",
    )
    .bind(&data.name)
    .bind(&data.abbreviation)
    .bind(&data.description)
    .bind(data.factor)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Unit {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Unit {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    // A product's unit reference is mandatory, so block deletion while in use
    let count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM product WHERE unit_id = ?")
            .bind(id)
            .fetch_one(pool)
            .await?;
    if count > 0 {
        return Err(RepoError::Validation(
            "Cannot delete a unit still used by products".into(),
        ));
    }
    let rows = sqlx::query("DELETE FROM unit WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
