//! Catalog Showcase Model
//!
//! Curated, positioned, optionally time-bounded product cards for the
//! storefront. An entry can override the product's price or wholesale
//! terms for its section, optionally scoped to one store.

use serde::{Deserialize, Serialize};

use crate::pricing::WholesaleTier;

/// Storefront section an entry is pinned to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum CatalogSection {
    #[default]
    Home,
    Offers,
    Recommended,
    MadeToOrder,
    NewArrivals,
    Discounts,
    Popular,
    Seasonal,
    Specials,
    Limited,
}

/// Showcase entry as served over the API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: i64,
    pub product_id: i64,
    pub section: CatalogSection,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub image_url: Option<String>,
    /// Ej: "-20%", "Nuevo"
    pub badge: Option<String>,
    pub position: i64,
    pub is_active: bool,
    pub price_override: Option<f64>,
    pub wholesale_override_rules: Option<Vec<WholesaleTier>>,
    pub store_id: Option<i64>,
    pub starts_at: Option<i64>,
    pub ends_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Raw row; `wholesale_override_rules` is stored JSON text
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CatalogEntryRow {
    pub id: i64,
    pub product_id: i64,
    pub section: CatalogSection,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub image_url: Option<String>,
    pub badge: Option<String>,
    pub position: i64,
    pub is_active: bool,
    pub price_override: Option<f64>,
    pub wholesale_override_rules: Option<String>,
    pub store_id: Option<i64>,
    pub starts_at: Option<i64>,
    pub ends_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<CatalogEntryRow> for CatalogEntry {
    fn from(row: CatalogEntryRow) -> Self {
        let rules = row
            .wholesale_override_rules
            .as_deref()
            .and_then(|text| serde_json::from_str::<Vec<WholesaleTier>>(text).ok())
            .filter(|tiers| !tiers.is_empty());
        CatalogEntry {
            id: row.id,
            product_id: row.product_id,
            section: row.section,
            title: row.title,
            subtitle: row.subtitle,
            image_url: row.image_url,
            badge: row.badge,
            position: row.position,
            is_active: row.is_active,
            price_override: row.price_override,
            wholesale_override_rules: rules,
            store_id: row.store_id,
            starts_at: row.starts_at,
            ends_at: row.ends_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Create payload. `wholesaleOverrideRules` arrives as raw JSON and goes
/// through the same strict normalization as product rules.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCreate {
    pub product_id: i64,
    #[serde(default)]
    pub section: CatalogSection,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub image_url: Option<String>,
    pub badge: Option<String>,
    pub position: Option<i64>,
    pub is_active: Option<bool>,
    pub price_override: Option<f64>,
    pub wholesale_override_rules: Option<serde_json::Value>,
    pub store_id: Option<i64>,
    pub starts_at: Option<i64>,
    pub ends_at: Option<i64>,
}

/// Update payload. Absent fields are left untouched; passing an empty
/// tier array clears the wholesale override.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogUpdate {
    pub section: Option<CatalogSection>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub image_url: Option<String>,
    pub badge: Option<String>,
    pub position: Option<i64>,
    pub is_active: Option<bool>,
    pub price_override: Option<f64>,
    pub wholesale_override_rules: Option<serde_json::Value>,
    pub store_id: Option<i64>,
    pub starts_at: Option<i64>,
    pub ends_at: Option<i64>,
}
