//! Store-Product Placement Model
//!
//! 门店商品关联：哪些商品在哪些门店上架，带独立的激活开关

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ProductKind;

/// Placement row — one (store, product) pair
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StoreProduct {
    pub id: i64,
    pub store_id: i64,
    pub product_id: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Denormalized product fields shown inside a placement view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementProduct {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub primary_image_url: Option<String>,
    pub kind: ProductKind,
    pub is_active: bool,
    pub category_id: Option<i64>,
    pub category: Option<String>,
    pub unit_id: Option<i64>,
    /// Unit abbreviation when set, otherwise the unit name
    pub unit: Option<String>,
}

/// Placement metadata combined with its product (list view)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreProductView {
    pub link_id: i64,
    pub store_id: i64,
    pub product_id: i64,
    pub is_active: bool,
    pub product: PlacementProduct,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Flat joined row backing [`StoreProductView`]
#[derive(Debug, Clone, FromRow)]
pub struct StoreProductViewRow {
    pub link_id: i64,
    pub store_id: i64,
    pub product_id: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub product_name: String,
    pub product_price: f64,
    pub product_image: Option<String>,
    pub product_kind: ProductKind,
    pub product_is_active: bool,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub unit_id: Option<i64>,
    pub unit_name: Option<String>,
    pub unit_abbreviation: Option<String>,
}

impl From<StoreProductViewRow> for StoreProductView {
    fn from(row: StoreProductViewRow) -> Self {
        StoreProductView {
            link_id: row.link_id,
            store_id: row.store_id,
            product_id: row.product_id,
            is_active: row.is_active,
            product: PlacementProduct {
                id: row.product_id,
                name: row.product_name,
                price: row.product_price,
                primary_image_url: row.product_image,
                kind: row.product_kind,
                is_active: row.product_is_active,
                category_id: row.category_id,
                category: row.category_name,
                unit_id: row.unit_id,
                unit: row.unit_abbreviation.or(row.unit_name),
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Batch-assign payload: `{ "productIds": [1, 2, 3] }`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignProducts {
    pub product_ids: Option<Vec<i64>>,
}

/// Toggle payload for a single placement
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementToggle {
    pub is_active: bool,
}
