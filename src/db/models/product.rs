//! Product Model
//!
//! 商品/原料主表：原料 (raw)、半成品 (intermediate)、成品 (final)

use serde::{Deserialize, Serialize};

use crate::pricing::WholesaleTier;

/// Product kind: raw material, intermediate, or final good
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum ProductKind {
    #[default]
    Raw,
    Intermediate,
    Final,
}

impl ProductKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "raw" => Some(Self::Raw),
            "intermediate" => Some(Self::Intermediate),
            "final" => Some(Self::Final),
            _ => None,
        }
    }
}

/// Product entity as served over the API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub kind: ProductKind,
    pub unit_id: i64,
    pub category_id: Option<i64>,
    pub standard_weight_grams: f64,
    pub net_weight: f64,
    pub stock: f64,
    pub min_stock: f64,
    pub price: f64,
    pub distributor_price: f64,
    pub tax_rate: f64,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub wholesale_rules: Option<Vec<WholesaleTier>>,
    pub primary_image_url: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Raw database row; `wholesale_rules` is the stored JSON text
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub kind: ProductKind,
    pub unit_id: i64,
    pub category_id: Option<i64>,
    pub standard_weight_grams: f64,
    pub net_weight: f64,
    pub stock: f64,
    pub min_stock: f64,
    pub price: f64,
    pub distributor_price: f64,
    pub tax_rate: f64,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub wholesale_rules: Option<String>,
    pub primary_image_url: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            description: row.description,
            kind: row.kind,
            unit_id: row.unit_id,
            category_id: row.category_id,
            standard_weight_grams: row.standard_weight_grams,
            net_weight: row.net_weight,
            stock: row.stock,
            min_stock: row.min_stock,
            price: row.price,
            distributor_price: row.distributor_price,
            tax_rate: row.tax_rate,
            sku: row.sku,
            barcode: row.barcode,
            wholesale_rules: parse_stored_rules(row.wholesale_rules.as_deref()),
            primary_image_url: row.primary_image_url,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Product joined with its category and unit (list/detail views)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithRefs {
    #[serde(flatten)]
    pub product: Product,
    pub category_name: Option<String>,
    pub unit_name: Option<String>,
    pub unit_abbreviation: Option<String>,
}

/// Joined database row backing [`ProductWithRefs`]
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductWithRefsRow {
    #[sqlx(flatten)]
    pub product: ProductRow,
    pub category_name: Option<String>,
    pub unit_name: Option<String>,
    pub unit_abbreviation: Option<String>,
}

impl From<ProductWithRefsRow> for ProductWithRefs {
    fn from(row: ProductWithRefsRow) -> Self {
        ProductWithRefs {
            product: row.product.into(),
            category_name: row.category_name,
            unit_name: row.unit_name,
            unit_abbreviation: row.unit_abbreviation,
        }
    }
}

/// Create command, produced by the typed multipart parsing layer
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub description: Option<String>,
    pub kind: ProductKind,
    pub unit_id: i64,
    pub category_id: Option<i64>,
    pub standard_weight_grams: f64,
    pub net_weight: f64,
    pub stock: f64,
    pub min_stock: f64,
    pub price: f64,
    pub distributor_price: f64,
    pub tax_rate: f64,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub wholesale_rules: Option<Vec<WholesaleTier>>,
    pub primary_image_url: Option<String>,
    pub is_active: bool,
}

/// Update command. Outer `None` means "leave untouched"; for the two
/// nullable-settable fields the inner `None` means "set to NULL".
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub kind: Option<ProductKind>,
    pub unit_id: Option<i64>,
    pub category_id: Option<i64>,
    pub standard_weight_grams: Option<f64>,
    pub net_weight: Option<f64>,
    pub stock: Option<f64>,
    pub min_stock: Option<f64>,
    pub price: Option<f64>,
    pub distributor_price: Option<f64>,
    pub tax_rate: Option<f64>,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub is_active: Option<bool>,
    pub wholesale_rules: Option<Option<Vec<WholesaleTier>>>,
    pub primary_image_url: Option<Option<String>>,
}

/// Decode the stored JSON text. A row written through the API always holds
/// a valid tier array; anything else is treated as no rules.
fn parse_stored_rules(stored: Option<&str>) -> Option<Vec<WholesaleTier>> {
    let text = stored?;
    match serde_json::from_str::<Vec<WholesaleTier>>(text) {
        Ok(tiers) if !tiers.is_empty() => Some(tiers),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring malformed wholesale_rules column");
            None
        }
    }
}
