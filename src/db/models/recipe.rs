//! Recipe Model
//!
//! Bill-of-materials edges: which inputs compose a final or intermediate
//! product. Acyclicity is the caller's responsibility.

use serde::{Deserialize, Serialize};

/// Whether a recipe line is an ingredient or packaging material
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum RecipeItemKind {
    #[default]
    Input,
    Material,
}

/// Recipe edge entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RecipeItem {
    pub id: i64,
    pub final_product_id: i64,
    pub input_product_id: i64,
    pub quantity: f64,
    pub quantity_in_grams: bool,
    pub item_kind: RecipeItemKind,
}

/// Recipe edge joined with the input product's display fields
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RecipeItemWithProduct {
    pub id: i64,
    pub final_product_id: i64,
    pub input_product_id: i64,
    pub quantity: f64,
    pub quantity_in_grams: bool,
    pub item_kind: RecipeItemKind,
    pub input_name: String,
    pub input_stock: f64,
    pub unit_abbreviation: Option<String>,
}

/// Create recipe line payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeItemCreate {
    pub input_product_id: i64,
    pub quantity: f64,
    #[serde(default)]
    pub quantity_in_grams: bool,
    #[serde(default)]
    pub item_kind: RecipeItemKind,
}
