//! Home Product Model
//!
//! Legacy storefront showcase. Unlike catalog entries these carry their own
//! display fields, so an entry may exist without a backing product.

use serde::{Deserialize, Serialize};

/// Home page section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum HomeSection {
    #[default]
    Home,
    Offers,
    Recommended,
    New,
}

/// Home showcase entry
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HomeProduct {
    pub id: i64,
    /// Optional link to a real product; NULL for purely visual entries
    pub product_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price_override: Option<f64>,
    pub section: HomeSection,
    pub badge: Option<String>,
    pub position: i64,
    pub is_active: bool,
    pub created_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create home entry payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeProductCreate {
    pub product_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price_override: Option<f64>,
    #[serde(default)]
    pub section: HomeSection,
    pub badge: Option<String>,
    pub position: Option<i64>,
    pub is_active: Option<bool>,
    pub created_by: Option<i64>,
}

/// Update home entry payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeProductUpdate {
    pub product_id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price_override: Option<f64>,
    pub section: Option<HomeSection>,
    pub badge: Option<String>,
    pub position: Option<i64>,
    pub is_active: Option<bool>,
}
