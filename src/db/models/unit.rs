//! Unit Model
//!
//! 计量单位（kg、l、个…），含换算系数

use serde::{Deserialize, Serialize};

/// Measurement unit entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: i64,
    pub name: String,
    /// Ej: kg, l, un
    pub abbreviation: String,
    pub description: Option<String>,
    pub factor: f64,
}

/// Create unit payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitCreate {
    pub name: String,
    pub abbreviation: String,
    pub description: Option<String>,
    pub factor: Option<f64>,
}

/// Update unit payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitUpdate {
    pub name: Option<String>,
    pub abbreviation: Option<String>,
    pub description: Option<String>,
    pub factor: Option<f64>,
}
