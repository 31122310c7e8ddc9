//! Inventory Movement Model
//!
//! 库存流水：入库、出库、调整、生产。Append-only — 创建后不可修改。

use serde::{Deserialize, Serialize};

/// Stock-affecting event kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum MovementKind {
    In,
    Out,
    Adjustment,
    Production,
}

/// Immutable stock movement record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub id: i64,
    pub product_id: i64,
    pub quantity: f64,
    /// Purchase price, normally only set on inbound movements
    pub price: Option<f64>,
    pub description: Option<String>,
    pub kind: MovementKind,
    /// Ej: "order"
    pub reference_type: Option<String>,
    pub reference_id: Option<i64>,
    pub date: i64,
    pub created_by: i64,
}

/// Create movement payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementCreate {
    pub product_id: i64,
    pub quantity: f64,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub kind: MovementKind,
    pub reference_type: Option<String>,
    pub reference_id: Option<i64>,
    /// Defaults to now when omitted
    pub date: Option<i64>,
    pub created_by: i64,
}
