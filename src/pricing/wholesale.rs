//! Wholesale tier normalization
//!
//! A product (or catalog entry) can carry tiered wholesale rules: each tier
//! keys on a minimum quantity and expresses either a discount percentage or
//! a flat per-unit price. Clients send the rules either as structured JSON
//! or as a JSON-encoded string (multipart text fields), so normalization is
//! strict:
//!
//! - a string input is parsed exactly once; malformed JSON is an error
//! - the decoded value must be an array of tiers or an object `{ "tiers": [...] }`
//! - each tier keeps only its finite numeric fields among
//!   `minQty` / `discountPercent` / `pricePerUnit`; tiers with none are dropped
//! - zero surviving tiers normalizes to `None`, never an empty list

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One wholesale pricing tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WholesaleTier {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_qty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_unit: Option<f64>,
}

/// Rejected wholesale-rules input
#[derive(Debug, thiserror::Error)]
pub enum WholesaleError {
    #[error("wholesaleRules must be valid JSON")]
    InvalidJson,

    #[error("wholesaleRules must be an array or an object {{ \"tiers\": [...] }}")]
    InvalidShape,
}

/// Normalize a raw wholesale-rules field to a tier list, or `None` when the
/// input is empty or reduces to zero tiers.
pub fn normalize_rules(input: &str) -> Result<Option<Vec<WholesaleTier>>, WholesaleError> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    let value: Value = serde_json::from_str(input).map_err(|_| WholesaleError::InvalidJson)?;
    normalize_value(value)
}

/// Normalize an already-decoded JSON value (JSON request bodies).
pub fn normalize_value(value: Value) -> Result<Option<Vec<WholesaleTier>>, WholesaleError> {
    if value.is_null() {
        return Ok(None);
    }

    let raw_tiers = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("tiers") {
            Some(Value::Array(items)) => items,
            _ => return Err(WholesaleError::InvalidShape),
        },
        _ => return Err(WholesaleError::InvalidShape),
    };

    let tiers: Vec<WholesaleTier> = raw_tiers
        .into_iter()
        .filter_map(|item| {
            let obj = item.as_object()?;
            let tier = WholesaleTier {
                min_qty: numeric_field(obj.get("minQty")),
                discount_percent: numeric_field(obj.get("discountPercent")),
                price_per_unit: numeric_field(obj.get("pricePerUnit")),
            };
            if tier.min_qty.is_none()
                && tier.discount_percent.is_none()
                && tier.price_per_unit.is_none()
            {
                None
            } else {
                Some(tier)
            }
        })
        .collect();

    if tiers.is_empty() {
        Ok(None)
    } else {
        Ok(Some(tiers))
    }
}

/// Serialize normalized tiers back to the JSON text stored in the database.
pub fn rules_to_json(rules: &[WholesaleTier]) -> String {
    serde_json::to_string(rules).unwrap_or_else(|_| "[]".to_string())
}

/// Extract a finite numeric field; accepts numbers and numeric strings.
fn numeric_field(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_no_rules() {
        assert_eq!(normalize_rules("").unwrap(), None);
        assert_eq!(normalize_rules("   ").unwrap(), None);
        assert_eq!(normalize_value(Value::Null).unwrap(), None);
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            normalize_rules("{not json"),
            Err(WholesaleError::InvalidJson)
        ));
    }

    #[test]
    fn non_array_non_tiers_shape_is_rejected() {
        assert!(matches!(
            normalize_rules("42"),
            Err(WholesaleError::InvalidShape)
        ));
        assert!(matches!(
            normalize_rules("\"tiers\""),
            Err(WholesaleError::InvalidShape)
        ));
        assert!(matches!(
            normalize_rules(r#"{"rules": []}"#),
            Err(WholesaleError::InvalidShape)
        ));
    }

    #[test]
    fn accepts_array_and_tiers_object() {
        let from_array = normalize_rules(r#"[{"minQty": 5, "discountPercent": 10}]"#)
            .unwrap()
            .unwrap();
        let from_object = normalize_rules(r#"{"tiers": [{"minQty": 5, "discountPercent": 10}]}"#)
            .unwrap()
            .unwrap();
        assert_eq!(from_array, from_object);
        assert_eq!(from_array[0].min_qty, Some(5.0));
        assert_eq!(from_array[0].discount_percent, Some(10.0));
        assert_eq!(from_array[0].price_per_unit, None);
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let tiers = normalize_rules(r#"[{"minQty": "12", "pricePerUnit": "1.75"}]"#)
            .unwrap()
            .unwrap();
        assert_eq!(tiers[0].min_qty, Some(12.0));
        assert_eq!(tiers[0].price_per_unit, Some(1.75));
    }

    #[test]
    fn tiers_without_numeric_fields_are_dropped() {
        let tiers = normalize_rules(
            r#"[{"minQty": 5}, {"note": "not a tier"}, {"minQty": "abc"}, null, 7]"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(tiers.len(), 1);
        assert_eq!(tiers[0].min_qty, Some(5.0));
    }

    #[test]
    fn all_tiers_dropped_normalizes_to_none() {
        assert_eq!(normalize_rules(r#"[{"note": "x"}, {}]"#).unwrap(), None);
        assert_eq!(normalize_rules("[]").unwrap(), None);
        assert_eq!(normalize_rules(r#"{"tiers": []}"#).unwrap(), None);
    }

    #[test]
    fn round_trips_through_storage_json() {
        let tiers = normalize_rules(r#"{"tiers": [{"minQty": 5, "discountPercent": 10}]}"#)
            .unwrap()
            .unwrap();
        let stored = rules_to_json(&tiers);
        let read_back: Vec<WholesaleTier> = serde_json::from_str(&stored).unwrap();
        assert_eq!(read_back, tiers);
        assert_eq!(stored, r#"[{"minQty":5.0,"discountPercent":10.0}]"#);
    }

    #[test]
    fn non_finite_values_are_ignored() {
        let tiers = normalize_rules(r#"[{"minQty": "NaN", "discountPercent": 15}]"#)
            .unwrap()
            .unwrap();
        assert_eq!(tiers[0].min_qty, None);
        assert_eq!(tiers[0].discount_percent, Some(15.0));
    }
}
