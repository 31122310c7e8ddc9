//! Typed multipart parsing for product payloads
//!
//! Product create/update requests arrive as multipart forms (text fields
//! plus an optional `image` file). Every field is a string on the wire, so
//! this layer coerces them into a typed command before any business logic
//! runs: numeric fields are parsed when present and non-empty, booleans
//! come as "true"/"false" strings, and wholesale rules go through strict
//! JSON normalization.

use std::collections::HashMap;

use axum::extract::Multipart;

use crate::db::models::{ProductCreate, ProductKind, ProductUpdate};
use crate::pricing::{WholesaleTier, wholesale};
use crate::utils::AppError;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};

/// Raw multipart payload: text fields plus the optional image bytes
#[derive(Debug, Default)]
pub struct ProductForm {
    pub fields: HashMap<String, String>,
    pub image: Option<Vec<u8>>,
}

/// Parsed update command plus the image directives that ride along with it
#[derive(Debug)]
pub struct ProductUpdateForm {
    pub update: ProductUpdate,
    /// `clearImage=true` drops the current image reference
    pub clear_image: bool,
}

/// Drain a multipart request into text fields and the optional image part
pub async fn read_form(mut multipart: Multipart) -> Result<ProductForm, AppError> {
    let mut form = ProductForm::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "image" {
            let data = field.bytes().await?;
            if !data.is_empty() {
                form.image = Some(data.to_vec());
            }
        } else {
            let value = field.text().await?;
            form.fields.insert(name, value);
        }
    }
    Ok(form)
}

/// Build a create command from the text fields
pub fn parse_create(fields: &HashMap<String, String>) -> Result<ProductCreate, AppError> {
    let name = fields.get("name").cloned().unwrap_or_default();
    validate_required_text(&name, "name", MAX_NAME_LEN)?;

    Ok(ProductCreate {
        name,
        description: optional_text(fields, "description"),
        kind: parse_kind(fields)?.unwrap_or_default(),
        unit_id: parse_i64(fields, "unitId")?
            .ok_or_else(|| AppError::validation("unitId is required"))?,
        category_id: parse_i64(fields, "categoryId")?,
        standard_weight_grams: parse_f64(fields, "standardWeightGrams")?.unwrap_or(0.0),
        net_weight: parse_f64(fields, "netWeight")?.unwrap_or(0.0),
        stock: parse_f64(fields, "stock")?.unwrap_or(0.0),
        min_stock: parse_f64(fields, "minStock")?.unwrap_or(0.0),
        price: parse_f64(fields, "price")?.unwrap_or(0.0),
        distributor_price: parse_f64(fields, "distributorPrice")?.unwrap_or(0.0),
        tax_rate: parse_f64(fields, "taxRate")?.unwrap_or(0.0),
        sku: optional_text(fields, "sku"),
        barcode: optional_text(fields, "barcode"),
        wholesale_rules: parse_wholesale(fields)?.flatten(),
        // Taken verbatim when no file is uploaded; the handler overwrites
        // this with the stored filename when one is.
        primary_image_url: optional_text(fields, "primaryImageUrl"),
        is_active: parse_bool(fields, "isActive").unwrap_or(true),
    })
}

/// Build an update command from the text fields. Absent fields stay
/// untouched; an explicit empty `primaryImageUrl` clears the reference.
pub fn parse_update(fields: &HashMap<String, String>) -> Result<ProductUpdateForm, AppError> {
    if let Some(name) = fields.get("name") {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }

    let primary_image_url = fields
        .get("primaryImageUrl")
        .map(|v| (!v.trim().is_empty()).then(|| v.clone()));

    let update = ProductUpdate {
        name: fields.get("name").cloned(),
        description: optional_text(fields, "description"),
        kind: parse_kind(fields)?,
        unit_id: parse_i64(fields, "unitId")?,
        category_id: parse_i64(fields, "categoryId")?,
        standard_weight_grams: parse_f64(fields, "standardWeightGrams")?,
        net_weight: parse_f64(fields, "netWeight")?,
        stock: parse_f64(fields, "stock")?,
        min_stock: parse_f64(fields, "minStock")?,
        price: parse_f64(fields, "price")?,
        distributor_price: parse_f64(fields, "distributorPrice")?,
        tax_rate: parse_f64(fields, "taxRate")?,
        sku: optional_text(fields, "sku"),
        barcode: optional_text(fields, "barcode"),
        is_active: parse_bool(fields, "isActive"),
        wholesale_rules: parse_wholesale(fields)?,
        primary_image_url,
    };

    Ok(ProductUpdateForm {
        update,
        clear_image: parse_bool(fields, "clearImage").unwrap_or(false),
    })
}

/// Outer `None`: neither rules field was sent. Inner value: the normalized
/// tier list, `None` when the input reduced to no rules.
fn parse_wholesale(
    fields: &HashMap<String, String>,
) -> Result<Option<Option<Vec<WholesaleTier>>>, AppError> {
    let raw = fields
        .get("wholesaleRules")
        .or_else(|| fields.get("wholesaleRulesText"));
    match raw {
        Some(input) => wholesale::normalize_rules(input)
            .map(Some)
            .map_err(|e| AppError::validation(e.to_string())),
        None => Ok(None),
    }
}

fn parse_kind(fields: &HashMap<String, String>) -> Result<Option<ProductKind>, AppError> {
    match fields.get("kind").map(|v| v.trim()) {
        Some("") | None => Ok(None),
        Some(value) => ProductKind::parse(value)
            .map(Some)
            .ok_or_else(|| AppError::validation(format!("Unknown product kind '{value}'"))),
    }
}

/// Numeric coercion: present and non-empty → must parse
fn parse_f64(fields: &HashMap<String, String>, key: &str) -> Result<Option<f64>, AppError> {
    match fields.get(key).map(|v| v.trim()) {
        Some("") | None => Ok(None),
        Some(value) => value
            .parse::<f64>()
            .map(Some)
            .map_err(|_| AppError::validation(format!("{key} must be numeric"))),
    }
}

fn parse_i64(fields: &HashMap<String, String>, key: &str) -> Result<Option<i64>, AppError> {
    match fields.get(key).map(|v| v.trim()) {
        Some("") | None => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| AppError::validation(format!("{key} must be an integer id"))),
    }
}

/// String-or-boolean coercion: anything other than "true" is false
fn parse_bool(fields: &HashMap<String, String>, key: &str) -> Option<bool> {
    fields.get(key).map(|v| v.trim() == "true")
}

fn optional_text(fields: &HashMap<String, String>, key: &str) -> Option<String> {
    fields
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn create_coerces_numeric_fields() {
        let cmd = parse_create(&fields(&[
            ("name", "Pan integral"),
            ("unitId", "3"),
            ("price", "1.50"),
            ("stock", "20"),
        ]))
        .unwrap();
        assert_eq!(cmd.unit_id, 3);
        assert_eq!(cmd.price, 1.5);
        assert_eq!(cmd.stock, 20.0);
        assert_eq!(cmd.tax_rate, 0.0);
        assert!(cmd.is_active);
    }

    #[test]
    fn create_requires_name_and_unit() {
        assert!(parse_create(&fields(&[("unitId", "1")])).is_err());
        assert!(parse_create(&fields(&[("name", "Croissant")])).is_err());
    }

    #[test]
    fn non_numeric_value_is_a_validation_error() {
        let err = parse_create(&fields(&[
            ("name", "Croissant"),
            ("unitId", "1"),
            ("price", "abc"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn empty_numeric_field_is_ignored() {
        let cmd = parse_create(&fields(&[
            ("name", "Croissant"),
            ("unitId", "1"),
            ("price", ""),
        ]))
        .unwrap();
        assert_eq!(cmd.price, 0.0);
    }

    #[test]
    fn is_active_string_coercion() {
        let on = parse_create(&fields(&[
            ("name", "P"),
            ("unitId", "1"),
            ("isActive", "true"),
        ]))
        .unwrap();
        let off = parse_create(&fields(&[
            ("name", "P"),
            ("unitId", "1"),
            ("isActive", "false"),
        ]))
        .unwrap();
        let weird = parse_create(&fields(&[
            ("name", "P"),
            ("unitId", "1"),
            ("isActive", "yes"),
        ]))
        .unwrap();
        assert!(on.is_active);
        assert!(!off.is_active);
        assert!(!weird.is_active);
    }

    #[test]
    fn wholesale_rules_text_fallback() {
        let cmd = parse_create(&fields(&[
            ("name", "P"),
            ("unitId", "1"),
            ("wholesaleRulesText", r#"[{"minQty": 5, "discountPercent": 10}]"#),
        ]))
        .unwrap();
        let rules = cmd.wholesale_rules.unwrap();
        assert_eq!(rules[0].min_qty, Some(5.0));
    }

    #[test]
    fn malformed_wholesale_rules_fail_validation() {
        let err = parse_create(&fields(&[
            ("name", "P"),
            ("unitId", "1"),
            ("wholesaleRules", "{broken"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn update_leaves_absent_fields_untouched() {
        let parsed = parse_update(&fields(&[("price", "2.25")])).unwrap();
        assert_eq!(parsed.update.price, Some(2.25));
        assert_eq!(parsed.update.name, None);
        assert_eq!(parsed.update.wholesale_rules, None);
        assert_eq!(parsed.update.primary_image_url, None);
        assert!(!parsed.clear_image);
    }

    #[test]
    fn update_empty_image_url_clears_reference() {
        let parsed = parse_update(&fields(&[("primaryImageUrl", "")])).unwrap();
        assert_eq!(parsed.update.primary_image_url, Some(None));

        let parsed = parse_update(&fields(&[("primaryImageUrl", "pan.jpg")])).unwrap();
        assert_eq!(
            parsed.update.primary_image_url,
            Some(Some("pan.jpg".to_string()))
        );
    }

    #[test]
    fn update_wholesale_rules_reducing_to_empty_clear_rules() {
        let parsed = parse_update(&fields(&[("wholesaleRules", "[]")])).unwrap();
        assert_eq!(parsed.update.wholesale_rules, Some(None));
    }

    #[test]
    fn clear_image_flag() {
        let parsed = parse_update(&fields(&[("clearImage", "true")])).unwrap();
        assert!(parsed.clear_image);
    }
}
