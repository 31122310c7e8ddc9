//! Pricing rules
//!
//! Wholesale tier normalization shared by product and catalog payloads.

pub mod wholesale;

pub use wholesale::{WholesaleError, WholesaleTier, normalize_rules, rules_to_json};
