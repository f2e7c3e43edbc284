use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Product-level attributes decoded from a `global_attribute_details` cell,
/// keyed by the attribute name exactly as it appears in the catalog.
pub type AttributeMap = BTreeMap<String, AttributeValue>;

/// Value of a global attribute. Serializes as a bare string or a bare array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Single(String),
    /// Distinct values of an attribute that appeared more than once.
    /// Order is first-seen but carries no meaning.
    Multiple(Vec<String>),
}

impl AttributeValue {
    /// All values as a slice, one element for [`AttributeValue::Single`].
    #[must_use]
    pub fn values(&self) -> &[String] {
        match self {
            AttributeValue::Single(value) => std::slice::from_ref(value),
            AttributeValue::Multiple(values) => values,
        }
    }

    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.values().iter().any(|v| v == value)
    }
}

/// One row of the product catalog, as loaded from the source CSV.
///
/// Rows are immutable once loaded. Raw attribute cells are kept verbatim and
/// parsed on demand by the detail resolver and search engine.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRow {
    pub item_id: i64,
    pub shop_id: i64,
    pub name: String,
    pub price: Decimal,
    pub stock: u64,
    pub description: Option<String>,
    /// Raw `tier_variation` cell, e.g. `[{name=Colors, options=[Red, Blue], images=[h1]}]`.
    pub tier_variation: Option<String>,
    /// Raw `global_attribute_details` cell, e.g. `[{id=1, name=Material, value=Cotton}]`.
    pub global_attribute_details: Option<String>,
    pub level1_global_be_category: Option<String>,
    pub level2_global_be_category: Option<String>,
    pub level3_global_be_category: Option<String>,
    /// Internal rendering flag; never part of any output record.
    pub is_rich_text: bool,
    /// Columns the loader does not model, keyed by header name. A blank
    /// cell is `None`, like the modeled optional columns.
    pub extra: BTreeMap<String, Option<String>>,
}

impl CatalogRow {
    /// The three category levels that are present, most general first.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        [
            &self.level1_global_be_category,
            &self.level2_global_be_category,
            &self.level3_global_be_category,
        ]
        .into_iter()
        .filter_map(|c| c.as_deref())
    }

    /// Returns `true` if any category level equals `lower_category`.
    ///
    /// `lower_category` must already be lowercased; row values are lowercased
    /// here.
    #[must_use]
    pub fn in_category(&self, lower_category: &str) -> bool {
        self.categories()
            .any(|c| c.to_lowercase() == lower_category)
    }
}

/// Full detail view of a single catalog item.
///
/// Carries every catalog column except the internal `is_rich_text` flag and
/// the raw `tier_variation` cell, plus fields derived from the parsed
/// attribute strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRecord {
    pub item_id: i64,
    pub shop_id: i64,
    pub name: String,
    pub price: Decimal,
    pub stock: u64,
    /// Description with whitespace runs collapsed; empty when the catalog has none.
    pub description: String,
    pub level1_global_be_category: Option<String>,
    pub level2_global_be_category: Option<String>,
    pub level3_global_be_category: Option<String>,
    pub global_attribute_details: AttributeMap,
    /// Options of the `sizes` variation, empty when the item has none.
    pub size: Vec<String>,
    /// Options of the `colors` variation, empty when the item has none.
    pub colors: Vec<String>,
    /// Image link for the first image hash, or the no-image sentinel.
    pub image: String,
    pub url: String,
    /// Pass-through catalog columns. Never holds a [`DetailRecord::DERIVED_FIELDS`] key.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Option<String>>,
}

impl DetailRecord {
    /// Output fields computed from the row rather than copied from it. A
    /// source column with one of these names is shadowed.
    pub const DERIVED_FIELDS: [&'static str; 4] = ["size", "colors", "image", "url"];
}

/// One search hit. Exactly the six fields callers receive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultRecord {
    pub item_id: i64,
    pub name: String,
    pub stock: u64,
    pub url: String,
    pub image: String,
    pub price: Decimal,
}

/// Inclusive price bounds. A missing `min` means zero, a missing `max`
/// means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

impl PriceRange {
    /// Builds a validated range.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPriceRange`] if either bound is negative or
    /// `min` exceeds `max`.
    pub fn new(min: Option<Decimal>, max: Option<Decimal>) -> Result<Self, CoreError> {
        for (label, bound) in [("min", min), ("max", max)] {
            if let Some(value) = bound {
                if value.is_sign_negative() && !value.is_zero() {
                    return Err(CoreError::InvalidPriceRange(format!(
                        "{label} must not be negative, got {value}"
                    )));
                }
            }
        }
        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                return Err(CoreError::InvalidPriceRange(format!(
                    "min {lo} is greater than max {hi}"
                )));
            }
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.min.unwrap_or(Decimal::ZERO) && self.max.is_none_or(|max| price <= max)
    }
}
