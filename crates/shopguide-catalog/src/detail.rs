//! Single-item detail resolution.

use shopguide_core::DetailRecord;
use shopguide_parse::{clean_description, LinkFormatter};

use crate::catalog::Catalog;
use crate::decode;
use crate::error::LookupError;

/// Parses an integer-like item identifier as supplied by callers, e.g. `"23649650636"`.
///
/// # Errors
///
/// Returns [`LookupError::InvalidItemId`] unless `raw` is an integer.
pub fn parse_item_id(raw: &str) -> Result<i64, LookupError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| LookupError::InvalidItemId(raw.to_owned()))
}

/// Builds the full detail record for `item_id`.
///
/// Derived fields always win over same-named pass-through columns.
///
/// Malformed `tier_variation` or `global_attribute_details` cells do not fail
/// the lookup; the affected fields come back empty instead.
///
/// # Errors
///
/// Returns [`LookupError::NotFound`] if no row has this `item_id`.
pub fn resolve_product(
    catalog: &Catalog,
    links: &LinkFormatter,
    item_id: i64,
) -> Result<DetailRecord, LookupError> {
    let Some(row) = catalog.get(item_id) else {
        tracing::debug!(item_id, "item not found");
        return Err(LookupError::NotFound { item_id });
    };

    let variations = decode::variations(row);
    let size = variations.sizes().map(<[String]>::to_vec).unwrap_or_default();
    let colors = variations.colors().map(<[String]>::to_vec).unwrap_or_default();
    let image = links.image_url(variations.first_image().unwrap_or_default());

    Ok(DetailRecord {
        item_id: row.item_id,
        shop_id: row.shop_id,
        name: row.name.clone(),
        price: row.price,
        stock: row.stock,
        description: row
            .description
            .as_deref()
            .map(clean_description)
            .unwrap_or_default(),
        level1_global_be_category: row.level1_global_be_category.clone(),
        level2_global_be_category: row.level2_global_be_category.clone(),
        level3_global_be_category: row.level3_global_be_category.clone(),
        global_attribute_details: decode::global_attributes(row),
        size,
        colors,
        image,
        url: links.product_url(row.shop_id, row.item_id),
        extra: row
            .extra
            .iter()
            .filter(|(column, _)| !DetailRecord::DERIVED_FIELDS.contains(&column.as_str()))
            .map(|(column, value)| (column.clone(), value.clone()))
            .collect(),
    })
}

#[cfg(test)]
#[path = "detail_test.rs"]
mod tests;
