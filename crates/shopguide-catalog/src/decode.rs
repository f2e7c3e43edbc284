//! Lenient attribute decoding for catalog rows.
//!
//! Lookups and searches must still answer when a cell is malformed, so
//! decode failures are logged and replaced by whatever did decode (possibly
//! nothing).

use shopguide_core::{AttributeMap, CatalogRow};
use shopguide_parse::{parse_global_attributes, parse_tier_variation_partial, VariationMap};

pub(crate) fn variations(row: &CatalogRow) -> VariationMap {
    let (map, error) = parse_tier_variation_partial(row.tier_variation.as_deref());
    if let Some(error) = error {
        tracing::debug!(
            item_id = row.item_id,
            %error,
            "tier_variation only partially decoded"
        );
    }
    map
}

pub(crate) fn global_attributes(row: &CatalogRow) -> AttributeMap {
    parse_global_attributes(row.global_attribute_details.as_deref()).unwrap_or_else(|error| {
        tracing::debug!(
            item_id = row.item_id,
            %error,
            "global_attribute_details could not be decoded"
        );
        AttributeMap::new()
    })
}
