//! Decoder for the `global_attribute_details` catalog column.
//!
//! Cells look like
//! `[{attribute_id=100010, name=Material, value=Cotton, brand_option=null}, ...]`.
//! Only the `name=…,…value=…` pairing inside each `{...}` group is read.

use std::sync::LazyLock;

use regex::Regex;
use shopguide_core::{AttributeMap, AttributeValue};

use crate::error::ParseError;

/// `name=` up to the next comma, then the nearest `value=` before the group's
/// closing brace. The lazy gap keeps each match inside one group.
static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"name=([^,]+),[^}]*?value=([^,}]+)").expect("valid attribute regex")
});

/// Decodes a `global_attribute_details` cell into name → value(s).
///
/// A name seen once maps to [`AttributeValue::Single`]. A name seen several
/// times maps to its distinct values; if they all turn out equal it stays a
/// single value. Absent or blank input decodes to an empty map.
///
/// # Errors
///
/// Returns [`ParseError::EmptyAttributeName`] if a matched name is blank.
pub fn parse_global_attributes(raw: Option<&str>) -> Result<AttributeMap, ParseError> {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Ok(AttributeMap::new());
    };

    let mut collected: Vec<(String, Vec<String>)> = Vec::new();
    for caps in ATTRIBUTE_RE.captures_iter(raw) {
        let (Some(name_match), Some(value_match)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let name = name_match.as_str().trim();
        if name.is_empty() {
            return Err(ParseError::EmptyAttributeName {
                offset: name_match.start(),
            });
        }
        let value = value_match.as_str().trim().to_owned();

        match collected.iter_mut().find(|(seen, _)| seen == name) {
            Some((_, values)) => values.push(value),
            None => collected.push((name.to_owned(), vec![value])),
        }
    }

    Ok(collected
        .into_iter()
        .map(|(name, values)| (name, collapse(values)))
        .collect())
}

/// Deduplicates `values` (first occurrence wins) and unwraps a lone survivor.
fn collapse(values: Vec<String>) -> AttributeValue {
    let mut distinct: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        if !distinct.contains(&value) {
            distinct.push(value);
        }
    }
    if distinct.len() == 1 {
        AttributeValue::Single(distinct.remove(0))
    } else {
        AttributeValue::Multiple(distinct)
    }
}
