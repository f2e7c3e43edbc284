//! Decoder for the `tier_variation` catalog column.
//!
//! ## Observed shape
//!
//! ```text
//! [{name=Colors, options=[Black, Navy], images=[9a1f..., 77c0...], properties=[], type=0}, {name=Sizes, options=[S, M, L], images=null, properties=[], type=0}]
//! ```
//!
//! Records are separated by the literal `}, {`. Inside a record, `key=value`
//! pairs are comma separated, and a value may be a `[...]` list whose items
//! are themselves comma separated. There is no quoting or escaping.
//!
//! Only `name`, `options` and `images` are read. Every other key is ignored.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::ParseError;
use crate::scan::{split_list, split_top_level};

/// Key of the color axis after lowercasing, e.g. from `name=Colors`.
pub const COLORS: &str = "colors";
/// Key of the size axis after lowercasing, e.g. from `name=Sizes`.
pub const SIZES: &str = "sizes";

const RECORD_SEPARATOR: &str = "}, {";

/// Variation axes of one catalog item.
///
/// `variations` maps a lowercased axis name to its options in catalog order.
/// `images` is kept apart from the axes, so an axis literally named
/// `images` cannot shadow the image list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VariationMap {
    variations: BTreeMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    images: Option<Vec<String>>,
}

impl VariationMap {
    /// Options for the axis `name`. `name` must already be lowercased.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.variations.get(name).map(Vec::as_slice)
    }

    #[must_use]
    pub fn colors(&self) -> Option<&[String]> {
        self.get(COLORS)
    }

    #[must_use]
    pub fn sizes(&self) -> Option<&[String]> {
        self.get(SIZES)
    }

    #[must_use]
    pub fn images(&self) -> Option<&[String]> {
        self.images.as_deref()
    }

    /// The first image hash, if the item lists any.
    #[must_use]
    pub fn first_image(&self) -> Option<&str> {
        self.images
            .as_ref()
            .and_then(|images| images.first())
            .map(String::as_str)
    }

    /// Lowercased axis names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variations.keys().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variations.is_empty() && self.images.is_none()
    }

    /// Renders the map back into the catalog's `tier_variation` format.
    ///
    /// Each axis becomes one record; images, when present, become a trailing
    /// record of their own. Option values containing `,` `[` `]` or the
    /// record separator do not survive a re-parse, since the format has no
    /// escaping.
    #[must_use]
    pub fn to_raw(&self) -> String {
        let mut records: Vec<String> = self
            .variations
            .iter()
            .map(|(name, options)| format!("{{name={name}, options=[{}]}}", options.join(", ")))
            .collect();
        if let Some(images) = &self.images {
            records.push(format!("{{images=[{}]}}", images.join(", ")));
        }

        format!("[{}]", records.join(", "))
    }
}

/// Decodes a `tier_variation` cell.
///
/// Absent, blank, and record-free input all decode to an empty map.
///
/// # Errors
///
/// Returns [`ParseError::UnbalancedBrackets`] if a record's list brackets do
/// not pair up, or [`ParseError::InvalidVariationName`] if a record carrying
/// `options` has a `null` or list-valued `name`.
pub fn parse_tier_variation(raw: Option<&str>) -> Result<VariationMap, ParseError> {
    let mut map = VariationMap::default();
    decode_into(raw, &mut map)?;
    Ok(map)
}

/// Decodes a `tier_variation` cell, keeping whatever was decoded before the
/// first malformed record.
///
/// The error, if any, is returned alongside the partial map so callers can
/// log it and carry on with the attributes that did decode.
#[must_use]
pub fn parse_tier_variation_partial(raw: Option<&str>) -> (VariationMap, Option<ParseError>) {
    let mut map = VariationMap::default();
    let error = decode_into(raw, &mut map).err();
    (map, error)
}

fn decode_into(raw: Option<&str>, map: &mut VariationMap) -> Result<(), ParseError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(());
    };
    let body = raw.trim_matches(|c| c == '[' || c == ']');

    for (index, record) in body.split(RECORD_SEPARATOR).enumerate() {
        let cleaned: String = record.chars().filter(|&c| c != '{' && c != '}').collect();
        let fields = RecordFields::parse(&cleaned, index)?;
        fields.apply(map, index)?;
    }
    Ok(())
}

/// A decoded pair value.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FieldValue<'a> {
    Null,
    Text(&'a str),
    List(Vec<&'a str>),
}

impl<'a> FieldValue<'a> {
    fn parse(raw: &'a str) -> Self {
        let value = raw.trim();
        if let Some(inner) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
            FieldValue::List(split_list(inner))
        } else if value.eq_ignore_ascii_case("null") {
            FieldValue::Null
        } else {
            FieldValue::Text(value)
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Text(_) => "text",
            FieldValue::List(_) => "list",
        }
    }

    fn into_strings(self) -> Vec<String> {
        match self {
            FieldValue::Null => Vec::new(),
            FieldValue::Text(text) => vec![text.to_owned()],
            FieldValue::List(items) => items.into_iter().map(str::to_owned).collect(),
        }
    }
}

/// The three keys this decoder cares about, for one record. A key repeated
/// within the record keeps its last value.
#[derive(Debug, Default)]
struct RecordFields<'a> {
    name: Option<FieldValue<'a>>,
    options: Option<FieldValue<'a>>,
    images: Option<FieldValue<'a>>,
}

impl<'a> RecordFields<'a> {
    fn parse(record: &'a str, index: usize) -> Result<Self, ParseError> {
        let pairs =
            split_top_level(record).ok_or(ParseError::UnbalancedBrackets { record: index })?;

        let mut fields = RecordFields::default();
        for pair in pairs {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            let slot = match key.trim() {
                "name" => &mut fields.name,
                "options" => &mut fields.options,
                "images" => &mut fields.images,
                _ => continue,
            };
            *slot = Some(FieldValue::parse(value));
        }
        Ok(fields)
    }

    fn apply(self, map: &mut VariationMap, index: usize) -> Result<(), ParseError> {
        if let (Some(name), Some(options)) = (self.name, self.options) {
            let name = match name {
                FieldValue::Text(name) => name,
                other => {
                    return Err(ParseError::InvalidVariationName {
                        record: index,
                        found: other.kind(),
                    })
                }
            };
            // `options=null` names an axis with nothing to choose from.
            if options != FieldValue::Null {
                map.variations
                    .insert(name.to_lowercase(), options.into_strings());
            }
        }
        if let Some(images) = self.images {
            map.images = Some(images.into_strings());
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "variation_test.rs"]
mod tests;
