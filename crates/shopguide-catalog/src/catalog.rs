//! In-memory catalog and its CSV loader.
//!
//! ## Source shape
//!
//! A headered CSV export with one row per item. Column order is free and
//! unknown columns are carried through untouched, except ones named like a
//! field the detail record derives (`size`, `colors`, `image`, `url`), which
//! are dropped. Empty cells are treated as absent (`None`), for modeled and
//! unknown columns alike. Integer columns may arrive as whole floats
//! (`"12.0"`), which is how dataframe exports write integer columns that had
//! gaps.
//!
//! Loading is strict: a blank or non-numeric `item_id`, `shop_id`, `price`
//! or `stock` cell (including `NaN`) fails the whole load with
//! [`CatalogError::InvalidField`] naming the line. Such a row has no usable
//! price or stock, and search and detail output both depend on them.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use csv::StringRecord;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use shopguide_core::{CatalogRow, DetailRecord};

use crate::error::CatalogError;

/// Columns decoded into [`CatalogRow`] fields. Anything else lands in
/// [`CatalogRow::extra`].
const MODELED_COLUMNS: [&str; 12] = [
    "item_id",
    "shop_id",
    "name",
    "price",
    "stock",
    "description",
    "tier_variation",
    "global_attribute_details",
    "level1_global_be_category",
    "level2_global_be_category",
    "level3_global_be_category",
    "is_rich_text",
];

/// Immutable product catalog, in source order, indexed by `item_id`.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    rows: Vec<CatalogRow>,
    by_item_id: HashMap<i64, usize>,
}

impl Catalog {
    /// Builds a catalog from already-decoded rows, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateItemId`] if two rows share an `item_id`.
    pub fn from_rows(rows: Vec<CatalogRow>) -> Result<Self, CatalogError> {
        let mut by_item_id = HashMap::with_capacity(rows.len());
        for (idx, row) in rows.iter().enumerate() {
            if by_item_id.insert(row.item_id, idx).is_some() {
                return Err(CatalogError::DuplicateItemId {
                    item_id: row.item_id,
                });
            }
        }
        Ok(Self { rows, by_item_id })
    }

    /// Loads a catalog from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be opened, or any error
    /// from [`Catalog::from_reader`].
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let file = File::open(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_reader(file)?;
        tracing::info!(
            path = %path.display(),
            rows = catalog.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Loads a catalog from headered CSV data.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Csv`] for malformed CSV,
    /// [`CatalogError::MissingColumn`] if a required column is absent,
    /// [`CatalogError::InvalidField`] if a cell cannot be decoded, and
    /// [`CatalogError::DuplicateItemId`] for repeated ids.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);
        let columns = Columns::from_headers(csv_reader.headers()?)?;

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            rows.push(columns.decode(&record?)?);
        }
        Self::from_rows(rows)
    }

    /// All rows in source order.
    #[must_use]
    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn get(&self, item_id: i64) -> Option<&CatalogRow> {
        self.by_item_id.get(&item_id).map(|&idx| &self.rows[idx])
    }

    /// Rows whose level 1, 2 or 3 category equals `category`, ignoring case,
    /// in source order. Lazy: rows are only examined as the iterator advances.
    pub fn in_category<'a>(&'a self, category: &str) -> impl Iterator<Item = &'a CatalogRow> + 'a {
        let lower = category.to_lowercase();
        self.rows.iter().filter(move |row| row.in_category(&lower))
    }
}

/// Header positions resolved once per file.
#[derive(Debug)]
struct Columns {
    item_id: usize,
    shop_id: usize,
    name: usize,
    price: usize,
    stock: usize,
    description: Option<usize>,
    tier_variation: Option<usize>,
    global_attribute_details: Option<usize>,
    level1: Option<usize>,
    level2: Option<usize>,
    level3: Option<usize>,
    is_rich_text: Option<usize>,
    extra: Vec<(usize, String)>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self, CatalogError> {
        let position = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &'static str| position(name).ok_or(CatalogError::MissingColumn(name));

        let extra = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| (idx, header.trim()))
            .filter(|(_, header)| {
                !header.is_empty()
                    && !MODELED_COLUMNS.contains(header)
                    && !DetailRecord::DERIVED_FIELDS.contains(header)
            })
            .map(|(idx, header)| (idx, header.to_owned()))
            .collect();

        Ok(Self {
            item_id: require("item_id")?,
            shop_id: require("shop_id")?,
            name: require("name")?,
            price: require("price")?,
            stock: require("stock")?,
            description: position("description"),
            tier_variation: position("tier_variation"),
            global_attribute_details: position("global_attribute_details"),
            level1: position("level1_global_be_category"),
            level2: position("level2_global_be_category"),
            level3: position("level3_global_be_category"),
            is_rich_text: position("is_rich_text"),
            extra,
        })
    }

    fn decode(&self, record: &StringRecord) -> Result<CatalogRow, CatalogError> {
        let line = record.position().map_or(0, csv::Position::line);
        let cell = |idx: usize| record.get(idx).unwrap_or("");
        let optional = |idx: Option<usize>| {
            idx.map(cell)
                .filter(|value| !value.trim().is_empty())
                .map(str::to_owned)
        };
        let invalid = |column: &'static str| {
            move |reason: String| CatalogError::InvalidField {
                line,
                column,
                reason,
            }
        };

        let item_id = parse_integer(cell(self.item_id)).map_err(invalid("item_id"))?;
        let shop_id = parse_integer(cell(self.shop_id)).map_err(invalid("shop_id"))?;
        let price = parse_price(cell(self.price)).map_err(invalid("price"))?;
        let stock = parse_integer(cell(self.stock))
            .and_then(|v| u64::try_from(v).map_err(|_| format!("{v} is negative")))
            .map_err(invalid("stock"))?;
        let is_rich_text = match optional(self.is_rich_text) {
            Some(raw) => parse_flag(&raw).map_err(invalid("is_rich_text"))?,
            None => false,
        };

        let extra: BTreeMap<String, Option<String>> = self
            .extra
            .iter()
            .map(|(idx, header)| (header.clone(), optional(Some(*idx))))
            .collect();

        Ok(CatalogRow {
            item_id,
            shop_id,
            name: cell(self.name).to_owned(),
            price,
            stock,
            description: optional(self.description),
            tier_variation: optional(self.tier_variation),
            global_attribute_details: optional(self.global_attribute_details),
            level1_global_be_category: optional(self.level1),
            level2_global_be_category: optional(self.level2),
            level3_global_be_category: optional(self.level3),
            is_rich_text,
            extra,
        })
    }
}

/// Parses an integer cell, accepting whole floats such as `"12.0"`.
fn parse_integer(raw: &str) -> Result<i64, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("value is empty".to_string());
    }
    if let Ok(value) = raw.parse::<i64>() {
        return Ok(value);
    }
    let value = Decimal::from_str(raw).map_err(|_| format!("\"{raw}\" is not an integer"))?;
    if !value.fract().is_zero() {
        return Err(format!("\"{raw}\" is not a whole number"));
    }
    value
        .to_i64()
        .ok_or_else(|| format!("\"{raw}\" is out of range"))
}

/// Parses a price cell, accepting plain decimals and scientific notation.
fn parse_price(raw: &str) -> Result<Decimal, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("value is empty".to_string());
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| format!("\"{raw}\" is not a number"))
}

fn parse_flag(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "1.0" => Ok(true),
        "false" | "0" | "0.0" => Ok(false),
        other => Err(format!("\"{other}\" is not a boolean")),
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
