//! Category search with optional color, size and price filters.
//!
//! Filtering happens in stages, in this order:
//!
//! 1. **Category**: rows whose level 1, 2 or 3 category equals the query's,
//!    ignoring case.
//! 2. **Color / size** (only when either is given): rows are walked in
//!    catalog order and their `tier_variation` decoded. A row is rejected if
//!    it has a `colors` axis lacking the requested color, a `sizes` axis
//!    lacking the requested size, or zero stock. A row with no such axis is
//!    not rejected by that filter. The walk stops at the fifth accepted row,
//!    so later rows are never decoded.
//! 3. **Price**: inclusive bounds over whatever survived stage 1 or 2.
//! 4. **Cap**: at most [`MAX_SEARCH_RESULTS`] rows are returned.
//!
//! Zero-stock rows are only dropped in stage 2. A category-only search
//! returns them.

use rust_decimal::Decimal;
use shopguide_core::{CatalogRow, PriceRange, SearchResultRecord};
use shopguide_parse::LinkFormatter;

use crate::catalog::Catalog;
use crate::decode;
use crate::error::SearchError;

/// Upper bound on results per search, and the point at which color/size
/// filtering stops scanning.
pub const MAX_SEARCH_RESULTS: usize = 5;

/// Validated search input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    category: String,
    color: Option<String>,
    size: Option<String>,
    price_range: Option<PriceRange>,
}

impl SearchQuery {
    /// Starts a query for `category`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::BlankCategory`] if `category` is empty or
    /// whitespace.
    pub fn new(category: &str) -> Result<Self, SearchError> {
        if category.trim().is_empty() {
            return Err(SearchError::BlankCategory);
        }
        Ok(Self {
            category: category.to_owned(),
            color: None,
            size: None,
            price_range: None,
        })
    }

    /// Requires the color option `color` (exact, case-sensitive). Blank
    /// values leave the filter off.
    #[must_use]
    pub fn with_color(mut self, color: Option<&str>) -> Self {
        self.color = color.filter(|c| !c.is_empty()).map(str::to_owned);
        self
    }

    /// Requires the size option `size` (exact, case-sensitive). Blank values
    /// leave the filter off.
    #[must_use]
    pub fn with_size(mut self, size: Option<&str>) -> Self {
        self.size = size.filter(|s| !s.is_empty()).map(str::to_owned);
        self
    }

    #[must_use]
    pub fn with_price_range(mut self, price_range: Option<PriceRange>) -> Self {
        self.price_range = price_range;
        self
    }

    /// Parses textual price bounds, e.g. from a command line or query string.
    /// Returns `None` when neither bound is given.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPriceBound`] for a non-numeric bound and
    /// [`SearchError::InvalidPriceRange`] for a negative or inverted range.
    pub fn parse_price_range(
        min: Option<&str>,
        max: Option<&str>,
    ) -> Result<Option<PriceRange>, SearchError> {
        let parse = |bound: &'static str, raw: Option<&str>| -> Result<Option<Decimal>, SearchError> {
            raw.map(str::trim)
                .filter(|r| !r.is_empty())
                .map(|r| {
                    r.parse::<Decimal>()
                        .or_else(|_| Decimal::from_scientific(r))
                        .map_err(|_| SearchError::InvalidPriceBound {
                            bound,
                            raw: r.to_owned(),
                        })
                })
                .transpose()
        };

        let min = parse("min", min)?;
        let max = parse("max", max)?;
        if min.is_none() && max.is_none() {
            return Ok(None);
        }
        Ok(Some(PriceRange::new(min, max)?))
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    #[must_use]
    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    #[must_use]
    pub fn price_range(&self) -> Option<&PriceRange> {
        self.price_range.as_ref()
    }

    fn filters_variations(&self) -> bool {
        self.color.is_some() || self.size.is_some()
    }
}

/// Runs `query` against `catalog`, returning at most [`MAX_SEARCH_RESULTS`]
/// records in catalog order. No match yields an empty list.
#[must_use]
pub fn search_products(
    catalog: &Catalog,
    links: &LinkFormatter,
    query: &SearchQuery,
) -> Vec<SearchResultRecord> {
    let candidates = catalog.in_category(query.category());

    let mut matches: Vec<&CatalogRow> = if query.filters_variations() {
        select_variation_matches(candidates, query.color(), query.size())
    } else {
        candidates.collect()
    };

    if let Some(range) = query.price_range() {
        matches.retain(|row| range.contains(row.price));
    }
    matches.truncate(MAX_SEARCH_RESULTS);

    tracing::debug!(
        category = query.category(),
        color = query.color(),
        size = query.size(),
        results = matches.len(),
        "search completed"
    );

    matches
        .into_iter()
        .map(|row| to_result(row, links))
        .collect()
}

/// Stage 2: walks `rows` until [`MAX_SEARCH_RESULTS`] rows pass the color,
/// size and stock checks.
fn select_variation_matches<'a>(
    rows: impl Iterator<Item = &'a CatalogRow>,
    color: Option<&str>,
    size: Option<&str>,
) -> Vec<&'a CatalogRow> {
    let mut accepted = Vec::with_capacity(MAX_SEARCH_RESULTS);
    for row in rows {
        let variations = decode::variations(row);
        if !offers(variations.colors(), color) || !offers(variations.sizes(), size) {
            continue;
        }
        if row.stock == 0 {
            continue;
        }
        accepted.push(row);
        if accepted.len() >= MAX_SEARCH_RESULTS {
            break;
        }
    }
    accepted
}

/// An axis the item does not have never rejects it.
fn offers(options: Option<&[String]>, wanted: Option<&str>) -> bool {
    match (options, wanted) {
        (Some(options), Some(wanted)) => options.iter().any(|o| o == wanted),
        _ => true,
    }
}

fn to_result(row: &CatalogRow, links: &LinkFormatter) -> SearchResultRecord {
    let variations = decode::variations(row);
    SearchResultRecord {
        item_id: row.item_id,
        name: row.name.clone(),
        stock: row.stock,
        url: links.product_url(row.shop_id, row.item_id),
        image: links.image_url(variations.first_image().unwrap_or_default()),
        price: row.price,
    }
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
