//! Shared entry point bundling a loaded catalog with its link settings.

use std::sync::Arc;

use shopguide_core::{DetailRecord, SearchResultRecord};
use shopguide_parse::LinkFormatter;

use crate::catalog::Catalog;
use crate::detail::{parse_item_id, resolve_product};
use crate::error::LookupError;
use crate::search::{search_products, SearchQuery};

/// Cheaply cloneable handle over an immutable [`Catalog`].
#[derive(Debug, Clone)]
pub struct ProductService {
    catalog: Arc<Catalog>,
    links: LinkFormatter,
}

impl ProductService {
    #[must_use]
    pub fn new(catalog: Catalog, links: LinkFormatter) -> Self {
        Self {
            catalog: Arc::new(catalog),
            links,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn links(&self) -> &LinkFormatter {
        &self.links
    }

    /// # Errors
    ///
    /// Returns [`LookupError::NotFound`] for an unknown `item_id`.
    pub fn resolve(&self, item_id: i64) -> Result<DetailRecord, LookupError> {
        resolve_product(&self.catalog, &self.links, item_id)
    }

    /// Like [`resolve`](Self::resolve) but takes the identifier as text.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::InvalidItemId`] if `raw` is not an integer, or
    /// [`LookupError::NotFound`] if no item has that id.
    pub fn resolve_raw(&self, raw: &str) -> Result<DetailRecord, LookupError> {
        self.resolve(parse_item_id(raw)?)
    }

    #[must_use]
    pub fn search(&self, query: &SearchQuery) -> Vec<SearchResultRecord> {
        search_products(&self.catalog, &self.links, query)
    }
}
