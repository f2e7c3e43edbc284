use shopguide_core::CoreError;
use thiserror::Error;

/// Failures while loading the catalog source.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to open catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("catalog is missing required column \"{0}\"")]
    MissingColumn(&'static str),

    #[error("invalid {column} on line {line}: {reason}")]
    InvalidField {
        line: u64,
        column: &'static str,
        reason: String,
    },

    #[error("duplicate item_id {item_id}")]
    DuplicateItemId { item_id: i64 },
}

/// Failures of a single-item lookup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("item {item_id} not found")]
    NotFound { item_id: i64 },

    #[error("invalid item id \"{0}\": expected an integer")]
    InvalidItemId(String),
}

/// Rejected search input. Raised before any catalog row is examined.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("category must not be blank")]
    BlankCategory,

    #[error("invalid {bound} price \"{raw}\": expected a number")]
    InvalidPriceBound { bound: &'static str, raw: String },

    #[error(transparent)]
    InvalidPriceRange(#[from] CoreError),
}
