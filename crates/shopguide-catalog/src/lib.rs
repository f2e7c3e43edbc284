//! Read-only product catalog with item lookup and filtered search.
//!
//! The catalog is loaded once (usually from CSV) into an immutable
//! [`Catalog`] and shared by handle. Lookups and searches never mutate it,
//! so a single instance can serve concurrent callers without locking.

pub mod catalog;
mod decode;
pub mod detail;
pub mod error;
pub mod search;
pub mod service;

pub use catalog::Catalog;
pub use detail::{parse_item_id, resolve_product};
pub use error::{CatalogError, LookupError, SearchError};
pub use search::{search_products, SearchQuery, MAX_SEARCH_RESULTS};
pub use service::ProductService;
