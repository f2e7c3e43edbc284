//! Command handlers for the CLI.
//!
//! Each handler returns the JSON text to print so `main` owns stdout.

use clap::Args;
use shopguide_catalog::{ProductService, SearchError, SearchQuery};

#[derive(Debug, Args)]
pub(crate) struct SearchArgs {
    /// Category to match at any level, ignoring case
    #[arg(long)]
    pub(crate) category: String,

    /// Required color option (exact match)
    #[arg(long)]
    pub(crate) color: Option<String>,

    /// Required size option (exact match)
    #[arg(long)]
    pub(crate) size: Option<String>,

    /// Lowest accepted price, inclusive
    #[arg(long, value_name = "PRICE")]
    pub(crate) min_price: Option<String>,

    /// Highest accepted price, inclusive
    #[arg(long, value_name = "PRICE")]
    pub(crate) max_price: Option<String>,
}

impl SearchArgs {
    pub(crate) fn to_query(&self) -> Result<SearchQuery, SearchError> {
        let query = SearchQuery::new(&self.category)?;
        let price_range =
            SearchQuery::parse_price_range(self.min_price.as_deref(), self.max_price.as_deref())?;
        Ok(query
            .with_color(self.color.as_deref())
            .with_size(self.size.as_deref())
            .with_price_range(price_range))
    }
}

/// Resolves one item and renders it as pretty JSON.
///
/// # Errors
///
/// Returns an error if the id is not an integer or names no item.
pub(crate) fn run_detail(service: &ProductService, raw_item_id: &str) -> anyhow::Result<String> {
    let detail = service.resolve_raw(raw_item_id)?;
    Ok(serde_json::to_string_pretty(&detail)?)
}

/// Runs a search and renders the result array as pretty JSON. No match
/// renders `[]`.
///
/// # Errors
///
/// Returns an error if the search arguments are invalid.
pub(crate) fn run_search(service: &ProductService, args: &SearchArgs) -> anyhow::Result<String> {
    let query = args.to_query()?;
    let results = service.search(&query);
    tracing::info!(
        category = query.category(),
        results = results.len(),
        "search finished"
    );
    Ok(serde_json::to_string_pretty(&results)?)
}
