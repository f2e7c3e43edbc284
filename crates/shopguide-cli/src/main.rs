mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shopguide_catalog::{Catalog, ProductService};
use shopguide_parse::LinkFormatter;
use tracing_subscriber::EnvFilter;

use crate::commands::SearchArgs;

#[derive(Debug, Parser)]
#[command(name = "shopguide")]
#[command(about = "Product detail lookup and filtered search over a catalog export")]
struct Cli {
    /// CSV catalog file. Overrides `SHOPGUIDE_CATALOG_PATH`.
    #[arg(long, global = true, value_name = "PATH")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the full record for one item as JSON
    Detail {
        /// Numeric item id, e.g. 23649650636
        item_id: String,
    },
    /// Search a category, optionally narrowed by color, size and price
    Search(SearchArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = shopguide_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let catalog = Catalog::from_path(config.catalog_path(cli.catalog.as_deref())?)?;
    let service = ProductService::new(catalog, LinkFormatter::from_config(&config));

    let output = match cli.command {
        Commands::Detail { item_id } => commands::run_detail(&service, &item_id)?,
        Commands::Search(args) => commands::run_search(&service, &args)?,
    };
    println!("{output}");

    Ok(())
}
