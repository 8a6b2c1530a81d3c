use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use route_mixer::api::{SearchQuery, answer};
use route_mixer::catalog::{Catalog, CatalogFile, demo_catalog};
use route_mixer::planner::{SearchConfig, SearchService};
use tracing_subscriber::EnvFilter;

/// Find ranked multi-modal itineraries between two locations.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON catalog document; the built-in demo network is used without one
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Starting location label
    source: String,

    /// Target location label
    destination: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr so stdout stays pure JSON; RUST_LOG=debug shows searches
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let (catalog, config) = match &args.catalog {
        Some(path) => match CatalogFile::from_path(path) {
            Ok(file) => {
                let catalog = match Catalog::from_source(&file) {
                    Ok(catalog) => catalog,
                    Err(never) => match never {},
                };
                (catalog, file.config)
            }
            Err(e) => {
                eprintln!("Failed to load catalog {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => (demo_catalog(), SearchConfig::default()),
    };

    eprintln!(
        "Loaded {} legs between {} locations",
        catalog.len(),
        catalog.locations().len()
    );

    let service = SearchService::new(Arc::new(catalog), config);
    let query = SearchQuery {
        source: args.source,
        destination: args.destination,
    };

    match answer(&service, &query).await {
        Ok(response) => match serde_json::to_string_pretty(&response) {
            Ok(body) => {
                println!("{body}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to encode response: {e}");
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            eprintln!("Search failed: {}", err.error);
            ExitCode::FAILURE
        }
    }
}
