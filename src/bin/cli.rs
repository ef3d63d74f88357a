//! Listing Crawler CLI
//!
//! Crawls the configured internship board and exports the listings.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use listing_crawler::{
    error::Result,
    models::Config,
    pipeline::{self, ExportSummary},
    storage::LocalStorage,
    utils::http::HttpFetcher,
};

/// Listing Crawler - Internship Board Exporter
#[derive(Parser, Debug)]
#[command(
    name = "listing-crawler",
    version,
    about = "Crawls an internship board into delimited text files"
)]
struct Cli {
    /// Path to storage directory containing config and output files
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl every listing and write the full and filtered tables
    Crawl {
        /// Requirements keyword (default: filter.keyword from config)
        #[arg(short, long)]
        keyword: Option<String>,
    },

    /// Rewrite the filtered table from the stored full table
    Filter {
        /// Requirements keyword (default: filter.keyword from config)
        #[arg(short, long)]
        keyword: Option<String>,
    },

    /// Validate configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn log_summary(summary: &ExportSummary) {
    let verb = if summary.listings_written {
        "saved to"
    } else {
        "loaded from"
    };
    log::info!(
        "{} listings {} {}",
        summary.listings_count,
        verb,
        summary.listings_path.display()
    );
    log::info!(
        "{} filtered listings saved to {}",
        summary.filtered_count,
        summary.filtered_path.display()
    );
}

/// Main entry point for the CLI application.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("Listing crawler starting...");

    let config_path = cli.storage_dir.join("config.toml");
    let config = Config::load_or_default(&config_path);
    log::info!("Loaded configuration from {}", cli.storage_dir.display());

    let storage = LocalStorage::new(&cli.storage_dir);

    match cli.command {
        Command::Crawl { keyword } => {
            config.validate()?;
            let keyword = pipeline::resolve_keyword(&config, keyword)?;
            let fetcher = Arc::new(HttpFetcher::new(&config.crawler)?);

            log::info!("This may take several minutes...");
            let summary =
                pipeline::run_pipeline(Arc::new(config), fetcher, &storage, &keyword).await?;
            log_summary(&summary);
            log::info!("Crawl complete!");
        }

        Command::Filter { keyword } => {
            config.validate()?;
            let keyword = pipeline::resolve_keyword(&config, keyword)?;
            let summary = pipeline::run_filter(&config, &storage, &keyword).await?;
            log_summary(&summary);
        }

        Command::Validate => {
            pipeline::run_validate(&config)?;
            log::info!("All validations passed!");
        }
    }

    log::info!("Done!");

    Ok(())
}
