// src/pipeline/crawl.rs

//! Listing crawling pipeline.

use std::sync::Arc;

use crate::error::Result;
use crate::models::{Config, CrawlOutcome};
use crate::services::ListingCrawler;
use crate::utils::http::PageFetcher;

/// Run the listing crawler and log a summary of the run.
pub async fn run_crawler(
    config: Arc<Config>,
    fetcher: Arc<dyn PageFetcher>,
) -> Result<CrawlOutcome> {
    log::info!("Crawling listings from {}", config.site.page_url(1));

    let crawler = ListingCrawler::new(config, fetcher)?;
    let outcome = crawler.fetch_all().await?;

    let stats = &outcome.stats;
    log::info!(
        "Crawl finished in {}s: {} page(s), {} listing(s)",
        stats.elapsed_secs(),
        stats.page_count,
        stats.listing_count
    );
    if stats.page_failures > 0 {
        log::warn!("{} index page(s) skipped", stats.page_failures);
    }
    if stats.detail_failures > 0 {
        log::warn!(
            "{} listing(s) could not be loaded ({:.1}% success)",
            stats.detail_failures,
            stats.success_rate() * 100.0
        );
    }

    Ok(outcome)
}
