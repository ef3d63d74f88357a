// src/services/crawler.rs

//! Listing crawler service.
//!
//! Runs the three stages one request at a time: count the index pages,
//! collect the detail links of every index page, then extract a record from
//! every detail page.

use std::sync::Arc;

use chrono::Utc;
use scraper::Html;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Config, CrawlOutcome, CrawlStats, ListingRecord, ListingTable};
use crate::services::{FieldExtractor, ListingCollector, PageEnumerator};
use crate::utils::http::PageFetcher;

/// Service for crawling every listing of the configured site.
pub struct ListingCrawler {
    config: Arc<Config>,
    fetcher: Arc<dyn PageFetcher>,
    enumerator: PageEnumerator,
    collector: ListingCollector,
    extractor: FieldExtractor,
}

impl ListingCrawler {
    /// Create a new crawler with the given configuration and page source.
    pub fn new(config: Arc<Config>, fetcher: Arc<dyn PageFetcher>) -> Result<Self> {
        Ok(Self {
            enumerator: PageEnumerator::new(&config.site)?,
            collector: ListingCollector::new(&config.site)?,
            extractor: FieldExtractor::new(&config.selectors),
            config,
            fetcher,
        })
    }

    /// Crawl all index pages and every listing they link to.
    pub async fn fetch_all(&self) -> Result<CrawlOutcome> {
        let start_time = Utc::now();

        // Stage 1: Count index pages from the first one.
        let page_count = self.count_pages().await?;
        log::info!("Found {} index page(s)", page_count);

        // Stage 2: Collect listing URLs, page order then document order.
        let mut page_failures = 0;
        let mut urls = Vec::new();
        for (page, index_url) in (1..).zip(self.collector.index_urls(page_count)) {
            match self.fetch_index(&index_url).await {
                Ok(links) => {
                    log::debug!("Page {}/{}: {} listings", page, page_count, links.len());
                    urls.extend(links);
                }
                Err(error) if self.config.crawler.skip_failed_pages => {
                    page_failures += 1;
                    log::warn!("Skipping index page {}: {}", index_url, error);
                }
                Err(error) => return Err(error),
            }
        }
        log::info!("Collected {} listing URLs", urls.len());

        // Stage 3: Extract one record per listing URL.
        let mut detail_failures = 0;
        let mut rows = Vec::with_capacity(urls.len());
        for (i, url) in urls.iter().enumerate() {
            log::debug!("Listing {}/{}: {}", i + 1, urls.len(), url);
            rows.push(match self.fetcher.fetch(url).await {
                Ok(body) => self.extractor.extract_from_html(&body, url),
                Err(error) => {
                    detail_failures += 1;
                    log::warn!("Failed to fetch listing {}: {}", url, error);
                    ListingRecord::unavailable(url.as_str())
                }
            });
        }

        let stats = CrawlStats {
            start_time,
            end_time: Utc::now(),
            page_count,
            page_failures,
            listing_count: urls.len(),
            detail_failures,
        };

        Ok(CrawlOutcome {
            table: ListingTable::new(rows),
            stats,
        })
    }

    /// Fetch the first index page and read its pagination control.
    async fn count_pages(&self) -> Result<u32> {
        let first_url = self.collector.index_url(1);
        let body = self
            .fetcher
            .fetch(&first_url)
            .await
            .map_err(|e| AppError::crawl(&first_url, e))?;

        let base = Url::parse(&first_url)?;
        let document = Html::parse_document(&body);
        self.enumerator.count_pages(&document, &base)
    }

    /// Fetch one index page and extract its listing links.
    async fn fetch_index(&self, index_url: &str) -> Result<Vec<String>> {
        let body = self
            .fetcher
            .fetch(index_url)
            .await
            .map_err(|e| AppError::crawl(index_url, e))?;
        self.collector.extract_links(&body, index_url)
    }
}
