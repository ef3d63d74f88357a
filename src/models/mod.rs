// src/models/mod.rs

//! Domain models for the crawler application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod listing;
mod table;

// Re-export all public types
pub use config::{
    Config, CrawlerConfig, FieldSelectors, FilterConfig, OutputConfig, PAGE_PLACEHOLDER,
    SiteConfig,
};
pub use listing::{Column, ListingRecord};
pub use table::{DELIMITER, ListingTable};

use chrono::{DateTime, Utc};

/// Counters and timing of a crawl run.
#[derive(Debug, Clone)]
pub struct CrawlStats {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Index pages announced by the pagination control
    pub page_count: u32,
    /// Index pages that could not be loaded and were skipped
    pub page_failures: usize,
    /// Listing URLs collected across all index pages
    pub listing_count: usize,
    /// Detail pages that could not be loaded
    pub detail_failures: usize,
}

impl CrawlStats {
    /// Share of detail pages that loaded, in `[0, 1]`.
    pub fn success_rate(&self) -> f64 {
        if self.listing_count == 0 {
            return 1.0;
        }
        1.0 - self.detail_failures as f64 / self.listing_count as f64
    }

    /// Wall clock duration of the run in seconds.
    pub fn elapsed_secs(&self) -> i64 {
        (self.end_time - self.start_time).num_seconds()
    }
}

/// Result of a crawl: the listing table and how it was obtained.
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub table: ListingTable,
    pub stats: CrawlStats,
}
