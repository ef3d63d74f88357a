//! Service layer for the crawler application.
//!
//! This module contains the business logic for:
//! - Index page counting (`PageEnumerator`)
//! - Listing URL collection (`ListingCollector`)
//! - Detail field extraction (`FieldExtractor`)
//! - The end-to-end crawl (`ListingCrawler`)

mod crawler;
mod fields;
mod listings;
mod pages;

pub use crawler::ListingCrawler;
pub use fields::{FieldExtractor, PERIOD_SEPARATOR, REQUIREMENTS_SEPARATOR};
pub use listings::ListingCollector;
pub use pages::PageEnumerator;
