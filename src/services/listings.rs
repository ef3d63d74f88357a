// src/services/listings.rs

//! Listing URL collection from index pages.

use scraper::{Html, Selector};
use url::Url;

use crate::error::Result;
use crate::models::SiteConfig;
use crate::utils::{parse_selector, resolve_href};

/// Extracts detail page links from index pages.
pub struct ListingCollector {
    site: SiteConfig,
    link_sel: Selector,
}

impl ListingCollector {
    /// Create a collector for the configured site layout.
    pub fn new(site: &SiteConfig) -> Result<Self> {
        Ok(Self {
            link_sel: parse_selector(&site.listing_link_selector)?,
            site: site.clone(),
        })
    }

    /// URL of index page `page` (1-based).
    pub fn index_url(&self, page: u32) -> String {
        self.site.page_url(page)
    }

    /// Index page URLs for pages `1..=total`, in order.
    pub fn index_urls(&self, total: u32) -> impl Iterator<Item = String> + '_ {
        (1..=total).map(move |page| self.index_url(page))
    }

    /// Detail page links of one index page, in document order.
    ///
    /// Anchors without the link attribute are skipped. No deduplication.
    pub fn links<'a>(
        &'a self,
        document: &'a Html,
        page_url: &'a Url,
    ) -> impl Iterator<Item = String> + 'a {
        document
            .select(&self.link_sel)
            .filter_map(move |a| a.value().attr(&self.site.link_attr))
            .map(move |href| resolve_href(page_url, href))
    }

    /// Parse an index page body and collect its links.
    pub fn extract_links(&self, body: &str, page_url: &str) -> Result<Vec<String>> {
        let base = Url::parse(page_url)?;
        let document = Html::parse_document(body);
        Ok(self.links(&document, &base).collect())
    }
}
