// src/services/pages.rs

//! Index page enumeration.

use scraper::{Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::SiteConfig;
use crate::utils::{parse_selector, resolve_href};

/// Reads the total number of index pages off the pagination control.
pub struct PageEnumerator {
    pagination: Selector,
    attr_name: String,
    page_segment: usize,
}

impl PageEnumerator {
    /// Create an enumerator for the configured site layout.
    pub fn new(site: &SiteConfig) -> Result<Self> {
        Ok(Self {
            pagination: parse_selector(&site.pagination_selector)?,
            attr_name: site.link_attr.clone(),
            page_segment: site.page_segment,
        })
    }

    /// Number of index pages announced by the first index page.
    ///
    /// Takes the last pagination link, splits its URL on `/` and parses the
    /// configured segment. A page without pagination has exactly one page.
    /// A pagination link without a positive page number at that segment is
    /// an error, since the site layout no longer matches the configuration.
    pub fn count_pages(&self, document: &Html, page_url: &Url) -> Result<u32> {
        let Some(href) = document
            .select(&self.pagination)
            .filter_map(|a| a.value().attr(&self.attr_name))
            .last()
        else {
            log::info!("No pagination control on {page_url}, assuming a single page");
            return Ok(1);
        };

        let target = resolve_href(page_url, href);
        self.page_number(&target).ok_or_else(|| {
            AppError::crawl(
                page_url.as_str(),
                format!(
                    "last pagination link {target} has no page number at segment {}",
                    self.page_segment
                ),
            )
        })
    }

    fn page_number(&self, target: &str) -> Option<u32> {
        target
            .split('/')
            .nth(self.page_segment)
            .and_then(|segment| segment.trim().parse::<u32>().ok())
            .filter(|&pages| pages > 0)
    }
}
