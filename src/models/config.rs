//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::utils::parse_selector;

/// Placeholder substituted with the page number in the index URL template.
pub const PAGE_PLACEHOLDER: &str = "{page}";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Index page layout
    #[serde(default)]
    pub site: SiteConfig,

    /// Detail page field selectors
    #[serde(default)]
    pub selectors: FieldSelectors,

    /// Keyword filter applied to the requirements column
    #[serde(default)]
    pub filter: FilterConfig,

    /// Output file names
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if !self.site.index_url_template.contains(PAGE_PLACEHOLDER) {
            return Err(AppError::validation(format!(
                "site.index_url_template must contain {PAGE_PLACEHOLDER}"
            )));
        }
        url::Url::parse(&self.site.page_url(1))?;
        if self.site.link_attr.trim().is_empty() {
            return Err(AppError::validation("site.link_attr is empty"));
        }

        parse_selector(&self.site.pagination_selector)?;
        parse_selector(&self.site.listing_link_selector)?;
        for (field, selector) in self.selectors.entries() {
            parse_selector(selector)
                .map_err(|e| AppError::validation(format!("selectors.{field}: {e}")))?;
        }

        if self.filter.keyword.trim().is_empty() {
            return Err(AppError::validation("filter.keyword is empty"));
        }
        if self.output.listings_file == self.output.filtered_file {
            return Err(AppError::validation(
                "output.listings_file and output.filtered_file must differ",
            ));
        }
        Ok(())
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Log and skip index pages that fail to load instead of aborting the run
    #[serde(default)]
    pub skip_failed_pages: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            skip_failed_pages: false,
        }
    }
}

/// Where the listing index lives and how it is laid out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Index page URL with a `{page}` placeholder (pages start at 1)
    #[serde(default = "defaults::index_url_template")]
    pub index_url_template: String,

    /// Selector for the anchors of the pagination control
    #[serde(default = "defaults::pagination_selector")]
    pub pagination_selector: String,

    /// Position of the page number in the `/`-split URL of the last pagination link
    #[serde(default = "defaults::page_segment")]
    pub page_segment: usize,

    /// Selector for detail page anchors inside the listing container
    #[serde(default = "defaults::listing_link_selector")]
    pub listing_link_selector: String,

    /// HTML attribute holding link targets
    #[serde(default = "defaults::link_attr")]
    pub link_attr: String,
}

impl SiteConfig {
    /// Build the URL of index page `page`.
    pub fn page_url(&self, page: u32) -> String {
        self.index_url_template
            .replace(PAGE_PLACEHOLDER, &page.to_string())
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            index_url_template: defaults::index_url_template(),
            pagination_selector: defaults::pagination_selector(),
            page_segment: defaults::page_segment(),
            listing_link_selector: defaults::listing_link_selector(),
            link_attr: defaults::link_attr(),
        }
    }
}

/// CSS selectors for each field of a detail page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSelectors {
    #[serde(default = "defaults::title")]
    pub title: String,
    #[serde(default = "defaults::reference")]
    pub reference: String,
    /// Matches every requirement item; their texts are joined
    #[serde(default = "defaults::requirements")]
    pub requirements: String,
    #[serde(default = "defaults::hours")]
    pub hours: String,
    #[serde(default = "defaults::tasks")]
    pub tasks: String,
    #[serde(default = "defaults::activities")]
    pub activities: String,
    #[serde(default = "defaults::location")]
    pub location: String,
    #[serde(default = "defaults::salary")]
    pub salary: String,
    #[serde(rename = "type", default = "defaults::kind")]
    pub kind: String,
    #[serde(default = "defaults::period_start")]
    pub period_start: String,
    #[serde(default = "defaults::period_end")]
    pub period_end: String,
}

impl FieldSelectors {
    /// All selectors paired with their config key.
    pub fn entries(&self) -> [(&'static str, &str); 11] {
        [
            ("title", self.title.as_str()),
            ("reference", self.reference.as_str()),
            ("requirements", self.requirements.as_str()),
            ("hours", self.hours.as_str()),
            ("tasks", self.tasks.as_str()),
            ("activities", self.activities.as_str()),
            ("location", self.location.as_str()),
            ("salary", self.salary.as_str()),
            ("type", self.kind.as_str()),
            ("period_start", self.period_start.as_str()),
            ("period_end", self.period_end.as_str()),
        ]
    }
}

impl Default for FieldSelectors {
    fn default() -> Self {
        Self {
            title: defaults::title(),
            reference: defaults::reference(),
            requirements: defaults::requirements(),
            hours: defaults::hours(),
            tasks: defaults::tasks(),
            activities: defaults::activities(),
            location: defaults::location(),
            salary: defaults::salary(),
            kind: defaults::kind(),
            period_start: defaults::period_start(),
            period_end: defaults::period_end(),
        }
    }
}

/// Keyword filter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Case-insensitive substring searched for in the requirements column
    #[serde(default = "defaults::keyword")]
    pub keyword: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            keyword: defaults::keyword(),
        }
    }
}

/// Output file names, relative to the storage directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "defaults::listings_file")]
    pub listings_file: String,

    #[serde(default = "defaults::filtered_file")]
    pub filtered_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            listings_file: defaults::listings_file(),
            filtered_file: defaults::filtered_file(),
        }
    }
}

mod defaults {
    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; listing-crawler/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Site defaults
    pub fn index_url_template() -> String {
        "https://practicas.example.es/ofertas/page/{page}/".into()
    }
    pub fn pagination_selector() -> String {
        "ul.pagination li a".into()
    }
    pub fn page_segment() -> usize {
        // https: / "" / host / ofertas / page / N
        5
    }
    pub fn listing_link_selector() -> String {
        "div.listado-ofertas article h2 a".into()
    }
    pub fn link_attr() -> String {
        "href".into()
    }

    // Field selector defaults
    pub fn title() -> String {
        "#titulo-oferta".into()
    }
    pub fn reference() -> String {
        "#referencia".into()
    }
    pub fn requirements() -> String {
        "#titulaciones li".into()
    }
    pub fn hours() -> String {
        "#horario".into()
    }
    pub fn tasks() -> String {
        "#tareas".into()
    }
    pub fn activities() -> String {
        "#actividades".into()
    }
    pub fn location() -> String {
        "#localidad".into()
    }
    pub fn salary() -> String {
        "#remuneracion".into()
    }
    pub fn kind() -> String {
        "#tipo-practica".into()
    }
    pub fn period_start() -> String {
        "#fecha-inicio".into()
    }
    pub fn period_end() -> String {
        "#fecha-fin".into()
    }

    // Filter defaults
    pub fn keyword() -> String {
        "datos masivos".into()
    }

    // Output defaults
    pub fn listings_file() -> String {
        "listings.csv".into()
    }
    pub fn filtered_file() -> String {
        "listings_filtered.csv".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.crawler.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_template_without_placeholder() {
        let mut config = Config::default();
        config.site.index_url_template = "https://example.com/ofertas/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_field_selector() {
        let mut config = Config::default();
        config.selectors.salary = "[[invalid".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("selectors.salary"));
    }

    #[test]
    fn validate_rejects_same_output_files() {
        let mut config = Config::default();
        config.output.filtered_file = config.output.listings_file.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn page_url_substitutes_page_number() {
        let site = SiteConfig::default();
        assert_eq!(
            site.page_url(3),
            "https://practicas.example.es/ofertas/page/3/"
        );
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [filter]
            keyword = "ingeniería"

            [selectors]
            type = ".modalidad"
            "#,
        )
        .unwrap();

        assert_eq!(config.filter.keyword, "ingeniería");
        assert_eq!(config.selectors.kind, ".modalidad");
        assert_eq!(config.selectors.title, "#titulo-oferta");
        assert_eq!(config.crawler.timeout_secs, 30);
        assert!(!config.crawler.skip_failed_pages);
    }
}
