// src/services/fields.rs

//! Detail page field extraction.
//!
//! Each field is looked up independently. A field whose selector matches
//! nothing, or whose selector failed to parse, comes back as `None` while the
//! remaining fields are still filled in. Requirements are the exception: no
//! matching items join to an empty string.

use scraper::{Html, Selector};

use crate::models::{FieldSelectors, ListingRecord};
use crate::utils::{element_text, parse_selector};

/// Separator between requirement items.
pub const REQUIREMENTS_SEPARATOR: &str = ", ";

/// Separator between the start and end of the period.
pub const PERIOD_SEPARATOR: &str = " - ";

/// Compiled selector for one field. `None` if the configured selector was invalid.
struct FieldSelector(Option<Selector>);

impl FieldSelector {
    fn compile(field: &str, source: &str) -> Self {
        match parse_selector(source) {
            Ok(selector) => Self(Some(selector)),
            Err(e) => {
                log::warn!("Field '{field}' will always be missing: {e}");
                Self(None)
            }
        }
    }

    /// Text of the first matching element.
    fn first(&self, document: &Html) -> Option<String> {
        let selector = self.0.as_ref()?;
        document.select(selector).next().map(|el| element_text(&el))
    }

    /// Texts of every matching element, possibly none.
    fn all(&self, document: &Html) -> Option<Vec<String>> {
        let selector = self.0.as_ref()?;
        Some(document.select(selector).map(|el| element_text(&el)).collect())
    }
}

/// Extracts a [`ListingRecord`] from a parsed detail page.
pub struct FieldExtractor {
    title: FieldSelector,
    reference: FieldSelector,
    requirements: FieldSelector,
    hours: FieldSelector,
    tasks: FieldSelector,
    activities: FieldSelector,
    location: FieldSelector,
    salary: FieldSelector,
    kind: FieldSelector,
    period_start: FieldSelector,
    period_end: FieldSelector,
}

impl FieldExtractor {
    /// Compile the configured selectors. Never fails; see module docs.
    pub fn new(selectors: &FieldSelectors) -> Self {
        Self {
            title: FieldSelector::compile("title", &selectors.title),
            reference: FieldSelector::compile("reference", &selectors.reference),
            requirements: FieldSelector::compile("requirements", &selectors.requirements),
            hours: FieldSelector::compile("hours", &selectors.hours),
            tasks: FieldSelector::compile("tasks", &selectors.tasks),
            activities: FieldSelector::compile("activities", &selectors.activities),
            location: FieldSelector::compile("location", &selectors.location),
            salary: FieldSelector::compile("salary", &selectors.salary),
            kind: FieldSelector::compile("type", &selectors.kind),
            period_start: FieldSelector::compile("period_start", &selectors.period_start),
            period_end: FieldSelector::compile("period_end", &selectors.period_end),
        }
    }

    /// Extract every field from a detail page.
    pub fn extract(&self, document: &Html, link: &str) -> ListingRecord {
        ListingRecord {
            title: self.title.first(document),
            reference: self.reference.first(document),
            requirements: self
                .requirements
                .all(document)
                .map(|items| items.join(REQUIREMENTS_SEPARATOR)),
            hours: self.hours.first(document),
            tasks: self.tasks.first(document),
            activities: self.activities.first(document),
            location: self.location.first(document),
            salary: self.salary.first(document),
            kind: self.kind.first(document),
            period: compose_period(
                self.period_start.first(document),
                self.period_end.first(document),
            ),
            link: link.to_string(),
        }
    }

    /// Parse a detail page body and extract its record.
    pub fn extract_from_html(&self, body: &str, link: &str) -> ListingRecord {
        let document = Html::parse_document(body);
        self.extract(&document, link)
    }
}

/// Join start and end with [`PERIOD_SEPARATOR`]; missing only when both are.
fn compose_period(start: Option<String>, end: Option<String>) -> Option<String> {
    if start.is_none() && end.is_none() {
        return None;
    }
    Some(format!(
        "{}{PERIOD_SEPARATOR}{}",
        start.unwrap_or_default(),
        end.unwrap_or_default()
    ))
}
