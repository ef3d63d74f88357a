//! Pipeline entry points for crawler operations.
//!
//! - `run_crawler`: Fetch every listing of the configured site
//! - `run_export`: Write the full and keyword-filtered tables
//! - `run_filter`: Re-apply the keyword filter to a stored table
//! - `run_pipeline`: Crawl, then export
//! - `run_validate`: Check the configuration

pub mod crawl;
pub mod export;
#[allow(clippy::module_inception)]
pub mod pipeline;
pub mod validate;

pub use crawl::run_crawler;
pub use export::{ExportSummary, resolve_keyword, run_export, run_filter};
pub use pipeline::run_pipeline;
pub use validate::run_validate;
