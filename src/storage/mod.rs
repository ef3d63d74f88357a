//! Storage abstractions for exported listing tables.
//!
//! ## Directory Structure
//!
//! ```text
//! storage/
//! ├── config.toml             # Crawler configuration
//! ├── listings.csv            # Every collected listing
//! └── listings_filtered.csv   # Listings matching the keyword filter
//! ```

pub mod local;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::ListingTable;

// Re-export for convenience
pub use local::LocalStorage;

/// Trait for table storage backends.
#[async_trait]
pub trait TableStorage: Send + Sync {
    /// Write a table under `name`, replacing any previous content.
    ///
    /// Returns the location the table was written to.
    async fn write_table(&self, name: &str, table: &ListingTable) -> Result<PathBuf>;

    /// Read a table previously written under `name`, if present.
    async fn read_table(&self, name: &str) -> Result<Option<ListingTable>>;

    /// Location a table named `name` is written to and read from.
    fn location(&self, name: &str) -> PathBuf;
}
