// src/pipeline/export.rs

//! Table export and keyword filtering.

use std::path::PathBuf;

use crate::error::{AppError, Result};
use crate::models::{Config, ListingTable};
use crate::storage::TableStorage;

/// Locations and sizes of the exported tables.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub listings_path: PathBuf,
    pub listings_count: usize,
    /// `false` when the full table was read back instead of written
    pub listings_written: bool,
    pub filtered_path: PathBuf,
    pub filtered_count: usize,
}

/// Write the full table and its keyword-filtered subset.
pub async fn run_export(
    config: &Config,
    storage: &dyn TableStorage,
    table: &ListingTable,
    keyword: &str,
) -> Result<ExportSummary> {
    let listings_path = storage
        .write_table(&config.output.listings_file, table)
        .await?;
    let (filtered_path, filtered_count) = write_filtered(config, storage, table, keyword).await?;

    Ok(ExportSummary {
        listings_path,
        listings_count: table.len(),
        listings_written: true,
        filtered_path,
        filtered_count,
    })
}

/// Re-read the full table from storage and rewrite the filtered table.
pub async fn run_filter(
    config: &Config,
    storage: &dyn TableStorage,
    keyword: &str,
) -> Result<ExportSummary> {
    let table = storage
        .read_table(&config.output.listings_file)
        .await?
        .ok_or_else(|| {
            AppError::config(format!(
                "{} not found. Run 'crawl' first",
                config.output.listings_file
            ))
        })?;
    log::info!(
        "Loaded {} listings from {}",
        table.len(),
        storage.location(&config.output.listings_file).display()
    );

    let (filtered_path, filtered_count) = write_filtered(config, storage, &table, keyword).await?;

    Ok(ExportSummary {
        listings_path: storage.location(&config.output.listings_file),
        listings_count: table.len(),
        listings_written: false,
        filtered_path,
        filtered_count,
    })
}

/// Keyword to filter with: the override if given, else `filter.keyword`.
///
/// A blank keyword would match every row with requirements and is rejected.
pub fn resolve_keyword(config: &Config, keyword: Option<String>) -> Result<String> {
    let keyword = keyword.unwrap_or_else(|| config.filter.keyword.clone());
    if keyword.trim().is_empty() {
        return Err(AppError::validation("filter keyword is empty"));
    }
    Ok(keyword)
}

async fn write_filtered(
    config: &Config,
    storage: &dyn TableStorage,
    table: &ListingTable,
    keyword: &str,
) -> Result<(PathBuf, usize)> {
    let filtered = table.filter_requirements(keyword);
    log::info!(
        "{} of {} listings require '{}'",
        filtered.len(),
        table.len(),
        keyword
    );
    let path = storage
        .write_table(&config.output.filtered_file, &filtered)
        .await?;
    Ok((path, filtered.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ListingRecord;
    use crate::storage::LocalStorage;
    use tempfile::TempDir;

    fn table() -> ListingTable {
        let row = |reference: &str, requirements: &str| ListingRecord {
            reference: Some(reference.to_string()),
            requirements: Some(requirements.to_string()),
            link: format!("https://example.com/oferta/{reference}"),
            ..ListingRecord::default()
        };
        ListingTable::new(vec![
            row("1", "Máster en Datos Masivos"),
            row("2", "Grado en Historia"),
            row("3", "MASTER EN DATOS MASIVOS"),
        ])
    }

    #[tokio::test]
    async fn test_export_writes_both_files() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let config = Config::default();

        let summary = run_export(&config, &storage, &table(), "datos masivos")
            .await
            .unwrap();

        assert_eq!(summary.listings_count, 3);
        assert_eq!(summary.filtered_count, 2);
        assert!(summary.listings_written);
        assert!(summary.listings_path.exists());

        let filtered = std::fs::read_to_string(&summary.filtered_path).unwrap();
        assert_eq!(filtered.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_filter_rereads_listings() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let config = Config::default();
        run_export(&config, &storage, &table(), "datos masivos")
            .await
            .unwrap();

        let summary = run_filter(&config, &storage, "historia").await.unwrap();
        assert_eq!(summary.listings_count, 3);
        assert_eq!(summary.filtered_count, 1);
        assert!(!summary.listings_written);
        assert_eq!(summary.listings_path, tmp.path().join("listings.csv"));

        let filtered = storage
            .read_table(&config.output.filtered_file)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(filtered.rows()[0].reference.as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_filter_without_listings_fails() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        let result = run_filter(&Config::default(), &storage, "datos").await;
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_resolve_keyword() {
        let config = Config::default();
        assert_eq!(resolve_keyword(&config, None).unwrap(), "datos masivos");
        assert_eq!(
            resolve_keyword(&config, Some("Historia".to_string())).unwrap(),
            "Historia"
        );
    }

    #[test]
    fn test_resolve_keyword_rejects_blank_override() {
        let config = Config::default();
        for blank in ["", "   "] {
            let result = resolve_keyword(&config, Some(blank.to_string()));
            assert!(matches!(result, Err(AppError::Validation(_))));
        }
    }
}
