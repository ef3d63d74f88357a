// src/pipeline/pipeline.rs

use std::sync::Arc;

use crate::error::Result;
use crate::models::Config;
use crate::storage::TableStorage;
use crate::utils::http::PageFetcher;

use super::crawl::run_crawler;
use super::export::{ExportSummary, run_export};

/// Run the full pipeline: crawl, then export the full and filtered tables.
pub async fn run_pipeline(
    config: Arc<Config>,
    fetcher: Arc<dyn PageFetcher>,
    storage: &dyn TableStorage,
    keyword: &str,
) -> Result<ExportSummary> {
    log::info!("Step 1/2: Crawling listings...");
    let outcome = run_crawler(Arc::clone(&config), fetcher).await?;

    log::info!("Step 2/2: Exporting tables...");
    run_export(&config, storage, &outcome.table, keyword).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalStorage;
    use crate::utils::http::testing::StaticPages;
    use tempfile::TempDir;

    const SINGLE: &str = include_str!("../../tests/fixtures/index_single.html");
    const COMPLETE: &str = include_str!("../../tests/fixtures/detail_complete.html");
    const PARTIAL: &str = include_str!("../../tests/fixtures/detail_partial.html");

    fn site() -> Arc<StaticPages> {
        Arc::new(
            StaticPages::default()
                .with("https://practicas.example.es/ofertas/page/1/", SINGLE)
                .with("https://practicas.example.es/oferta/2024-117/", COMPLETE)
                .with("https://practicas.example.es/oferta/2024-118/", PARTIAL),
        )
    }

    #[tokio::test]
    async fn test_end_to_end() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let config = Arc::new(Config::default());

        let summary = run_pipeline(config, site(), &storage, "datos masivos")
            .await
            .unwrap();
        assert_eq!(summary.listings_count, 2);
        assert_eq!(summary.filtered_count, 1);

        let text = std::fs::read_to_string(&summary.listings_path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);

        let header: Vec<&str> = lines[0].split(';').collect();
        let second: Vec<&str> = lines[2].split(';').collect();
        assert_eq!(second.len(), header.len());

        let cell = |name: &str| {
            let i = header.iter().position(|h| *h == name).unwrap();
            second[i]
        };
        assert_eq!(cell("hours"), "");
        assert_eq!(cell("salary"), "");
        assert_eq!(cell("reference"), "2024-118");
        assert_eq!(cell("location"), "Castellón");
        assert_eq!(cell("link"), "https://practicas.example.es/oferta/2024-118/");

        let filtered = std::fs::read_to_string(&summary.filtered_path).unwrap();
        let filtered_lines: Vec<&str> = filtered.lines().collect();
        assert_eq!(filtered_lines.len(), 2);
        assert!(filtered_lines[1].contains("2024-117"));
    }
}
