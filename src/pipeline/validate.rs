// src/pipeline/validate.rs

use crate::error::Result;
use crate::models::Config;

/// Validate the configuration and report the effective settings.
pub fn run_validate(config: &Config) -> Result<()> {
    log::info!("Validating configuration...");

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    log::info!("✓ Config OK");
    log::info!("    Index URL: {}", config.site.index_url_template);
    log::info!("    User agent: {}", config.crawler.user_agent);
    log::info!("    Timeout: {}s", config.crawler.timeout_secs);
    log::info!("    Keyword filter: {}", config.filter.keyword);
    log::info!(
        "    Output: {}, {}",
        config.output.listings_file,
        config.output.filtered_file
    );
    Ok(())
}
