//! CLI helper functions

use crate::{
    config::ExtractorConfig,
    job::{ExtractorJob, JobResponse},
};
use eyre::{Context, Result};
use serde_json::Value;

/// Load and validate job configuration from environment variables.
///
/// Expected environment variables:
/// - DATA_LAKE_ROOT: destination storage root (required)
/// - EXTRACTOR_API_URL: upstream endpoint override (optional)
/// - EXTRACTOR_ENTITY: entity name for the landing prefix (optional)
pub fn load_config() -> Result<ExtractorConfig> {
    ExtractorConfig::from_env().context("Failed to load extractor configuration")
}

/// Run one extraction invocation end to end.
///
/// Pipeline: ApiExtractor -> Flattener -> ParquetLander
pub async fn run_extraction(event: Value) -> Result<JobResponse> {
    let config = load_config()?;
    log::info!(
        "Extraction target: {} -> {}",
        config.api_url,
        config.storage_root.display()
    );

    let job = ExtractorJob::new(config);
    let response = job.invoke(event).await.context("Extraction failed")?;

    log::info!("{}", response.body);
    Ok(response)
}

/// Validate configuration without touching the network or storage.
pub fn check_config() -> Result<ExtractorConfig> {
    let config = load_config()?;
    log::info!("Configuration OK");
    log::info!("  API URL:      {}", config.api_url);
    log::info!("  Storage root: {}", config.storage_root.display());
    log::info!("  Entity:       {}", config.entity);
    Ok(config)
}
