//! Job configuration loaded from the environment.
//!
//! All environment reads happen once, here, and produce a validated struct
//! that is passed into the job. Nothing else in the crate touches
//! `std::env`.

use crate::error::{ExtractError, Result};
use std::path::PathBuf;
use url::Url;

/// Required: destination storage root (the bucket mount / data-lake root).
pub const ENV_DATA_LAKE_ROOT: &str = "DATA_LAKE_ROOT";
/// Optional: override the upstream collection endpoint.
pub const ENV_API_URL: &str = "EXTRACTOR_API_URL";
/// Optional: entity name used in the `raw/<entity>/` landing prefix.
pub const ENV_ENTITY: &str = "EXTRACTOR_ENTITY";

const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com/users";
const DEFAULT_ENTITY: &str = "users";

/// Validated configuration for one extraction job.
#[derive(Clone, Debug)]
pub struct ExtractorConfig {
    /// Storage root the partitioned layout is written beneath.
    pub storage_root: PathBuf,
    /// Upstream collection endpoint.
    pub api_url: Url,
    /// Entity name, first path segment after `raw/`.
    pub entity: String,
}

impl ExtractorConfig {
    /// Build a config from explicit values, validating eagerly.
    ///
    /// # Errors
    /// Returns `ExtractError::Configuration` if the storage root is empty,
    /// the endpoint URL is invalid, or the entity name is empty or contains
    /// a path separator.
    pub fn new(
        storage_root: impl Into<PathBuf>,
        api_url: &str,
        entity: impl Into<String>,
    ) -> Result<Self> {
        let storage_root = storage_root.into();
        if storage_root.as_os_str().is_empty() {
            return Err(ExtractError::Configuration(format!(
                "{ENV_DATA_LAKE_ROOT} must name a destination storage root"
            )));
        }

        let api_url = Url::parse(api_url).map_err(|e| {
            ExtractError::Configuration(format!("invalid API URL '{api_url}': {e}"))
        })?;

        let entity = entity.into();
        if entity.is_empty() || entity.contains('/') {
            return Err(ExtractError::Configuration(format!(
                "entity name '{entity}' must be a single non-empty path segment"
            )));
        }

        Ok(Self {
            storage_root,
            api_url,
            entity,
        })
    }

    /// Load configuration from the process environment.
    ///
    /// Expected variables:
    /// - `DATA_LAKE_ROOT`: destination storage root (required)
    /// - `EXTRACTOR_API_URL`: upstream endpoint (optional)
    /// - `EXTRACTOR_ENTITY`: entity name (optional)
    ///
    /// # Errors
    /// Returns `ExtractError::Configuration` if `DATA_LAKE_ROOT` is unset or
    /// empty. This check runs before any network call is made.
    pub fn from_env() -> Result<Self> {
        let root = std::env::var(ENV_DATA_LAKE_ROOT).unwrap_or_default();
        if root.trim().is_empty() {
            return Err(ExtractError::Configuration(format!(
                "environment variable {ENV_DATA_LAKE_ROOT} is not set"
            )));
        }

        let api_url = std::env::var(ENV_API_URL).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let entity = std::env::var(ENV_ENTITY).unwrap_or_else(|_| DEFAULT_ENTITY.to_string());

        Self::new(root, &api_url, entity)
    }
}
