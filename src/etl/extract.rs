//! Extractor trait for data extraction from various sources

use crate::error::Result;
use async_trait::async_trait;

/// Extractor trait for extracting data from a source
///
/// Implementors define how to extract items from sources like:
/// - HTTP APIs
/// - File systems
///
/// # Errors
/// `extract` returns an `ExtractError` whose kind tells the caller whether
/// the failure is worth retrying (`Upstream`/`Request`) or not (`Parse`).
#[async_trait]
pub trait Extractor: Send + Sync {
    /// The type of items extracted
    type Item: Send;

    /// Extract items from the source
    async fn extract(&self) -> Result<Vec<Self::Item>>;
}
