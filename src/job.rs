//! The extraction job: the crate's single invocation surface.

use crate::client::ApiExtractor;
use crate::config::ExtractorConfig;
use crate::error::Result;
use crate::etl::{Pipeline, RunReport};
use crate::storage::ParquetLander;
use crate::transform::Flattener;
use serde::Serialize;
use serde_json::Value;

/// Structured result returned to the invoking environment.
///
/// `status_code` 200 signals success and the body echoes the first written
/// object key. Failures are not encoded here; they surface as an
/// `ExtractError` so the environment can decide on retry or alerting.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct JobResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

/// One-shot, stateless extraction job.
///
/// Each invocation runs fetch, normalize, write strictly in sequence and
/// holds no state across invocations. Overlapping invocations are the host
/// environment's concern; within one UTC day they overwrite the same
/// partition, last writer wins.
pub struct ExtractorJob {
    config: ExtractorConfig,
}

impl ExtractorJob {
    /// Create a job from a validated configuration.
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Run one extraction.
    ///
    /// The event payload is accepted for interface compatibility with
    /// scheduled/triggered invocation and is otherwise ignored.
    ///
    /// # Errors
    /// Propagates the first `ExtractError` encountered; no local recovery
    /// and no partial-success reporting. Nothing is written if the fetch or
    /// parse step fails.
    pub async fn invoke(&self, _event: Value) -> Result<JobResponse> {
        let report = self.run_pipeline().await?;

        let body = match report.paths.first() {
            Some(path) => format!("Successfully processed and wrote data to {path}"),
            None => "No records extracted, nothing written".to_string(),
        };

        Ok(JobResponse {
            status_code: 200,
            body,
        })
    }

    /// Run the underlying pipeline and return its report directly.
    pub async fn run_pipeline(&self) -> Result<RunReport> {
        let extractor = ApiExtractor::new(self.config.api_url.clone());
        let flattener = Flattener::new();
        let lander = ParquetLander::new(&self.config.storage_root, &self.config.entity);

        Pipeline::new(extractor, flattener, lander).run().await
    }
}
