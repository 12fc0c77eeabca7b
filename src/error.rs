//! Error taxonomy for the extraction job.
//!
//! Every failure kind maps to a retry decision the invoking environment can
//! make: `Configuration` and `Parse` need a human fix, `Upstream` may be
//! transient, `Write` points at the storage layer or its access grants.

use thiserror::Error;

/// Failure kinds surfaced by one extraction invocation.
///
/// The job performs no local recovery: every variant is terminal for the
/// invocation and propagates to the caller unchanged.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Missing or invalid deployment configuration. Not retriable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The upstream API answered with a non-success status. The status and
    /// response body are carried for diagnostics; retrying is the caller's
    /// decision.
    #[error("upstream API returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The upstream request itself failed (DNS, connect, timeout).
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body was not the expected JSON array of objects.
    #[error("failed to parse upstream response: {0}")]
    Parse(String),

    /// The storage layer rejected the write. Usually an access-control or
    /// mount misconfiguration upstream of this job.
    #[error("failed to write to storage: {0}")]
    Write(String),
}

impl From<serde_json::Error> for ExtractError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Crate-wide result alias so error kinds stay matchable at the seams.
pub type Result<T> = std::result::Result<T, ExtractError>;
