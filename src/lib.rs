//! Lake Extractor
//!
//! A one-shot ingestion job that pulls a JSON collection from a public HTTP
//! API, flattens it into a single table, and lands it as Parquet under a
//! Hive-style date-partitioned prefix.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod etl;
pub mod job;
pub mod storage;
pub mod transform;

// Re-exports for convenience
pub use client::ApiExtractor;
pub use config::ExtractorConfig;
pub use error::ExtractError;
pub use etl::{Extractor, Loader, Pipeline, RunReport, Transformer};
pub use job::{ExtractorJob, JobResponse};
pub use storage::{ParquetLander, PartitionPath};
pub use transform::{FlatRecord, Flattener};
