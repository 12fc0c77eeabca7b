//! Partitioned storage operations
//!
//! This module handles the landing side of the pipeline:
//! - Hive-style date-partition path construction
//! - Parquet file writing with per-partition overwrite semantics

mod parquet;
mod partition;

pub use parquet::ParquetLander;
pub use partition::PartitionPath;
