//! Parquet landing with per-partition overwrite semantics.

use crate::error::{ExtractError, Result};
use crate::etl::Loader;
use crate::storage::PartitionPath;
use crate::transform::FlatRecord;
use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use async_trait::async_trait;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Lands a batch of flat records as Parquet under a date-partitioned prefix.
///
/// The partition date is taken from the clock at the moment of writing, so
/// every invocation within one UTC day targets the same prefix. Writes are
/// overwrite-mode: the partition's existing file set is removed before the
/// new set is written, and sibling partitions are untouched. The clear and
/// rewrite are not atomic; a failure mid-write can leave a partial file set
/// at the partition, and concurrent writers race last-writer-wins.
pub struct ParquetLander {
    storage_root: PathBuf,
    entity: String,
}

impl ParquetLander {
    pub fn new(storage_root: impl AsRef<Path>, entity: impl Into<String>) -> Self {
        Self {
            storage_root: storage_root.as_ref().to_path_buf(),
            entity: entity.into(),
        }
    }

    /// Write one batch into the given partition.
    ///
    /// Returns the object keys written, relative to the storage root.
    ///
    /// # Errors
    /// Returns `ExtractError::Write` if the partition cannot be cleared or
    /// the Parquet file cannot be written (typically a permission or mount
    /// problem on the storage root).
    pub fn write_partition(
        &self,
        partition: PartitionPath,
        records: &[FlatRecord],
    ) -> Result<Vec<String>> {
        let prefix = partition.key_prefix(&self.entity);
        let partition_dir = self.storage_root.join(&prefix);

        log::info!(
            "Writing {} records to Parquet at: {}",
            records.len(),
            partition_dir.display()
        );

        // Overwrite semantics: replace the partition's whole file set.
        if partition_dir.exists() {
            fs::remove_dir_all(&partition_dir).map_err(|e| {
                ExtractError::Write(format!(
                    "failed to clear partition {}: {e}",
                    partition_dir.display()
                ))
            })?;
        }
        fs::create_dir_all(&partition_dir).map_err(|e| {
            ExtractError::Write(format!(
                "failed to create partition {}: {e}",
                partition_dir.display()
            ))
        })?;

        let batch = build_record_batch(records)?;

        let key = format!("{prefix}/part-00000.parquet");
        let file_path = self.storage_root.join(&key);
        let file = fs::File::create(&file_path).map_err(|e| {
            ExtractError::Write(format!("failed to create {}: {e}", file_path.display()))
        })?;

        let props = WriterProperties::builder().build();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))
            .map_err(|e| ExtractError::Write(format!("failed to open Parquet writer: {e}")))?;
        writer
            .write(&batch)
            .map_err(|e| ExtractError::Write(format!("failed to write Parquet batch: {e}")))?;
        writer
            .close()
            .map_err(|e| ExtractError::Write(format!("failed to finalize Parquet file: {e}")))?;

        log::info!("Successfully wrote {}", key);
        Ok(vec![key])
    }
}

#[async_trait]
impl Loader for ParquetLander {
    type Item = FlatRecord;

    async fn load(&self, items: Vec<Self::Item>) -> Result<Vec<String>> {
        // Partition from the clock at the moment of writing.
        self.write_partition(PartitionPath::today(), &items)
    }
}

/// Column type assigned by scanning every value in a column.
///
/// Mixed scalar types degrade to text; arrays and objects are JSON-encoded
/// into text columns. Whether downstream schema inference should instead see
/// arrays in a native nested type is unresolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ColumnKind {
    Bool,
    Int,
    Float,
    Text,
}

fn kind_of(value: &Value) -> Option<ColumnKind> {
    match value {
        Value::Null => None,
        Value::Bool(_) => Some(ColumnKind::Bool),
        Value::Number(n) if n.is_i64() => Some(ColumnKind::Int),
        Value::Number(_) => Some(ColumnKind::Float),
        Value::String(_) | Value::Array(_) | Value::Object(_) => Some(ColumnKind::Text),
    }
}

fn merge_kinds(a: Option<ColumnKind>, b: Option<ColumnKind>) -> Option<ColumnKind> {
    use ColumnKind::*;
    match (a, b) {
        (None, k) | (k, None) => k,
        (Some(x), Some(y)) if x == y => Some(x),
        (Some(Int), Some(Float)) | (Some(Float), Some(Int)) => Some(Float),
        _ => Some(Text),
    }
}

/// Unified column set across the batch, in first-seen order.
fn column_plan(records: &[FlatRecord]) -> Vec<(String, ColumnKind)> {
    let mut order: Vec<String> = Vec::new();
    let mut kinds: std::collections::HashMap<String, Option<ColumnKind>> =
        std::collections::HashMap::new();

    for record in records {
        for (name, value) in record {
            let entry = kinds.entry(name.clone()).or_insert_with(|| {
                order.push(name.clone());
                None
            });
            *entry = merge_kinds(*entry, kind_of(value));
        }
    }

    order
        .into_iter()
        .map(|name| {
            // All-null columns land as nullable text.
            let kind = kinds[&name].unwrap_or(ColumnKind::Text);
            (name, kind)
        })
        .collect()
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn build_record_batch(records: &[FlatRecord]) -> Result<RecordBatch> {
    let plan = column_plan(records);

    let mut fields = Vec::with_capacity(plan.len());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(plan.len());

    for (name, kind) in &plan {
        let values = records.iter().map(|r| r.get(name));
        let (data_type, array): (DataType, ArrayRef) = match kind {
            ColumnKind::Bool => {
                let data: Vec<Option<bool>> =
                    values.map(|v| v.and_then(Value::as_bool)).collect();
                (DataType::Boolean, Arc::new(BooleanArray::from(data)))
            }
            ColumnKind::Int => {
                let data: Vec<Option<i64>> = values.map(|v| v.and_then(Value::as_i64)).collect();
                (DataType::Int64, Arc::new(Int64Array::from(data)))
            }
            ColumnKind::Float => {
                let data: Vec<Option<f64>> = values.map(|v| v.and_then(Value::as_f64)).collect();
                (DataType::Float64, Arc::new(Float64Array::from(data)))
            }
            ColumnKind::Text => {
                let data: Vec<Option<String>> =
                    values.map(|v| v.and_then(text_of)).collect();
                (DataType::Utf8, Arc::new(StringArray::from(data)))
            }
        };
        fields.push(Field::new(name, data_type, true));
        columns.push(array);
    }

    let schema = Arc::new(Schema::new(fields));
    RecordBatch::try_new(schema, columns)
        .map_err(|e| ExtractError::Write(format!("failed to assemble record batch: {e}")))
}
