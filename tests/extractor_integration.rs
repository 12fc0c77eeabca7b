//! End-to-end tests for the extraction job
//!
//! These tests run the full fetch -> flatten -> land pipeline against a
//! mocked upstream API and a temporary storage root, then read the landed
//! Parquet back to verify the table contents.

use arrow::array::Array;
use lake_extractor::{ExtractError, ExtractorConfig, ExtractorJob, PartitionPath};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::json;
use serial_test::serial;
use std::fs::File;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_users() -> serde_json::Value {
    json!([
        {
            "id": 1,
            "name": "Leanne Graham",
            "address": {"city": "Gwenborough", "geo": {"lat": "-37.3159"}}
        },
        {
            "id": 2,
            "name": "Ervin Howell",
            "address": {"city": "Wisokyburgh", "geo": {"lat": "-43.9509"}}
        },
        {
            "id": 3,
            "name": "Clementine Bauch"
        }
    ])
}

async fn mock_upstream(payload: serde_json::Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload))
        .mount(&server)
        .await;
    server
}

fn job_for(server: &MockServer, root: &Path) -> ExtractorJob {
    let config = ExtractorConfig::new(root, &format!("{}/users", server.uri()), "users").unwrap();
    ExtractorJob::new(config)
}

fn read_batch(file_path: &Path) -> arrow::record_batch::RecordBatch {
    let file = File::open(file_path).unwrap();
    let mut reader = ParquetRecordBatchReaderBuilder::try_new(file)
        .unwrap()
        .build()
        .unwrap();
    reader.next().unwrap().unwrap()
}

#[tokio::test]
async fn test_successful_run_lands_partition() {
    // --- 1. Arrange ---
    let server = mock_upstream(sample_users()).await;
    let root = TempDir::new().unwrap();
    let job = job_for(&server, root.path());

    // --- 2. Act ---
    let response = job.invoke(json!({})).await.unwrap();

    // --- 3. Assert ---
    let expected_prefix = PartitionPath::today().key_prefix("users");
    assert_eq!(response.status_code, 200);
    assert!(
        response.body.contains(&expected_prefix),
        "body should echo the written path: {}",
        response.body
    );

    let file_path = root
        .path()
        .join(&expected_prefix)
        .join("part-00000.parquet");
    assert!(file_path.exists());

    let batch = read_batch(&file_path);
    assert_eq!(batch.num_rows(), 3);
}

#[tokio::test]
async fn test_report_counts_records_and_paths() {
    let server = mock_upstream(sample_users()).await;
    let root = TempDir::new().unwrap();
    let job = job_for(&server, root.path());

    let report = job.run_pipeline().await.unwrap();

    assert_eq!(report.records, 3);
    let expected_prefix = PartitionPath::today().key_prefix("users");
    assert_eq!(
        report.paths,
        vec![format!("{expected_prefix}/part-00000.parquet")]
    );
}

#[tokio::test]
#[serial]
async fn test_missing_root_fails_before_any_http_call() {
    // The mock server verifies on drop that zero requests arrived.
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    unsafe {
        std::env::remove_var("DATA_LAKE_ROOT");
        std::env::set_var("EXTRACTOR_API_URL", format!("{}/users", server.uri()));
    }

    let err = ExtractorConfig::from_env().unwrap_err();
    assert!(matches!(err, ExtractError::Configuration(_)));

    unsafe {
        std::env::remove_var("EXTRACTOR_API_URL");
    }
}

#[tokio::test]
#[serial]
async fn test_config_loaded_from_env() {
    let root = TempDir::new().unwrap();
    unsafe {
        std::env::set_var("DATA_LAKE_ROOT", root.path());
        std::env::remove_var("EXTRACTOR_API_URL");
        std::env::remove_var("EXTRACTOR_ENTITY");
    }

    let config = ExtractorConfig::from_env().unwrap();
    assert_eq!(config.storage_root, root.path());
    assert_eq!(config.entity, "users");
    assert_eq!(config.api_url.host_str(), Some("jsonplaceholder.typicode.com"));

    unsafe {
        std::env::remove_var("DATA_LAKE_ROOT");
    }
}

#[tokio::test]
async fn test_upstream_500_fails_with_no_writes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal failure"))
        .mount(&server)
        .await;
    let root = TempDir::new().unwrap();
    let job = job_for(&server, root.path());

    let err = job.invoke(json!({})).await.unwrap_err();

    match err {
        ExtractError::Upstream { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("internal failure"));
        }
        other => panic!("expected Upstream error, got {other:?}"),
    }
    // Nothing landed.
    assert!(!root.path().join("raw").exists());
}

#[tokio::test]
async fn test_malformed_payload_fails_with_no_writes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"not": "an array"})))
        .mount(&server)
        .await;
    let root = TempDir::new().unwrap();
    let job = job_for(&server, root.path());

    let err = job.invoke(json!({})).await.unwrap_err();

    assert!(matches!(err, ExtractError::Parse(_)));
    assert!(!root.path().join("raw").exists());
}

#[tokio::test]
async fn test_nested_and_missing_fields_share_one_table() {
    let payload = json!([
        {"id": 1, "address": {"city": "X"}},
        {"id": 2}
    ]);
    let server = mock_upstream(payload).await;
    let root = TempDir::new().unwrap();
    let job = job_for(&server, root.path());

    job.invoke(json!({})).await.unwrap();

    let file_path = root
        .path()
        .join(PartitionPath::today().key_prefix("users"))
        .join("part-00000.parquet");
    let batch = read_batch(&file_path);
    assert_eq!(batch.num_rows(), 2);

    let city = batch
        .column_by_name("address.city")
        .expect("flattened column address.city should exist")
        .as_any()
        .downcast_ref::<arrow::array::StringArray>()
        .unwrap();
    assert_eq!(city.value(0), "X");
    assert!(city.is_null(1));
}

#[tokio::test]
async fn test_rerun_same_day_supersedes_previous_write() {
    let server = mock_upstream(sample_users()).await;
    let root = TempDir::new().unwrap();
    let job = job_for(&server, root.path());

    job.invoke(json!({})).await.unwrap();
    let partition_dir = root.path().join(PartitionPath::today().key_prefix("users"));
    let first = std::fs::read(partition_dir.join("part-00000.parquet")).unwrap();

    job.invoke(json!({})).await.unwrap();

    // Same single file, same table contents as a single run.
    let names: Vec<String> = std::fs::read_dir(&partition_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["part-00000.parquet".to_string()]);

    let batch = read_batch(&partition_dir.join("part-00000.parquet"));
    assert_eq!(batch.num_rows(), 3);
    // Parquet encoding is deterministic for identical input.
    let second = std::fs::read(partition_dir.join("part-00000.parquet")).unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_empty_collection_writes_nothing() {
    let server = mock_upstream(json!([])).await;
    let root = TempDir::new().unwrap();
    let job = job_for(&server, root.path());

    let report = job.run_pipeline().await.unwrap();

    assert_eq!(report.records, 0);
    assert!(report.paths.is_empty());
    assert!(!root.path().join("raw").exists());
}
