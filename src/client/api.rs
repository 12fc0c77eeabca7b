//! HTTP extraction from the upstream collection endpoint.

use crate::error::{ExtractError, Result};
use crate::etl::Extractor;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

/// Fetches a JSON collection from a fixed HTTP endpoint.
///
/// One GET per extraction, no authentication, no pagination: the endpoint is
/// assumed to return the full collection as a single JSON array of objects.
/// The extractor performs no retries; a failed fetch terminates the
/// invocation and retry policy stays with the caller.
pub struct ApiExtractor {
    client: Client,
    url: Url,
}

impl ApiExtractor {
    pub fn new(url: Url) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }

    /// Fetch the collection and parse it as an array of JSON objects.
    ///
    /// # Errors
    /// - `ExtractError::Request` if the request cannot be sent
    /// - `ExtractError::Upstream` on any non-success status, carrying the
    ///   status code and response body for diagnostics
    /// - `ExtractError::Parse` if the body is not a JSON array of objects
    pub async fn fetch(&self) -> Result<Vec<Value>> {
        log::info!("Fetching data from API: {}", self.url);

        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await.map_err(|e| {
            ExtractError::Parse(format!("response body is not valid JSON: {e}"))
        })?;

        let records = match body {
            Value::Array(records) => records,
            other => {
                return Err(ExtractError::Parse(format!(
                    "expected a JSON array of records, got {}",
                    type_name(&other)
                )));
            }
        };

        if let Some(bad) = records.iter().find(|r| !r.is_object()) {
            return Err(ExtractError::Parse(format!(
                "expected every record to be a JSON object, got {}",
                type_name(bad)
            )));
        }

        log::info!("Fetched {} records", records.len());
        Ok(records)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl Extractor for ApiExtractor {
    type Item = Value;

    async fn extract(&self) -> Result<Vec<Self::Item>> {
        self.fetch().await
    }
}
