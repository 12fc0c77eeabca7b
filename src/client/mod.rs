//! Upstream API client.
//!
//! Provides [`ApiExtractor`] for fetching the source collection over HTTP.

mod api;

pub use api::ApiExtractor;
