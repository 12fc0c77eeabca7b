//! Loader trait for landing data at a destination

use crate::error::Result;
use async_trait::async_trait;

/// Loader trait for landing items at a destination
///
/// Implementors define how to persist a batch: partitioned Parquet under a
/// storage root, a plain directory of files, and so on.
#[async_trait]
pub trait Loader: Send + Sync {
    /// The type of items to load
    type Item: Send;

    /// Land items at the destination.
    ///
    /// Returns the keys of the objects written, relative to the loader's
    /// storage root.
    ///
    /// # Errors
    /// Returns `ExtractError::Write` if the storage layer rejects the write.
    async fn load(&self, items: Vec<Self::Item>) -> Result<Vec<String>>;
}
