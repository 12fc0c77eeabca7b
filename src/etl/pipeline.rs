//! Pipeline orchestration for ETL operations

use super::{Extractor, Loader, Transformer};
use crate::error::Result;

/// Outcome of one pipeline run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// Number of records that flowed through the pipeline.
    pub records: usize,
    /// Object keys written by the loader, relative to its storage root.
    pub paths: Vec<String>,
}

/// ETL Pipeline that orchestrates Extract, Transform, and Load operations
///
/// # Type Parameters
/// - `E`: Extractor type
/// - `T`: Transformer type (must transform from E::Item)
/// - `L`: Loader type (must load T::Output)
pub struct Pipeline<E, T, L> {
    extractor: E,
    transformer: T,
    loader: L,
}

impl<E, T, L> Pipeline<E, T, L>
where
    E: Extractor,
    T: Transformer<Input = E::Item>,
    L: Loader<Item = T::Output>,
{
    /// Create a new pipeline
    pub fn new(extractor: E, transformer: T, loader: L) -> Self {
        Self {
            extractor,
            transformer,
            loader,
        }
    }

    /// Run the complete ETL pipeline
    ///
    /// Steps:
    /// 1. Extract items from source
    /// 2. Transform each item
    /// 3. Load items to destination
    ///
    /// Runs strictly sequentially; a failure at any stage terminates the run
    /// with that stage's error and later stages never execute.
    ///
    /// # Errors
    /// Returns the first stage error encountered.
    pub async fn run(&self) -> Result<RunReport> {
        log::info!("Starting ETL pipeline");

        log::debug!("Extracting from source...");
        let items = self.extractor.extract().await?;
        log::info!("Extracted {} items", items.len());

        if items.is_empty() {
            log::warn!("No items extracted, pipeline complete");
            return Ok(RunReport {
                records: 0,
                paths: Vec::new(),
            });
        }

        log::debug!("Transforming items...");
        let transformed = self.transformer.transform_many(items)?;
        let records = transformed.len();
        log::info!("Transformed {} items", records);

        log::debug!("Loading to destination...");
        let paths = self.loader.load(transformed).await?;
        log::info!("Loaded {} items into {} objects", records, paths.len());

        Ok(RunReport { records, paths })
    }
}
