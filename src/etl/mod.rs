//! Core ETL (Extract, Transform, Load) abstractions
//!
//! Trait seams for the one pipeline this crate runs: extract a JSON
//! collection from an upstream source, transform it into flat records, and
//! land it in partitioned columnar storage.

mod extract;
mod load;
mod pipeline;
mod transform;

pub use extract::Extractor;
pub use load::Loader;
pub use pipeline::{Pipeline, RunReport};
pub use transform::Transformer;
