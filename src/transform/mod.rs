//! Record transformations applied between extract and load.

mod flatten;

pub use flatten::{FlatRecord, Flattener};
