//! Flattening of nested JSON records into dotted top-level columns.

use crate::error::{ExtractError, Result};
use crate::etl::Transformer;
use serde_json::{Map, Value};

/// One flattened record: dotted column name to leaf value.
///
/// Missing fields are simply absent; the writer turns absence into nulls so
/// records with different field sets share one table.
pub type FlatRecord = Map<String, Value>;

/// Flattens nested object-valued fields into qualified top-level columns.
///
/// `{"address": {"city": "X"}}` becomes the single column `address.city`.
/// Nesting is followed to arbitrary depth. Array-valued fields are NOT
/// flattened and pass through unchanged; whether downstream schema
/// inference copes with that, or arrays should become JSON-string columns,
/// is unresolved (the Parquet lander currently JSON-encodes them).
pub struct Flattener {
    separator: char,
}

impl Default for Flattener {
    fn default() -> Self {
        Self { separator: '.' }
    }
}

impl Flattener {
    pub fn new() -> Self {
        Self::default()
    }

    fn flatten_into(&self, prefix: &str, value: Value, out: &mut FlatRecord) {
        match value {
            Value::Object(fields) => {
                for (key, child) in fields {
                    let name = if prefix.is_empty() {
                        key
                    } else {
                        format!("{prefix}{}{key}", self.separator)
                    };
                    self.flatten_into(&name, child, out);
                }
            }
            leaf => {
                out.insert(prefix.to_string(), leaf);
            }
        }
    }
}

impl Transformer for Flattener {
    type Input = Value;
    type Output = FlatRecord;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        if !input.is_object() {
            return Err(ExtractError::Parse(
                "cannot flatten a non-object record".to_string(),
            ));
        }

        let mut out = FlatRecord::new();
        self.flatten_into("", input, &mut out);
        Ok(out)
    }
}
