//! Reading record files

use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::record::RawRecord;

/// Read a JSON array of records from `path`
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<RawRecord>> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading records");
    let content = std::fs::read_to_string(path)?;
    parse_records(&content)
}

/// Parse a JSON array of records from a string
pub fn parse_records(content: &str) -> Result<Vec<RawRecord>> {
    let value: Value = serde_json::from_str(content)?;
    let items = match value {
        Value::Array(items) => items,
        other => return Err(CatalogError::NotAnArray(type_name(&other))),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => Ok(map),
            _ => Err(CatalogError::NotAnObject { index }),
        })
        .collect()
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
