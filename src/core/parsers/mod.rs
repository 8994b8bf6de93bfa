//! Resource file parsers.
//!
//! Each format decodes into a `serde_json::Value` tree, which is then
//! flattened into ordered [`ResourceKey`]s:
//! - `json`: JSON resource files
//! - `php`: PHP array-literal resource files (decoded statically, never executed)

pub mod json;
pub mod php;

use std::{fs, path::Path};

use serde_json::Value;

use crate::core::{
    ResourceFormat, ResourceKey,
    error::{ProjectError, Result},
};

/// Read and parse one resource file.
pub fn parse_resource(path: &Path, format: ResourceFormat) -> Result<Vec<ResourceKey>> {
    let content = fs::read_to_string(path).map_err(|e| ProjectError::io(path, e))?;
    parse_content(&content, format, path)
}

/// Parse resource content that has already been read. `path` is only used
/// for error reporting.
pub fn parse_content(
    content: &str,
    format: ResourceFormat,
    path: &Path,
) -> Result<Vec<ResourceKey>> {
    let value = match format {
        ResourceFormat::Json => json::parse_json(content).map_err(|e| e.to_string()),
        ResourceFormat::Php => php::parse_php(content).map_err(|e| e.to_string()),
    }
    .map_err(|message| ProjectError::parse(path, message))?;

    let keys = match value {
        Value::Object(map) => {
            let mut keys = Vec::with_capacity(map.len());
            for (name, val) in map {
                flatten_value(val, name, &mut keys);
            }
            keys
        }
        Value::Array(arr) if arr.is_empty() => Vec::new(),
        other => {
            return Err(ProjectError::parse(
                path,
                format!(
                    "expected a map of keys to values at the top level, found {}",
                    value_kind(&other)
                ),
            ));
        }
    };

    tracing::debug!(path = %path.display(), keys = keys.len(), "parsed resource");
    Ok(keys)
}

/// Flatten a nested value into dot-joined key names.
///
/// Maps and lists recurse (`auth.failed`, `items.0`). An empty container
/// is kept as a present key under its own name, valued `{}` or `[]`.
/// Scalars become values and `null` becomes a key with no value.
fn flatten_value(value: Value, prefix: String, result: &mut Vec<ResourceKey>) {
    match value {
        Value::Object(map) if map.is_empty() => {
            result.push(ResourceKey::new(prefix, Some("{}".to_string())))
        }
        Value::Array(arr) if arr.is_empty() => {
            result.push(ResourceKey::new(prefix, Some("[]".to_string())))
        }
        Value::Object(map) => {
            for (key, val) in map {
                flatten_value(val, format!("{}.{}", prefix, key), result);
            }
        }
        Value::Array(arr) => {
            for (index, val) in arr.into_iter().enumerate() {
                flatten_value(val, format!("{}.{}", prefix, index), result);
            }
        }
        Value::String(s) => result.push(ResourceKey::new(prefix, Some(s))),
        Value::Number(n) => result.push(ResourceKey::new(prefix, Some(n.to_string()))),
        Value::Bool(b) => result.push(ResourceKey::new(prefix, Some(b.to_string()))),
        Value::Null => result.push(ResourceKey::new(prefix, None)),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a map",
    }
}
