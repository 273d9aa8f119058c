//! Resource Loader
//!
//! Reads the resource inventory written by the discovery step.

use super::descriptor::ResourceDescriptor;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

/// Load the resource list from a JSON file.
///
/// A missing file is not an error: composition proceeds with no resources.
pub fn load_resources(path: &Path) -> Result<Vec<ResourceDescriptor>> {
    if !path.exists() {
        tracing::warn!(
            "Resource file {} not found, composing an empty dashboard",
            path.display()
        );
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read resource file {}", path.display()))?;

    let resources = parse_resources(&content)
        .with_context(|| format!("Invalid resource file {}", path.display()))?;

    tracing::info!("Loaded {} resources from {}", resources.len(), path.display());
    Ok(resources)
}

/// Parse a JSON array of resource records
pub fn parse_resources(content: &str) -> Result<Vec<ResourceDescriptor>> {
    let value: Value = serde_json::from_str(content)?;
    match value {
        Value::Array(items) => Ok(items.into_iter().map(ResourceDescriptor::new).collect()),
        Value::Null => Ok(Vec::new()),
        other => Err(anyhow::anyhow!(
            "Expected a JSON array of resources, found {}",
            json_type_name(&other)
        )),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
