//! Manifest serialization

use serde_json::Value as JsonValue;

use crate::error::Result;

/// Render one document as YAML
pub fn to_yaml(document: &JsonValue) -> Result<String> {
    Ok(serde_yaml::to_string(document)?)
}

/// Render one document as pretty-printed JSON
pub fn to_json_pretty(document: &JsonValue) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Render documents as a `---`-separated YAML stream
pub fn to_yaml_stream<'a>(documents: impl IntoIterator<Item = &'a JsonValue>) -> Result<String> {
    let mut out = String::new();
    for document in documents {
        out.push_str("---\n");
        out.push_str(&serde_yaml::to_string(document)?);
    }
    Ok(out)
}
