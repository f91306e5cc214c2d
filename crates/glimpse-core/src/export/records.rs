//! Loose validation of record sets read back from JSON.

use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::error::MetadataValidationError;
use crate::types::ImageMetadata;

/// Accepted spellings of the source path key, in lookup order.
const SOURCE_KEYS: [&str; 3] = ["source_path", "sourcePath", "thumbnail"];

/// Check that `value` is an array of records and convert it.
///
/// Every record needs a source path plus `title`, `description` and `tags`.
/// Text fields that are not strings are coerced to their JSON text (`null`
/// becomes `"null"`); a non-array `tags` becomes a single tag.
pub fn validate_records(value: &Value) -> Result<Vec<ImageMetadata>, MetadataValidationError> {
    let items = value
        .as_array()
        .ok_or(MetadataValidationError::NotASequence)?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let object = item
                .as_object()
                .ok_or(MetadataValidationError::NotARecord { index })?;
            record_from_object(index, object)
        })
        .collect()
}

fn record_from_object(
    index: usize,
    object: &Map<String, Value>,
) -> Result<ImageMetadata, MetadataValidationError> {
    let source = SOURCE_KEYS
        .iter()
        .find_map(|key| object.get(*key))
        .ok_or(MetadataValidationError::MissingField {
            index,
            field: "source_path",
        })?;
    let source_path = source
        .as_str()
        .map(PathBuf::from)
        .ok_or_else(|| MetadataValidationError::Malformed {
            index,
            message: format!("source path must be a string, got {source}"),
        })?;

    let field = |name: &'static str| {
        object
            .get(name)
            .ok_or(MetadataValidationError::MissingField { index, field: name })
    };
    let title = coerce_text(field("title")?);
    let description = coerce_text(field("description")?);
    let tags = match field("tags")? {
        Value::Array(tags) => tags.iter().map(coerce_text).collect(),
        other => vec![coerce_text(other)],
    };

    let is_error = ["is_error", "isError", "error"]
        .iter()
        .find_map(|key| object.get(*key))
        .and_then(Value::as_bool)
        .unwrap_or(false);

    Ok(ImageMetadata {
        source_path,
        title,
        description,
        tags,
        is_error,
    })
}

fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
