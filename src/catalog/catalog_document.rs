use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::catalog::{CatalogError, DatasetRaw, DecodeStage};

/// Dataset name -> dataset, for one project.
pub type ProjectDatasets = IndexMap<String, DatasetRaw>;

/// Project key -> datasets. Both levels keep document order.
pub type CatalogDocument = IndexMap<String, ProjectDatasets>;

/// Decode snapshot content into a [`CatalogDocument`].
///
/// Snapshots are double encoded: the file holds a JSON string whose content is
/// the document itself. A file whose outer value is already the document
/// object is accepted as well.
pub fn decode_catalog_document(content: &str) -> Result<CatalogDocument, CatalogError> {
    let outer = serde_json::from_str::<Value>(content).map_err(|error| CatalogError::Parse {
        stage: DecodeStage::Outer,
        message: error.to_string(),
    })?;

    let document = match outer {
        Value::String(inner) => {
            debug!("decoding double-encoded catalog snapshot ({} bytes)", inner.len());
            serde_json::from_str::<CatalogDocument>(&inner)
        }
        Value::Object(_) => {
            debug!("decoding plain catalog snapshot");
            // re-read from text, `Value` does not keep key order
            serde_json::from_str::<CatalogDocument>(content)
        }
        other => {
            return CatalogError::Parse {
                stage: DecodeStage::Outer,
                message: format!("expected a JSON string or object, found {}", json_kind(&other)),
            }
            .err();
        }
    };

    document.map_err(|error| CatalogError::Parse {
        stage: DecodeStage::Inner,
        message: error.to_string(),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
