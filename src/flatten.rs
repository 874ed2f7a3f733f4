//! Response flattening: opaque backend bodies into plain mappings.
//!
//! The backend replies with rich typed objects; callers want plain data.
//! Absence of a body or of a list field is normal, not exceptional, so
//! nothing here returns an error.

use crate::types::JsonMap;
use serde_json::Value;

/// Capability of producing a plain mapping view of a response body.
///
/// The flattener depends only on this capability, not on concrete backend
/// types, so tests can substitute fakes.
pub trait Flattenable {
    fn to_map(&self) -> JsonMap;
}

impl Flattenable for JsonMap {
    fn to_map(&self) -> JsonMap {
        self.clone()
    }
}

impl Flattenable for Value {
    fn to_map(&self) -> JsonMap {
        match self {
            Value::Object(map) => map.clone(),
            _ => JsonMap::new(),
        }
    }
}

/// Flatten an optional response body; absent or null bodies yield an empty
/// mapping.
pub fn flatten_body<F: Flattenable>(body: Option<&F>) -> JsonMap {
    body.map(Flattenable::to_map).unwrap_or_default()
}

/// Flatten a list-valued response field, preserving element order. Absent,
/// null or non-array values yield an empty vec, never null.
pub fn flatten_results(value: Option<&Value>) -> Vec<JsonMap> {
    match value {
        Some(Value::Array(items)) => items.iter().map(Flattenable::to_map).collect(),
        _ => Vec::new(),
    }
}
