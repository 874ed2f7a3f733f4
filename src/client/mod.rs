//! Client facades over the LogLake memory service.
//!
//! [`AsyncMemoryClient`] and [`MemoryClient`] expose the same operation
//! surface over the same request builders and flatteners; only the
//! scheduling mode of the underlying transport differs.

mod asynchronous;
#[cfg(feature = "blocking")]
mod blocking;
mod provision;

pub use asynchronous::AsyncMemoryClient;
#[cfg(feature = "blocking")]
pub use blocking::MemoryClient;

use crate::flatten::flatten_results;
use crate::types::{JsonMap, MemoryResults};
use crate::{Error, Result};
use serde_json::Value;

/// Fail-fast check for required scalar arguments. Runs before any request
/// is built, so a failure means no network call was attempted.
pub(crate) fn require_non_empty(value: &str, name: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::validation(format!("{} is required", name)));
    }
    Ok(())
}

/// Shape a list-valued response body into a results page. An absent body or
/// an absent `results` field yields an empty page.
pub(crate) fn results_page(body: Option<Value>) -> MemoryResults {
    let results = flatten_results(body.as_ref().and_then(|b| b.get("results")));
    MemoryResults { results }
}

/// The body `add` reports when the backend sent none.
pub(crate) fn empty_results() -> JsonMap {
    let mut map = JsonMap::new();
    map.insert("results".to_string(), Value::Array(Vec::new()));
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_values_are_rejected_by_name() {
        let err = require_non_empty("", "memory_id").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Validation error: memory_id is required");
        assert!(require_non_empty("mem_1", "memory_id").is_ok());
    }

    #[test]
    fn missing_results_field_yields_an_empty_page() {
        assert!(results_page(None).results.is_empty());
        assert!(results_page(Some(json!({"count": 3}))).results.is_empty());
        assert!(results_page(Some(json!({"results": null}))).results.is_empty());
    }

    #[test]
    fn present_results_are_flattened_in_order() {
        let page = results_page(Some(json!({"results": [{"id": "a"}, {"id": "b"}]})));
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].get("id"), Some(&json!("a")));
        assert_eq!(page.results[1].get("id"), Some(&json!("b")));
    }
}
