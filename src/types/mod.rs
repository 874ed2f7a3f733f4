//! Core type definitions: messages, scope filters and operation options.

pub mod message;

pub use message::{normalize_messages, Message, MessageInput};

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Plain mapping shape used for backend-defined records. Field names and
/// values are the backend's own and are never interpreted locally.
pub type JsonMap = serde_json::Map<String, Value>;

/// Optional scoping identifiers narrowing which memories an operation
/// touches. All independently optional; the backend ANDs whichever are
/// present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeFilter {
    pub user_id: Option<String>,
    pub agent_id: Option<String>,
    pub app_id: Option<String>,
    pub run_id: Option<String>,
}

impl ScopeFilter {
    /// Scope limited to a single user.
    pub fn user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Self::default()
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_agent_id(mut self, agent_id: impl Into<String>) -> Self {
        self.agent_id = Some(agent_id.into());
        self
    }

    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }
}

/// Options for [`add`](crate::AsyncMemoryClient::add).
#[derive(Debug, Clone)]
pub struct AddOptions {
    pub scope: ScopeFilter,
    /// Arbitrary key-value pairs attached to the memory.
    pub metadata: Option<JsonMap>,
    /// Whether the backend extracts memories from the messages or stores
    /// them as given.
    pub infer: bool,
    pub custom_instructions: Option<String>,
    /// Backend-side processing mode. Unrelated to which facade issues the
    /// call: a blocking client can request asynchronous processing and vice
    /// versa.
    pub async_mode: bool,
}

impl Default for AddOptions {
    fn default() -> Self {
        Self {
            scope: ScopeFilter::default(),
            metadata: None,
            infer: true,
            custom_instructions: None,
            async_mode: true,
        }
    }
}

impl AddOptions {
    /// Default options scoped to a single user.
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            scope: ScopeFilter::user(user_id),
            ..Self::default()
        }
    }
}

/// Options for [`search`](crate::AsyncMemoryClient::search).
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub scope: ScopeFilter,
    pub top_k: Option<u32>,
    pub rerank: bool,
}

impl SearchOptions {
    /// Default options scoped to a single user.
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            scope: ScopeFilter::user(user_id),
            ..Self::default()
        }
    }
}

/// Options for [`get_all`](crate::AsyncMemoryClient::get_all).
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub scope: ScopeFilter,
    pub limit: Option<u32>,
}

/// Fields to change on an existing memory. At least one must be set.
#[derive(Debug, Clone, Default)]
pub struct MemoryUpdate {
    pub text: Option<String>,
    pub metadata: Option<JsonMap>,
}

impl MemoryUpdate {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            metadata: None,
        }
    }

    pub fn metadata(metadata: JsonMap) -> Self {
        Self {
            text: None,
            metadata: Some(metadata),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.text.is_none() && self.metadata.is_none()
    }
}

/// Configuration for creating the bound memory store.
#[derive(Debug, Clone)]
pub struct MemoryStoreOptions {
    pub description: Option<String>,
    pub custom_instructions: Option<String>,
    /// Whether the store maintains a knowledge graph over its memories.
    pub enable_graph: bool,
    /// Memory processing strategy.
    pub strategy: String,
    /// Retention for short-term memories, in days.
    pub short_term_ttl: i64,
}

impl Default for MemoryStoreOptions {
    fn default() -> Self {
        Self {
            description: None,
            custom_instructions: None,
            enable_graph: false,
            strategy: "default".to_string(),
            short_term_ttl: 7,
        }
    }
}

/// Partial update for the bound memory store; unset fields keep their
/// current value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStoreUpdate {
    pub description: Option<String>,
    pub custom_instructions: Option<String>,
    pub enable_graph: Option<bool>,
    pub strategy: Option<String>,
    pub short_term_ttl: Option<i64>,
}

/// Status and headers from mutation calls whose responses carry no parsed
/// body.
#[derive(Debug, Clone)]
pub struct CallStatus {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
}

/// Result of a list-shaped operation. `results` is empty when the backend
/// sent none; it is never absent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MemoryResults {
    pub results: Vec<JsonMap>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_options_default_to_inferred_async_processing() {
        let options = AddOptions::default();
        assert!(options.infer);
        assert!(options.async_mode);
        assert!(options.metadata.is_none());
        assert_eq!(options.scope, ScopeFilter::default());
    }

    #[test]
    fn store_options_defaults() {
        let options = MemoryStoreOptions::default();
        assert!(!options.enable_graph);
        assert_eq!(options.strategy, "default");
        assert_eq!(options.short_term_ttl, 7);
    }

    #[test]
    fn memory_update_emptiness() {
        assert!(MemoryUpdate::default().is_empty());
        assert!(!MemoryUpdate::text("new text").is_empty());
        assert!(!MemoryUpdate::metadata(JsonMap::new()).is_empty());
    }
}
