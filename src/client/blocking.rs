//! Blocking memory client.

use super::provision::{indicates_missing_project, AUTO_PROJECT_DESCRIPTION};
use super::{empty_results, require_non_empty, results_page};
use crate::api::requests;
use crate::config::Config;
use crate::flatten::flatten_body;
use crate::transport::blocking::BlockingTransport;
use crate::types::{
    normalize_messages, AddOptions, CallStatus, JsonMap, ListOptions, MemoryResults,
    MemoryStoreOptions, MemoryStoreUpdate, MemoryUpdate, MessageInput, ScopeFilter, SearchOptions,
};
use crate::{Error, Result};

/// Blocking variant of [`AsyncMemoryClient`](crate::AsyncMemoryClient).
///
/// Same operation surface, same request shapes, same response handling;
/// each call blocks the current thread for one network round trip. Must
/// not be used from within an async runtime.
#[derive(Debug)]
pub struct MemoryClient {
    transport: BlockingTransport,
    project: String,
    memory_store: String,
}

impl MemoryClient {
    /// Build a client from connection configuration and a store binding.
    ///
    /// Fails with a validation error when `project` or `memory_store` is
    /// empty.
    pub fn new(
        config: Config,
        project: impl Into<String>,
        memory_store: impl Into<String>,
    ) -> Result<Self> {
        let project = project.into();
        let memory_store = memory_store.into();
        require_non_empty(&project, "project")?;
        require_non_empty(&memory_store, "memory_store")?;
        Ok(Self {
            transport: BlockingTransport::new(&config)?,
            project,
            memory_store,
        })
    }

    /// The bound project name.
    pub fn project(&self) -> &str {
        &self.project
    }

    /// The bound memory store name.
    pub fn memory_store(&self) -> &str {
        &self.memory_store
    }

    /// Store new memories from flexible message input.
    pub fn add(&self, messages: impl Into<MessageInput>, options: &AddOptions) -> Result<JsonMap> {
        let messages = normalize_messages(messages.into());
        let request =
            requests::add_memories(&self.project, &self.memory_store, &messages, options);
        let response = self.transport.execute(request)?;
        match &response.body {
            Some(body) => Ok(flatten_body(Some(body))),
            None => Ok(empty_results()),
        }
    }

    /// Retrieve one memory by id.
    pub fn get(&self, memory_id: &str) -> Result<JsonMap> {
        require_non_empty(memory_id, "memory_id")?;
        let request = requests::get_memory(&self.project, &self.memory_store, memory_id);
        let response = self.transport.execute(request)?;
        Ok(flatten_body(response.body.as_ref()))
    }

    /// List memories, optionally narrowed by scope and capped by `limit`.
    pub fn get_all(&self, options: &ListOptions) -> Result<MemoryResults> {
        let request = requests::get_memories(&self.project, &self.memory_store, options);
        let response = self.transport.execute(request)?;
        Ok(results_page(response.body))
    }

    /// Search memories by query.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Result<MemoryResults> {
        require_non_empty(query, "query")?;
        let request =
            requests::search_memories(&self.project, &self.memory_store, query, options);
        let response = self.transport.execute(request)?;
        Ok(results_page(response.body))
    }

    /// Update a memory's text and/or metadata. At least one of the two must
    /// be provided.
    pub fn update(&self, memory_id: &str, update: &MemoryUpdate) -> Result<CallStatus> {
        require_non_empty(memory_id, "memory_id")?;
        if update.is_empty() {
            return Err(Error::validation(
                "either text or metadata must be provided for update",
            ));
        }
        let request =
            requests::update_memory(&self.project, &self.memory_store, memory_id, update);
        let response = self.transport.execute(request)?;
        Ok(response.into_status())
    }

    /// Delete one memory by id.
    pub fn delete(&self, memory_id: &str) -> Result<CallStatus> {
        require_non_empty(memory_id, "memory_id")?;
        let request = requests::delete_memory(&self.project, &self.memory_store, memory_id);
        let response = self.transport.execute(request)?;
        Ok(response.into_status())
    }

    /// Delete every memory matching the scope. An empty scope deletes all
    /// memories in the store.
    pub fn delete_all(&self, scope: &ScopeFilter) -> Result<CallStatus> {
        let request = requests::delete_memories(&self.project, &self.memory_store, scope);
        let response = self.transport.execute(request)?;
        Ok(response.into_status())
    }

    /// Retrieve the change history of one memory.
    pub fn history(&self, memory_id: &str) -> Result<Vec<JsonMap>> {
        require_non_empty(memory_id, "memory_id")?;
        let request =
            requests::get_memory_history(&self.project, &self.memory_store, memory_id);
        let response = self.transport.execute(request)?;
        Ok(crate::flatten::flatten_results(response.body.as_ref()))
    }

    /// Create the bound memory store, auto-creating the owning project and
    /// retrying once when the backend reports the project missing.
    pub fn create_memory_store(&self, options: &MemoryStoreOptions) -> Result<CallStatus> {
        let request =
            requests::create_memory_store(&self.project, &self.memory_store, options);
        let response = match self.transport.execute(request.clone()) {
            Ok(response) => response,
            Err(error) if indicates_missing_project(&error) => {
                self.transport.execute(requests::create_project(
                    &self.project,
                    AUTO_PROJECT_DESCRIPTION,
                ))?;
                self.transport.execute(request)?
            }
            Err(error) => return Err(error),
        };
        Ok(response.into_status())
    }

    /// Fetch the bound memory store's configuration and timestamps.
    pub fn describe_memory_store(&self) -> Result<JsonMap> {
        let request = requests::get_memory_store(&self.project, &self.memory_store);
        let response = self.transport.execute(request)?;
        Ok(flatten_body(response.body.as_ref()))
    }

    /// Change the bound memory store's configuration.
    pub fn update_memory_store(&self, update: &MemoryStoreUpdate) -> Result<CallStatus> {
        let request =
            requests::update_memory_store(&self.project, &self.memory_store, update);
        let response = self.transport.execute(request)?;
        Ok(response.into_status())
    }

    /// Delete the bound memory store and every memory in it.
    pub fn delete_memory_store(&self) -> Result<CallStatus> {
        let request = requests::delete_memory_store(&self.project, &self.memory_store);
        let response = self.transport.execute(request)?;
        Ok(response.into_status())
    }
}
