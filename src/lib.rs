//! # loglake-memory
//!
//! Memory client for the LogLake log analytics service.
//!
//! ## Overview
//!
//! This library provides a mem0-style interface for creating, retrieving,
//! searching, updating and deleting memories held in a LogLake memory store.
//! All matching, ranking, storage and inference happens server-side; the
//! client shapes requests, signs them, and flattens the typed responses back
//! into plain mappings.
//!
//! A client is bound to one `(project, memory store)` pair for its whole
//! lifetime. Two facades share the same request and response logic:
//! [`AsyncMemoryClient`] for async callers and [`MemoryClient`] (feature
//! `blocking`, enabled by default) for synchronous code.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use loglake_memory::{AddOptions, AsyncMemoryClient, Config, SearchOptions};
//!
//! #[tokio::main]
//! async fn main() -> loglake_memory::Result<()> {
//!     let config = Config::access_key(
//!         "cn-hangzhou.loglake.example.com",
//!         "your_access_key_id",
//!         "your_access_key_secret",
//!     );
//!     let client = AsyncMemoryClient::new(config, "my-project", "my-store")?;
//!
//!     client
//!         .add("I love playing tennis", &AddOptions::for_user("user123"))
//!         .await?;
//!
//!     let hits = client
//!         .search("tennis", &SearchOptions::for_user("user123"))
//!         .await?;
//!     for memory in hits.results {
//!         println!("{:?}", memory.get("memory"));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Async and blocking client facades |
//! | [`config`] | Endpoint and credential configuration |
//! | [`types`] | Messages, scope filters and operation options |
//! | [`flatten`] | Response flattening into plain mappings |
//! | [`transport`] | HTTP execution and request signing |

pub mod client;
pub mod config;
pub mod error;
pub mod flatten;
pub mod transport;
pub mod types;

mod api;

pub use client::AsyncMemoryClient;
#[cfg(feature = "blocking")]
pub use client::MemoryClient;
pub use config::{Config, Credential};
pub use error::Error;
pub use flatten::Flattenable;
pub use types::{
    AddOptions, CallStatus, JsonMap, ListOptions, MemoryResults, MemoryStoreOptions,
    MemoryStoreUpdate, MemoryUpdate, Message, MessageInput, ScopeFilter, SearchOptions,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
