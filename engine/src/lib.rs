//! # localsync Engine
//!
//! Local key-value persistence for a model/collection layer.
//!
//! Instead of syncing models with a remote server, the engine persists them
//! into a flat string-keyed store: `window.localStorage` in the browser, a
//! JSON file or an in-memory map natively.
//!
//! ## Design Principles
//!
//! - **Injected storage**: every [`Store`] is handed its [`Storage`]; nothing
//!   reaches for a global
//! - **Synchronous**: every call returns after its storage reads and writes
//! - **Thin**: no conflict resolution, no transactions, no retries
//!
//! ## Core Concepts
//!
//! ### Storage layout
//!
//! A collection named `todos` owns two key shapes:
//! - `todos` holds the comma-joined list of record ids, in insertion order
//! - `todos-<id>` holds one record serialized as JSON
//!
//! ### Identifiers
//!
//! Models saved without an id get a GUID-like identifier
//! (`xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`) from [`guid::generate`], which
//! is written onto the model and never regenerated.
//!
//! ### Sync
//!
//! [`sync`] maps the verbs `read`, `create`, `update` and `delete` onto
//! [`Store`] operations and reports through success/error callbacks. The only
//! reported error is `"Record not found"`.
//!
//! ## Quick Start
//!
//! ```rust
//! use localsync_engine::{sync, Document, MemoryStorage, Method, Store, SyncOptions};
//! use serde_json::json;
//!
//! let storage = MemoryStorage::new();
//! let mut todos = Store::open("todos", &storage).unwrap();
//!
//! // Create assigns a GUID
//! let mut todo = Document::new(json!({"title": "write docs"}));
//! sync(Method::Create, &mut todos, &mut todo, SyncOptions::success(|_| {})).unwrap();
//! assert!(todo.id.is_some());
//!
//! // Read without an id returns every stored body
//! let mut all = Vec::new();
//! sync(
//!     Method::Read,
//!     &mut todos,
//!     &mut Document::default(),
//!     SyncOptions::success(|resp| all = resp.into_bodies()),
//! )
//! .unwrap();
//! assert_eq!(all.len(), 1);
//!
//! // Read by an unknown id reports "Record not found"
//! let mut missing = Document::with_id("nope", json!({}));
//! let mut message = String::new();
//! sync(
//!     Method::Read,
//!     &mut todos,
//!     &mut missing,
//!     SyncOptions::new(|_| {}, |e| message = e.to_string()),
//! )
//! .unwrap();
//! assert_eq!(message, "Record not found");
//! ```

pub mod collection;
pub mod config;
pub mod error;
pub mod guid;
pub mod keys;
pub mod model;
pub mod snapshot;
pub mod storage;
pub mod store;
pub mod sync;

// Re-export main types at crate root
pub use collection::Collection;
pub use config::{open_storage, Backend, Config, ConfigError};
pub use error::{Error, RECORD_NOT_FOUND};
pub use keys::Namespace;
pub use model::{Document, Model};
pub use snapshot::{CollectionSnapshot, SNAPSHOT_FORMAT_VERSION};
#[cfg(target_arch = "wasm32")]
pub use storage::BrowserStorage;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::Store;
pub use sync::{
    dispatch, legacy_sync, sync, ErrorCallback, HasStore, Method, SyncOptions, SyncResponse,
};

/// Type aliases for clarity
pub type RecordId = String;
pub type CollectionName = String;
