//! The flat string key/value store records are persisted into.
//!
//! Every [`crate::Store`] takes its storage explicitly. Several stores usually
//! share one backend (as every collection shares `localStorage`), so methods
//! take `&self` and backends use interior mutability.

#[cfg(target_arch = "wasm32")]
mod browser;
mod file;
mod memory;

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserStorage;
pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::Result;
use std::sync::Arc;

/// A string-keyed store of string values.
pub trait Storage: Send + Sync {
    /// Read the value at `key`. `Ok(None)` if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` at `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: Storage + ?Sized> Storage for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

impl<T: Storage + ?Sized> Storage for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

impl<T: Storage + ?Sized> Storage for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
