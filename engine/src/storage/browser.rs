//! `window.localStorage` backend for wasm32 hosts.

use super::Storage;
use crate::error::{Error, Result};

/// Storage backed by the browser's `localStorage`.
///
/// Holds no handle; the window's storage is looked up on every call, so the
/// type stays `Send + Sync`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    /// Create a handle to `localStorage`.
    pub fn new() -> Self {
        Self
    }

    fn local_storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| Error::Storage("localStorage unavailable".into()))
    }
}

impl Storage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Self::local_storage()?
            .get_item(key)
            .map_err(|e| Error::Storage(format!("localStorage get_item failed: {e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        Self::local_storage()?
            .set_item(key, value)
            .map_err(|e| Error::Storage(format!("localStorage set_item failed: {e:?}")))
    }

    fn remove(&self, key: &str) -> Result<()> {
        Self::local_storage()?
            .remove_item(key)
            .map_err(|e| Error::Storage(format!("localStorage remove_item failed: {e:?}")))
    }
}
