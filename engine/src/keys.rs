//! Storage key namespace for a collection.
//!
//! A collection named `N` owns two key shapes in the flat store:
//! - `N` holds the comma-joined index of record ids
//! - `N-<id>` holds one serialized record body
//!
//! Everything above the storage boundary works with [`Namespace`] and
//! [`StorageKey`]; only [`StorageKey::render`] produces flat strings.

use crate::{error::Result, CollectionName, Error, RecordId};
use std::fmt;

/// Separator between collection name and record id in a record key.
pub const RECORD_KEY_SEPARATOR: char = '-';

/// Separator between ids in a serialized index.
pub const INDEX_SEPARATOR: char = ',';

/// A key within one collection's namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKey<'a> {
    /// The collection's index entry list.
    Index,
    /// One record body.
    Record(&'a str),
}

/// The key space owned by one collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace {
    name: CollectionName,
}

impl Namespace {
    /// Create a namespace for a collection name.
    pub fn new(name: impl Into<CollectionName>) -> Self {
        Self { name: name.into() }
    }

    /// The collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Flat key holding the index.
    pub fn index_key(&self) -> String {
        self.render(StorageKey::Index)
    }

    /// Flat key holding the body of record `id`.
    pub fn record_key(&self, id: &str) -> String {
        self.render(StorageKey::Record(id))
    }

    /// Render a key to its flat string form.
    pub fn render(&self, key: StorageKey<'_>) -> String {
        match key {
            StorageKey::Index => self.name.clone(),
            StorageKey::Record(id) => format!("{}{}{}", self.name, RECORD_KEY_SEPARATOR, id),
        }
    }

}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Split a serialized index into ids. An empty string is an empty index.
pub fn decode_index(raw: &str) -> Vec<RecordId> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(INDEX_SEPARATOR).map(str::to_string).collect()
}

/// Check that `id` survives a round trip through the serialized index.
pub fn check_id(id: &str) -> Result<()> {
    if id.contains(INDEX_SEPARATOR) {
        return Err(Error::InvalidId(id.to_string()));
    }
    Ok(())
}

/// Join ids into a serialized index.
pub fn encode_index(ids: &[RecordId]) -> String {
    ids.join(&INDEX_SEPARATOR.to_string())
}
