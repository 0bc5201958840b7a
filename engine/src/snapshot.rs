//! Snapshot of one collection's key space.
//!
//! Storage sees a collection as flat keys (`name` and `name-id`). A snapshot
//! holds the same data as a two-level mapping: the ordered index and an
//! id-to-body map. It is the form used to export, back up or move a
//! collection between backends.

use crate::{error::Result, CollectionName, Error, RecordId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Version of the snapshot format for future compatibility.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// The contents of one collection.
///
/// Uses BTreeMap so serialization is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSnapshot {
    /// Snapshot format version
    pub format_version: u32,
    /// Collection name
    pub name: CollectionName,
    /// Record ids in index order
    pub index: Vec<RecordId>,
    /// Serialized record bodies by id
    pub records: BTreeMap<RecordId, String>,
}

impl CollectionSnapshot {
    /// Create an empty snapshot for a collection.
    pub fn new(name: impl Into<CollectionName>) -> Self {
        Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            name: name.into(),
            index: Vec::new(),
            records: BTreeMap::new(),
        }
    }

    /// Number of indexed records.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Indexed ids with no body in the snapshot.
    pub fn dangling(&self) -> impl Iterator<Item = &RecordId> {
        self.index
            .iter()
            .filter(move |id| !self.records.contains_key(*id))
    }

    /// Check the snapshot can be restored.
    pub fn validate(&self) -> Result<()> {
        if self.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(Error::InvalidSnapshot(format!(
                "unsupported format version: {}",
                self.format_version
            )));
        }

        let mut seen = HashSet::new();
        for id in &self.index {
            if !seen.insert(id) {
                return Err(Error::InvalidSnapshot(format!("duplicate id in index: {id}")));
            }
        }

        if let Some(id) = self.records.keys().find(|id| !seen.contains(id)) {
            return Err(Error::InvalidSnapshot(format!("record not in index: {id}")));
        }

        Ok(())
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidSnapshot(e.to_string()))
    }
}
