//! Store - the record index of one collection.
//!
//! A Store keeps the ordered list of record ids for a collection in memory and
//! mirrors it to storage under the collection name. Each record body lives
//! under its own `name-id` key. The in-memory list is the working copy;
//! storage is written explicitly after every mutation.

use crate::{
    error::Result,
    guid,
    keys::{self, Namespace},
    snapshot::CollectionSnapshot,
    CollectionName, Error, Model, RecordId, Storage,
};
use std::collections::BTreeMap;

/// The record index for one named collection.
#[derive(Debug)]
pub struct Store<S> {
    /// Key space of the collection
    namespace: Namespace,
    /// Record ids in insertion order
    records: Vec<RecordId>,
    /// Backing storage
    storage: S,
}

impl<S: Storage> Store<S> {
    /// Open the store for collection `name`, loading its index from storage.
    ///
    /// A missing index means an empty collection.
    pub fn open(name: impl Into<CollectionName>, storage: S) -> Result<Self> {
        let namespace = Namespace::new(name);
        let records = storage
            .get(&namespace.index_key())?
            .map(|raw| keys::decode_index(&raw))
            .unwrap_or_default();

        tracing::debug!(collection = %namespace, records = records.len(), "opened store");

        Ok(Self {
            namespace,
            records,
            storage,
        })
    }

    /// The collection name.
    pub fn name(&self) -> &str {
        self.namespace.name()
    }

    /// The collection's key space.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Record ids in index order.
    pub fn ids(&self) -> &[RecordId] {
        &self.records
    }

    /// Number of indexed records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check if `id` is indexed.
    pub fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|r| r == id)
    }

    /// The backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Write the index to storage, replacing what was there.
    pub fn save(&self) -> Result<()> {
        self.storage
            .set(&self.namespace.index_key(), &keys::encode_index(&self.records))
    }

    /// Persist a new model, assigning it a GUID if it has no id.
    ///
    /// The id is set on the model itself, so it is part of the stored body.
    pub fn create<'m, M: Model>(&mut self, model: &'m mut M) -> Result<&'m mut M> {
        let id = match assigned_id(&*model) {
            Some(id) => {
                keys::check_id(id)?;
                id.to_string()
            }
            None => {
                let id = guid::generate();
                model.set_id(id.clone());
                id
            }
        };

        self.write_body(&id, &model.to_json()?)?;
        if !self.contains(&id) {
            self.records.push(id.clone());
        }
        self.save()?;

        tracing::debug!(collection = %self.namespace, id = %id, "created record");
        Ok(model)
    }

    /// Overwrite a model's stored body, indexing it if it was not indexed.
    pub fn update<'m, M: Model>(&mut self, model: &'m M) -> Result<&'m M> {
        let id = assigned_id(model).ok_or(Error::MissingId)?;
        keys::check_id(id)?;

        self.write_body(id, &model.to_json()?)?;
        if !self.contains(id) {
            self.records.push(id.to_string());
            self.save()?;
        }

        tracing::debug!(collection = %self.namespace, id = %id, "updated record");
        Ok(model)
    }

    /// Stored body of a model, or `None` if nothing is stored for its id.
    pub fn find<M: Model>(&self, model: &M) -> Result<Option<String>> {
        let id = assigned_id(model).ok_or(Error::MissingId)?;
        self.find_by_id(id)
    }

    /// Stored body for `id`. The index is not consulted.
    pub fn find_by_id(&self, id: &str) -> Result<Option<String>> {
        self.storage.get(&self.namespace.record_key(id))
    }

    /// Stored bodies of every indexed record, in index order.
    ///
    /// Ids whose body is missing from storage are skipped.
    pub fn find_all(&self) -> Result<Vec<String>> {
        let mut bodies = Vec::with_capacity(self.records.len());
        for id in &self.records {
            match self.find_by_id(id)? {
                Some(body) => bodies.push(body),
                None => {
                    tracing::warn!(collection = %self.namespace, id = %id, "indexed record has no stored body");
                }
            }
        }
        Ok(bodies)
    }

    /// Remove a model's body and its index entry. Returns the model given.
    pub fn destroy<'m, M: Model>(&mut self, model: &'m M) -> Result<&'m M> {
        let id = assigned_id(model).ok_or(Error::MissingId)?;
        self.destroy_by_id(id)?;
        Ok(model)
    }

    /// Remove the body and index entry for `id`.
    pub fn destroy_by_id(&mut self, id: &str) -> Result<()> {
        self.storage.remove(&self.namespace.record_key(id))?;
        self.records.retain(|r| r != id);
        self.save()?;

        tracing::debug!(collection = %self.namespace, id = %id, "destroyed record");
        Ok(())
    }

    /// Read the collection out as an index plus id-to-body map.
    ///
    /// Dangling ids stay in the index but have no entry in `records`.
    pub fn snapshot(&self) -> Result<CollectionSnapshot> {
        let mut records = BTreeMap::new();
        for id in &self.records {
            if let Some(body) = self.find_by_id(id)? {
                records.insert(id.clone(), body);
            }
        }

        let mut snapshot = CollectionSnapshot::new(self.name());
        snapshot.index = self.records.clone();
        snapshot.records = records;
        Ok(snapshot)
    }

    /// Replace the collection's contents with a snapshot.
    ///
    /// Bodies of currently indexed records that the snapshot does not index
    /// are removed, as are bodies of ids the snapshot indexes without a body.
    /// Bodies are written before the index.
    pub fn restore(&mut self, snapshot: CollectionSnapshot) -> Result<()> {
        snapshot.validate()?;
        if snapshot.name != self.name() {
            return Err(Error::InvalidSnapshot(format!(
                "snapshot is for collection '{}', store is '{}'",
                snapshot.name,
                self.name()
            )));
        }

        let stale = self
            .records
            .iter()
            .filter(|id| !snapshot.index.contains(*id))
            .chain(snapshot.dangling());
        for id in stale {
            self.storage.remove(&self.namespace.record_key(id))?;
        }
        for (id, body) in &snapshot.records {
            self.write_body(id, body)?;
        }
        self.records = snapshot.index;
        self.save()?;

        tracing::debug!(collection = %self.namespace, records = self.records.len(), "restored snapshot");
        Ok(())
    }

    fn write_body(&self, id: &str, body: &str) -> Result<()> {
        self.storage.set(&self.namespace.record_key(id), body)
    }
}

/// A model's identifier, treating an empty one as unassigned.
pub(crate) fn assigned_id<M: Model + ?Sized>(model: &M) -> Option<&str> {
    model.id().filter(|id| !id.is_empty())
}
