//! Collection - a named group of documents synced through one [`Store`].

use crate::{
    error::Result,
    sync::{dispatch, HasStore, Method, SyncResponse},
    Document, Model, RecordId, Storage, Store,
};

/// In-memory documents of one collection, persisted through its store.
///
/// Every change goes through the sync dispatcher, so a collection behaves
/// exactly like a model layer calling [`crate::sync`] itself.
#[derive(Debug)]
pub struct Collection<S> {
    store: Store<S>,
    models: Vec<Document>,
}

impl<S: Storage> Collection<S> {
    /// Wrap a store. The collection starts empty; call [`Collection::fetch`]
    /// to load what is stored.
    pub fn new(store: Store<S>) -> Self {
        Self {
            store,
            models: Vec::new(),
        }
    }

    /// Open the store for `name` and load its documents.
    pub fn open(name: &str, storage: S) -> Result<Self> {
        let mut collection = Self::new(Store::open(name, storage)?);
        collection.fetch()?;
        Ok(collection)
    }

    /// The backing store.
    pub fn store(&self) -> &Store<S> {
        &self.store
    }

    /// Loaded documents in index order.
    pub fn models(&self) -> &[Document] {
        &self.models
    }

    /// Number of loaded documents.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Check if no documents are loaded.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// A loaded document by id.
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.models.iter().find(|m| m.id() == Some(id))
    }

    /// Replace the loaded documents with everything stored. Returns how many
    /// were loaded.
    pub fn fetch(&mut self) -> Result<usize> {
        let mut all = Document::default();
        let bodies = dispatch(Method::Read, &mut self.store, &mut all)?
            .map(SyncResponse::into_bodies)
            .unwrap_or_default();

        self.models = bodies
            .iter()
            .map(|body| Document::from_json(body))
            .collect::<Result<_>>()?;
        Ok(self.models.len())
    }

    /// Persist a new document and add it to the collection.
    pub fn create(&mut self, mut doc: Document) -> Result<&Document> {
        dispatch(Method::Create, &mut self.store, &mut doc)?;
        let pos = self.upsert(doc);
        Ok(&self.models[pos])
    }

    /// Persist a document: create it if it has no id, update it otherwise.
    pub fn save(&mut self, mut doc: Document) -> Result<RecordId> {
        let method = if doc.id().is_some() {
            Method::Update
        } else {
            Method::Create
        };
        dispatch(method, &mut self.store, &mut doc)?;
        let id = doc.id().map(str::to_string).unwrap_or_default();
        self.upsert(doc);
        Ok(id)
    }

    /// Delete a document by id. Returns the removed document if it was loaded.
    pub fn remove(&mut self, id: &str) -> Result<Option<Document>> {
        let mut doc = match self.models.iter().position(|m| m.id() == Some(id)) {
            Some(pos) => self.models.remove(pos),
            None => {
                self.store.destroy_by_id(id)?;
                return Ok(None);
            }
        };
        dispatch(Method::Delete, &mut self.store, &mut doc)?;
        Ok(Some(doc))
    }

    /// Replace the loaded document with the same id, or append. Returns its
    /// position.
    fn upsert(&mut self, doc: Document) -> usize {
        match self.models.iter().position(|m| m.id() == doc.id()) {
            Some(pos) => {
                self.models[pos] = doc;
                pos
            }
            None => {
                self.models.push(doc);
                self.models.len() - 1
            }
        }
    }
}

impl<S: Storage> HasStore for Collection<S> {
    type Storage = S;

    fn local_storage(&mut self) -> &mut Store<S> {
        &mut self.store
    }
}
